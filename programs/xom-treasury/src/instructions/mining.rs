//! User-facing liquidity mining: stake, unstake, claim, vested claim.
//!
//! Every state-touching entry settles the pool accumulator and the caller's
//! position first; earned rewards park in `unclaimed` until an explicit
//! claim, which splits them immediate/vested by pool parameters. The full
//! claim is reserved against `reward_reserve` at claim time, so the vested
//! remainder is escrowed and later vested claims cannot fail.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{
    ENGINE_AUTHORITY_SEED, ENGINE_SEED, MAX_VESTING_SLOTS, MINING_EMITTER_SEED,
    STAKE_POSITION_SEED,
};
use crate::error::TreasuryError;
use crate::events::{MiningVestedClaimed, RewardsClaimed, Staked, Unstaked};
use crate::logic::{
    add_schedule, advance_accumulator, claim_released, pending_reward, reward_debt,
    split_immediate,
};
use crate::state::{EngineConfig, MiningEmitter, MiningPool, StakePosition, VestingSchedule};
use crate::utils::{transfer_from_user_to_vault, transfer_from_vault};

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub pool: Account<'info, MiningPool>,

    #[account(mut, address = pool.lp_vault @ TreasuryError::InvalidDestination)]
    pub lp_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_lp.mint == pool.lp_mint @ TreasuryError::InvalidMint,
    )]
    pub user_lp: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + StakePosition::INIT_SPACE,
        seeds = [STAKE_POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, StakePosition>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the LP vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub pool: Account<'info, MiningPool>,

    #[account(mut, address = pool.lp_vault @ TreasuryError::InvalidDestination)]
    pub lp_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_lp.mint == pool.lp_mint @ TreasuryError::InvalidMint,
    )]
    pub user_lp: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ TreasuryError::Unauthorized,
    )]
    pub position: Account<'info, StakePosition>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the reward vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [MINING_EMITTER_SEED], bump = emitter.bump)]
    pub emitter: Account<'info, MiningEmitter>,

    #[account(mut)]
    pub pool: Account<'info, MiningPool>,

    #[account(mut, address = emitter.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub user_reward: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ TreasuryError::Unauthorized,
    )]
    pub position: Account<'info, StakePosition>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimMiningVested<'info> {
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the reward vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(seeds = [MINING_EMITTER_SEED], bump = emitter.bump)]
    pub emitter: Account<'info, MiningEmitter>,

    pub pool: Account<'info, MiningPool>,

    #[account(mut, address = emitter.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub user_reward: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ TreasuryError::Unauthorized,
    )]
    pub position: Account<'info, StakePosition>,

    pub token_program: Program<'info, Token>,
}

/// Advance the pool accumulator to `now` and fold the position's pending
/// reward into its `unclaimed` bucket. Callers update `reward_debt` after
/// changing `amount_staked`.
fn settle(pool: &mut MiningPool, position: &mut StakePosition, now: i64) -> Result<()> {
    pool.acc_reward_per_share = advance_accumulator(
        pool.acc_reward_per_share,
        now - pool.last_update_time,
        pool.reward_per_second,
        pool.total_staked,
    )?;
    pool.last_update_time = now;

    if position.amount_staked > 0 {
        let pending = pending_reward(
            position.amount_staked,
            pool.acc_reward_per_share,
            position.reward_debt,
        )?;
        position.unclaimed = position
            .unclaimed
            .checked_add(pending)
            .ok_or(TreasuryError::MathOverflow)?;
    }
    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let pool = &mut ctx.accounts.pool;
    require!(pool.active, TreasuryError::PoolInactive);

    let now = Clock::get()?.unix_timestamp;
    let position = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        position.version = 1;
        position.bump = ctx.bumps.position;
        position.owner = ctx.accounts.user.key();
        position.pool = pool.key();
        position.schedules = [VestingSchedule::default(); MAX_VESTING_SLOTS];
    }

    settle(pool, position, now)?;

    position.amount_staked = position
        .amount_staked
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;
    position.reward_debt = reward_debt(position.amount_staked, pool.acc_reward_per_share)?;

    transfer_from_user_to_vault(
        &ctx.accounts.user_lp,
        &ctx.accounts.lp_vault,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(Staked {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        amount,
        total_staked: ctx.accounts.pool.total_staked,
        timestamp: now,
    });
    Ok(())
}

pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    require!(
        amount <= position.amount_staked,
        TreasuryError::InsufficientStake
    );

    let now = Clock::get()?.unix_timestamp;
    settle(pool, position, now)?;

    position.amount_staked -= amount;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(TreasuryError::MathOverflow)?;
    position.reward_debt = reward_debt(position.amount_staked, pool.acc_reward_per_share)?;

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    transfer_from_vault(
        &ctx.accounts.lp_vault,
        &ctx.accounts.user_lp,
        &ctx.accounts.engine_authority.to_account_info(),
        &ctx.accounts.token_program,
        authority_seeds,
        amount,
    )?;

    emit!(Unstaked {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        amount,
        total_staked: ctx.accounts.pool.total_staked,
        timestamp: now,
    });
    Ok(())
}

pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    let now = Clock::get()?.unix_timestamp;
    settle(pool, position, now)?;
    position.reward_debt = reward_debt(position.amount_staked, pool.acc_reward_per_share)?;

    let total = position.unclaimed;
    require!(total > 0, TreasuryError::NothingToClaim);

    let emitter = &mut ctx.accounts.emitter;
    require!(
        emitter.reward_reserve >= total,
        TreasuryError::InsufficientRewardReserve
    );

    let (immediate, vested) = split_immediate(total, pool.immediate_bps)?;

    emitter.reward_reserve -= total;
    position.unclaimed = 0;
    if vested > 0 {
        add_schedule(&mut position.schedules, vested, now, pool.vesting_period)?;
    }

    if immediate > 0 {
        let authority_seeds: &[&[&[u8]]] = &[&[
            ENGINE_AUTHORITY_SEED,
            &[ctx.accounts.engine.authority_bump],
        ]];
        transfer_from_vault(
            &ctx.accounts.reward_vault,
            &ctx.accounts.user_reward,
            &ctx.accounts.engine_authority.to_account_info(),
            &ctx.accounts.token_program,
            authority_seeds,
            immediate,
        )?;
    }

    emit!(RewardsClaimed {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        immediate,
        vested,
        timestamp: now,
    });
    Ok(())
}

pub fn claim_mining_vested(ctx: Context<ClaimMiningVested>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let amount = claim_released(&mut ctx.accounts.position.schedules, now)?;
    require!(amount > 0, TreasuryError::NothingToClaim);

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    transfer_from_vault(
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward,
        &ctx.accounts.engine_authority.to_account_info(),
        &ctx.accounts.token_program,
        authority_seeds,
        amount,
    )?;

    emit!(MiningVestedClaimed {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        amount,
        timestamp: now,
    });
    Ok(())
}
