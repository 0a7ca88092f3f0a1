//! Mining emitter administration: setup, pool listing, rate and vesting
//! parameter changes, and reward funding.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    BPS_DENOMINATOR, CAP_DEPOSITOR, CAP_POOL_ADMIN, ENGINE_AUTHORITY_SEED, ENGINE_SEED,
    MINING_EMITTER_SEED, MINING_POOL_SEED, MINING_POOL_VAULT_SEED, MINING_RESERVE_SEED,
};
use crate::error::TreasuryError;
use crate::events::{
    MiningPoolAdded, MiningRewardsDeposited, PoolActiveSet, RewardRateSet, VestingParamsSet,
};
use crate::logic::advance_accumulator;
use crate::state::{EngineConfig, MiningEmitter, MiningPool};
use crate::utils::transfer_from_user_to_vault;

#[derive(Accounts)]
pub struct InitializeMiningEmitter<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == payer.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the reward vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + MiningEmitter::INIT_SPACE,
        seeds = [MINING_EMITTER_SEED],
        bump,
    )]
    pub emitter: Account<'info, MiningEmitter>,

    #[account(address = engine.xom_mint @ TreasuryError::InvalidMint)]
    pub xom_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [MINING_RESERVE_SEED],
        bump,
        token::mint = xom_mint,
        token::authority = engine_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AddMiningPool<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&payer.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the LP vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [MINING_EMITTER_SEED], bump = emitter.bump)]
    pub emitter: Account<'info, MiningEmitter>,

    pub lp_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = 8 + MiningPool::INIT_SPACE,
        seeds = [MINING_POOL_SEED, lp_mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, MiningPool>,

    #[account(
        init,
        payer = payer,
        seeds = [MINING_POOL_VAULT_SEED, lp_mint.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = engine_authority,
    )]
    pub lp_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ManageMiningPool<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&admin.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub pool: Account<'info, MiningPool>,
}

#[derive(Accounts)]
pub struct DepositMiningRewards<'info> {
    pub depositor: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&depositor.key(), CAP_DEPOSITOR)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut, seeds = [MINING_EMITTER_SEED], bump = emitter.bump)]
    pub emitter: Account<'info, MiningEmitter>,

    #[account(mut, address = emitter.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub depositor_token: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn initialize_mining_emitter(ctx: Context<InitializeMiningEmitter>) -> Result<()> {
    let emitter = &mut ctx.accounts.emitter;
    emitter.version = 1;
    emitter.bump = ctx.bumps.emitter;
    emitter.reward_vault = ctx.accounts.reward_vault.key();
    emitter.reward_reserve = 0;
    emitter.pool_count = 0;
    Ok(())
}

pub fn add_mining_pool(
    ctx: Context<AddMiningPool>,
    name: String,
    reward_per_second: u64,
    immediate_bps: u16,
    vesting_period: i64,
) -> Result<()> {
    require!(name.len() <= 32, TreasuryError::PoolNameTooLong);
    require!(
        immediate_bps as u64 <= BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    require!(vesting_period > 0, TreasuryError::InvalidTimeWindow);

    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    pool.version = 1;
    pool.bump = ctx.bumps.pool;
    pool.lp_mint = ctx.accounts.lp_mint.key();
    pool.lp_vault = ctx.accounts.lp_vault.key();
    pool.name = name;
    pool.reward_per_second = reward_per_second;
    pool.total_staked = 0;
    pool.last_update_time = now;
    pool.acc_reward_per_share = 0;
    pool.active = true;
    pool.immediate_bps = immediate_bps;
    pool.vesting_period = vesting_period;

    ctx.accounts.emitter.pool_count = ctx
        .accounts
        .emitter
        .pool_count
        .checked_add(1)
        .ok_or(TreasuryError::MathOverflow)?;

    emit!(MiningPoolAdded {
        pool: ctx.accounts.pool.key(),
        lp_mint: ctx.accounts.pool.lp_mint,
        reward_per_second,
        immediate_bps,
        vesting_period,
        timestamp: now,
    });
    Ok(())
}

pub fn set_reward_rate(ctx: Context<ManageMiningPool>, reward_per_second: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;

    // settle under the old rate before switching
    pool.acc_reward_per_share = advance_accumulator(
        pool.acc_reward_per_share,
        now - pool.last_update_time,
        pool.reward_per_second,
        pool.total_staked,
    )?;
    pool.last_update_time = now;
    pool.reward_per_second = reward_per_second;

    emit!(RewardRateSet {
        pool: pool.key(),
        reward_per_second,
        timestamp: now,
    });
    Ok(())
}

pub fn set_vesting_params(
    ctx: Context<ManageMiningPool>,
    immediate_bps: u16,
    vesting_period: i64,
) -> Result<()> {
    require!(
        immediate_bps as u64 <= BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    require!(vesting_period > 0, TreasuryError::InvalidTimeWindow);

    let pool = &mut ctx.accounts.pool;
    pool.immediate_bps = immediate_bps;
    pool.vesting_period = vesting_period;

    emit!(VestingParamsSet {
        pool: pool.key(),
        immediate_bps,
        vesting_period,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_pool_active(ctx: Context<ManageMiningPool>, active: bool) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.active = active;

    emit!(PoolActiveSet {
        pool: pool.key(),
        active,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn deposit_mining_rewards(ctx: Context<DepositMiningRewards>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let emitter = &mut ctx.accounts.emitter;
    emitter.reward_reserve = emitter
        .reward_reserve
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;

    transfer_from_user_to_vault(
        &ctx.accounts.depositor_token,
        &ctx.accounts.reward_vault,
        &ctx.accounts.depositor,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(MiningRewardsDeposited {
        amount,
        reserve: ctx.accounts.emitter.reward_reserve,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
