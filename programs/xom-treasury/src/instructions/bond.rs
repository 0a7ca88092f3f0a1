//! User-facing bonding: exchange a listed asset for discounted reward tokens,
//! part paid now, part vesting linearly.
//!
//! The full payout is reserved against `reward_reserve` at bond time, so the
//! vested remainder is escrowed in the reward vault and later claims cannot
//! fail for lack of funds.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    BOND_ISSUER_SEED, BOND_VESTING_SEED, ENGINE_AUTHORITY_SEED, ENGINE_SEED, MAX_VESTING_SLOTS,
};
use crate::error::TreasuryError;
use crate::events::{BondVestedClaimed, Bonded};
use crate::logic::{add_schedule, bond_output, claim_released, day_index, split_immediate};
use crate::state::{BondAsset, BondIssuer, EngineConfig, VestingAccount, VestingSchedule};
use crate::utils::{transfer_from_user_to_vault, transfer_from_vault};

#[derive(Accounts)]
pub struct Bond<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the bond vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [BOND_ISSUER_SEED], bump = bond_issuer.bump)]
    pub bond_issuer: Account<'info, BondIssuer>,

    #[account(mut)]
    pub bond_asset: Account<'info, BondAsset>,

    #[account(mut, address = bond_asset.vault @ TreasuryError::InvalidDestination)]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(mut, address = bond_issuer.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(address = engine.xom_mint @ TreasuryError::InvalidMint)]
    pub xom_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_asset.mint == bond_asset.mint @ TreasuryError::InvalidMint,
    )]
    pub user_asset: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub user_reward: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + VestingAccount::INIT_SPACE,
        seeds = [BOND_VESTING_SEED, user.key().as_ref()],
        bump,
    )]
    pub vesting: Account<'info, VestingAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimBondVested<'info> {
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the reward vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(seeds = [BOND_ISSUER_SEED], bump = bond_issuer.bump)]
    pub bond_issuer: Account<'info, BondIssuer>,

    #[account(mut, address = bond_issuer.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub user_reward: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [BOND_VESTING_SEED, user.key().as_ref()],
        bump = vesting.bump,
        constraint = vesting.owner == user.key() @ TreasuryError::Unauthorized,
    )]
    pub vesting: Account<'info, VestingAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn bond(ctx: Context<Bond>, amount_in: u64) -> Result<()> {
    require!(amount_in > 0, TreasuryError::ZeroAmount);

    let issuer = &mut ctx.accounts.bond_issuer;
    let asset = &mut ctx.accounts.bond_asset;
    require!(asset.enabled, TreasuryError::BondAssetDisabled);
    require!(issuer.reference_price > 0, TreasuryError::NotConfigured);

    let now = Clock::get()?.unix_timestamp;

    // roll the daily window forward before checking capacity
    let today = day_index(now);
    if today != asset.day_index {
        asset.day_index = today;
        asset.daily_remaining = asset.daily_capacity;
    }
    require!(
        amount_in <= asset.daily_remaining,
        TreasuryError::DailyCapExceeded
    );

    let reward_out = bond_output(
        amount_in,
        asset.decimals,
        issuer.reference_price,
        asset.discount_bps,
        ctx.accounts.xom_mint.decimals,
    )?;
    require!(reward_out > 0, TreasuryError::ZeroAmount);
    require!(
        issuer.reward_reserve >= reward_out,
        TreasuryError::InsufficientRewardReserve
    );

    let (immediate, vested) = split_immediate(reward_out, issuer.immediate_bps)?;

    issuer.reward_reserve -= reward_out;
    asset.daily_remaining -= amount_in;

    let vesting = &mut ctx.accounts.vesting;
    if vesting.owner == Pubkey::default() {
        vesting.version = 1;
        vesting.bump = ctx.bumps.vesting;
        vesting.owner = ctx.accounts.user.key();
        vesting.schedules = [VestingSchedule::default(); MAX_VESTING_SLOTS];
    }
    if vested > 0 {
        add_schedule(&mut vesting.schedules, vested, now, asset.vesting_period)?;
    }

    transfer_from_user_to_vault(
        &ctx.accounts.user_asset,
        &ctx.accounts.asset_vault,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_in,
    )?;

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

    emit!(Bonded {
        asset: ctx.accounts.bond_asset.key(),
        user: ctx.accounts.user.key(),
        amount_in,
        reward_out,
        immediate,
        vested,
        daily_remaining: ctx.accounts.bond_asset.daily_remaining,
        timestamp: now,
    });
    Ok(())
}

pub fn claim_bond_vested(ctx: Context<ClaimBondVested>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let amount = claim_released(&mut ctx.accounts.vesting.schedules, now)?;
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

    emit!(BondVestedClaimed {
        user: ctx.accounts.user.key(),
        amount,
        timestamp: now,
    });
    Ok(())
}
