//! Bond issuer administration: setup, asset listing, terms, reference price,
//! and reserve funding.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    BOND_ASSET_SEED, BOND_ASSET_VAULT_SEED, BOND_ISSUER_SEED, BOND_RESERVE_SEED, BPS_DENOMINATOR,
    CAP_DEPOSITOR, ENGINE_AUTHORITY_SEED, ENGINE_SEED, MIN_PRICE_UPDATE_INTERVAL,
};
use crate::error::TreasuryError;
use crate::events::{BondAssetAdded, BondReserveDeposited, BondTermsUpdated, ReferencePriceSet};
use crate::logic::day_index;
use crate::state::{BondAsset, BondIssuer, EngineConfig};
use crate::utils::transfer_from_user_to_vault;

#[derive(Accounts)]
pub struct InitializeBondIssuer<'info> {
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
        space = 8 + BondIssuer::INIT_SPACE,
        seeds = [BOND_ISSUER_SEED],
        bump,
    )]
    pub bond_issuer: Account<'info, BondIssuer>,

    #[account(address = engine.xom_mint @ TreasuryError::InvalidMint)]
    pub xom_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [BOND_RESERVE_SEED],
        bump,
        token::mint = xom_mint,
        token::authority = engine_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AddBondAsset<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == payer.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the asset vault
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [BOND_ISSUER_SEED], bump = bond_issuer.bump)]
    pub bond_issuer: Account<'info, BondIssuer>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = 8 + BondAsset::INIT_SPACE,
        seeds = [BOND_ASSET_SEED, mint.key().as_ref()],
        bump,
    )]
    pub bond_asset: Account<'info, BondAsset>,

    #[account(
        init,
        payer = payer,
        seeds = [BOND_ASSET_VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = engine_authority,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateBondTerms<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == admin.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub bond_asset: Account<'info, BondAsset>,
}

#[derive(Accounts)]
pub struct SetReferencePrice<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == admin.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut, seeds = [BOND_ISSUER_SEED], bump = bond_issuer.bump)]
    pub bond_issuer: Account<'info, BondIssuer>,
}

#[derive(Accounts)]
pub struct DepositBondReserve<'info> {
    pub depositor: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&depositor.key(), CAP_DEPOSITOR)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut, seeds = [BOND_ISSUER_SEED], bump = bond_issuer.bump)]
    pub bond_issuer: Account<'info, BondIssuer>,

    #[account(mut, address = bond_issuer.reward_vault @ TreasuryError::InvalidDestination)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub depositor_token: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn initialize_bond_issuer(
    ctx: Context<InitializeBondIssuer>,
    immediate_bps: u16,
) -> Result<()> {
    require!(
        immediate_bps as u64 <= BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );

    let issuer = &mut ctx.accounts.bond_issuer;
    issuer.version = 1;
    issuer.bump = ctx.bumps.bond_issuer;
    issuer.reference_price = 0;
    issuer.last_price_update = 0;
    issuer.reward_vault = ctx.accounts.reward_vault.key();
    issuer.reward_reserve = 0;
    issuer.immediate_bps = immediate_bps;
    issuer.asset_count = 0;
    Ok(())
}

pub fn add_bond_asset(
    ctx: Context<AddBondAsset>,
    discount_bps: u16,
    vesting_period: i64,
    daily_capacity: u64,
) -> Result<()> {
    ctx.accounts.engine.require_not_ossified()?;
    require!(
        (discount_bps as u64) < BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    require!(vesting_period > 0, TreasuryError::InvalidTimeWindow);
    require!(daily_capacity > 0, TreasuryError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let asset = &mut ctx.accounts.bond_asset;
    asset.version = 1;
    asset.bump = ctx.bumps.bond_asset;
    asset.mint = ctx.accounts.mint.key();
    asset.vault = ctx.accounts.vault.key();
    asset.decimals = ctx.accounts.mint.decimals;
    asset.enabled = true;
    asset.discount_bps = discount_bps;
    asset.vesting_period = vesting_period;
    asset.daily_capacity = daily_capacity;
    asset.daily_remaining = daily_capacity;
    asset.day_index = day_index(now);

    ctx.accounts.bond_issuer.asset_count = ctx
        .accounts
        .bond_issuer
        .asset_count
        .checked_add(1)
        .ok_or(TreasuryError::MathOverflow)?;

    emit!(BondAssetAdded {
        mint: ctx.accounts.bond_asset.mint,
        decimals: ctx.accounts.bond_asset.decimals,
        discount_bps,
        vesting_period,
        daily_capacity,
        timestamp: now,
    });
    Ok(())
}

pub fn update_bond_terms(
    ctx: Context<UpdateBondTerms>,
    enabled: bool,
    discount_bps: u16,
    vesting_period: i64,
    daily_capacity: u64,
) -> Result<()> {
    ctx.accounts.engine.require_not_ossified()?;
    require!(
        (discount_bps as u64) < BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    require!(vesting_period > 0, TreasuryError::InvalidTimeWindow);
    require!(daily_capacity > 0, TreasuryError::ZeroAmount);

    let asset = &mut ctx.accounts.bond_asset;
    asset.enabled = enabled;
    asset.discount_bps = discount_bps;
    asset.vesting_period = vesting_period;
    asset.daily_capacity = daily_capacity;
    // keep dailyRemaining <= dailyCapacity when the cap shrinks mid-day
    asset.daily_remaining = asset.daily_remaining.min(daily_capacity);

    emit!(BondTermsUpdated {
        mint: asset.mint,
        enabled,
        discount_bps,
        vesting_period,
        daily_capacity,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_reference_price(ctx: Context<SetReferencePrice>, price: u128) -> Result<()> {
    ctx.accounts.engine.require_not_ossified()?;
    require!(price > 0, TreasuryError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let issuer = &mut ctx.accounts.bond_issuer;
    if issuer.last_price_update != 0 {
        require!(
            now - issuer.last_price_update >= MIN_PRICE_UPDATE_INTERVAL,
            TreasuryError::PriceUpdateTooSoon
        );
    }

    issuer.reference_price = price;
    issuer.last_price_update = now;

    emit!(ReferencePriceSet {
        price,
        timestamp: now,
    });
    Ok(())
}

pub fn deposit_bond_reserve(ctx: Context<DepositBondReserve>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let issuer = &mut ctx.accounts.bond_issuer;
    issuer.reward_reserve = issuer
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

    emit!(BondReserveDeposited {
        amount,
        reserve: ctx.accounts.bond_issuer.reward_reserve,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
