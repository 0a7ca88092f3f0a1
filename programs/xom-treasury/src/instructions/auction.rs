//! Liquidity-bootstrapping auction: setup, seeding, swaps, finalization.
//!
//! Handlers follow the same phase discipline throughout: validate, mutate
//! pool state, then move tokens, then emit.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    AUCTION_SEED, AUCTION_VAULT_SEED, BPS_DENOMINATOR, CAP_POOL_ADMIN, ENGINE_AUTHORITY_SEED,
    ENGINE_SEED,
};
use crate::error::TreasuryError;
use crate::events::{
    AuctionConfigured, AuctionFinalized, AuctionLiquidityAdded, AuctionSwapExecuted,
};
use crate::logic::{interpolated_weight, spot_price, weighted_swap_output};
use crate::state::{AuctionPool, EngineConfig};
use crate::utils::{transfer_from_user_to_vault, transfer_from_vault};

// ============================================================================
// Accounts
// ============================================================================

#[derive(Accounts)]
pub struct InitializeAuction<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&payer.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the auction vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + AuctionPool::INIT_SPACE,
        seeds = [AUCTION_SEED, primary_mint.key().as_ref(), counter_mint.key().as_ref()],
        bump,
    )]
    pub auction: Account<'info, AuctionPool>,

    #[account(constraint = primary_mint.key() == engine.xom_mint @ TreasuryError::InvalidMint)]
    pub primary_mint: Account<'info, Mint>,
    pub counter_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [AUCTION_VAULT_SEED, auction.key().as_ref(), primary_mint.key().as_ref()],
        bump,
        token::mint = primary_mint,
        token::authority = engine_authority,
    )]
    pub primary_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        seeds = [AUCTION_VAULT_SEED, auction.key().as_ref(), counter_mint.key().as_ref()],
        bump,
        token::mint = counter_mint,
        token::authority = engine_authority,
    )]
    pub counter_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ConfigureAuction<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&admin.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub auction: Account<'info, AuctionPool>,
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    pub provider: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&provider.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub auction: Account<'info, AuctionPool>,

    #[account(mut, address = auction.primary_vault @ TreasuryError::InvalidDestination)]
    pub primary_vault: Account<'info, TokenAccount>,

    #[account(mut, address = auction.counter_vault @ TreasuryError::InvalidDestination)]
    pub counter_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = provider_primary.mint == auction.primary_mint @ TreasuryError::InvalidMint,
    )]
    pub provider_primary: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = provider_counter.mint == auction.counter_mint @ TreasuryError::InvalidMint,
    )]
    pub provider_counter: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct AuctionSwap<'info> {
    pub user: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the auction vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub auction: Account<'info, AuctionPool>,

    #[account(mut, address = auction.primary_vault @ TreasuryError::InvalidDestination)]
    pub primary_vault: Account<'info, TokenAccount>,

    #[account(mut, address = auction.counter_vault @ TreasuryError::InvalidDestination)]
    pub counter_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_in: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_out: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct FinalizeAuction<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&admin.key(), CAP_POOL_ADMIN)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the auction vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub auction: Account<'info, AuctionPool>,

    #[account(mut, address = auction.primary_vault @ TreasuryError::InvalidDestination)]
    pub primary_vault: Account<'info, TokenAccount>,

    #[account(mut, address = auction.counter_vault @ TreasuryError::InvalidDestination)]
    pub counter_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_primary.owner == engine.protocol_treasury
            @ TreasuryError::InvalidDestination,
        constraint = treasury_primary.mint == auction.primary_mint @ TreasuryError::InvalidMint,
    )]
    pub treasury_primary: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_counter.owner == engine.protocol_treasury
            @ TreasuryError::InvalidDestination,
        constraint = treasury_counter.mint == auction.counter_mint @ TreasuryError::InvalidMint,
    )]
    pub treasury_counter: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn initialize_auction(ctx: Context<InitializeAuction>) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    auction.version = 1;
    auction.bump = ctx.bumps.auction;
    auction.primary_mint = ctx.accounts.primary_mint.key();
    auction.counter_mint = ctx.accounts.counter_mint.key();
    auction.primary_vault = ctx.accounts.primary_vault.key();
    auction.counter_vault = ctx.accounts.counter_vault.key();
    auction.configured = false;
    auction.finalized = false;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn configure_auction(
    ctx: Context<ConfigureAuction>,
    start_time: i64,
    end_time: i64,
    start_weight: u16,
    end_weight: u16,
    price_floor: u128,
    max_purchase_per_tx: u64,
) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    require!(!auction.configured, TreasuryError::AlreadyConfigured);

    let now = Clock::get()?.unix_timestamp;
    require!(start_time > now, TreasuryError::StartTimeInPast);
    require!(end_time > start_time, TreasuryError::InvalidTimeWindow);
    for weight in [start_weight, end_weight] {
        require!(
            weight > 0 && (weight as u64) < BPS_DENOMINATOR,
            TreasuryError::InvalidWeight
        );
    }
    require!(max_purchase_per_tx > 0, TreasuryError::ZeroAmount);

    auction.start_time = start_time;
    auction.end_time = end_time;
    auction.start_weight = start_weight;
    auction.end_weight = end_weight;
    auction.price_floor = price_floor;
    auction.max_purchase_per_tx = max_purchase_per_tx;
    auction.configured = true;

    emit!(AuctionConfigured {
        auction: auction.key(),
        start_time,
        end_time,
        start_weight,
        end_weight,
        price_floor,
        max_purchase_per_tx,
    });
    Ok(())
}

pub fn add_liquidity(
    ctx: Context<AddLiquidity>,
    primary_amount: u64,
    counter_amount: u64,
) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    auction.require_configured()?;
    auction.require_not_finalized()?;
    require!(
        primary_amount > 0 || counter_amount > 0,
        TreasuryError::ZeroAmount
    );

    let now = Clock::get()?.unix_timestamp;
    require!(now < auction.start_time, TreasuryError::LiquidityWindowClosed);

    auction.primary_reserve = auction
        .primary_reserve
        .checked_add(primary_amount)
        .ok_or(TreasuryError::MathOverflow)?;
    auction.counter_reserve = auction
        .counter_reserve
        .checked_add(counter_amount)
        .ok_or(TreasuryError::MathOverflow)?;

    if primary_amount > 0 {
        transfer_from_user_to_vault(
            &ctx.accounts.provider_primary,
            &ctx.accounts.primary_vault,
            &ctx.accounts.provider,
            &ctx.accounts.token_program,
            primary_amount,
        )?;
    }
    if counter_amount > 0 {
        transfer_from_user_to_vault(
            &ctx.accounts.provider_counter,
            &ctx.accounts.counter_vault,
            &ctx.accounts.provider,
            &ctx.accounts.token_program,
            counter_amount,
        )?;
    }

    emit!(AuctionLiquidityAdded {
        auction: ctx.accounts.auction.key(),
        provider: ctx.accounts.provider.key(),
        primary_amount,
        counter_amount,
        primary_reserve: ctx.accounts.auction.primary_reserve,
        counter_reserve: ctx.accounts.auction.counter_reserve,
        timestamp: now,
    });
    Ok(())
}

pub fn auction_swap(
    ctx: Context<AuctionSwap>,
    amount_in: u64,
    min_amount_out: u64,
    primary_in: bool,
) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    auction.require_configured()?;
    auction.require_not_finalized()?;

    let now = Clock::get()?.unix_timestamp;
    auction.require_in_window(now)?;

    require!(amount_in > 0, TreasuryError::ZeroAmount);
    require!(
        amount_in <= auction.max_purchase_per_tx,
        TreasuryError::PurchaseCapExceeded
    );

    let weight = interpolated_weight(
        now,
        auction.start_time,
        auction.end_time,
        auction.start_weight,
        auction.end_weight,
    )?;
    let counter_weight = (BPS_DENOMINATOR - weight as u64) as u16;

    let (reserve_in, reserve_out, w_in, w_out) = if primary_in {
        (
            auction.primary_reserve,
            auction.counter_reserve,
            weight,
            counter_weight,
        )
    } else {
        (
            auction.counter_reserve,
            auction.primary_reserve,
            counter_weight,
            weight,
        )
    };

    let amount_out = weighted_swap_output(reserve_in, reserve_out, amount_in, w_in, w_out)?;
    require!(amount_out >= min_amount_out, TreasuryError::SlippageExceeded);

    let (new_primary, new_counter) = if primary_in {
        (
            auction
                .primary_reserve
                .checked_add(amount_in)
                .ok_or(TreasuryError::MathOverflow)?,
            auction
                .counter_reserve
                .checked_sub(amount_out)
                .ok_or(TreasuryError::InsufficientReserve)?,
        )
    } else {
        (
            auction
                .primary_reserve
                .checked_sub(amount_out)
                .ok_or(TreasuryError::InsufficientReserve)?,
            auction
                .counter_reserve
                .checked_add(amount_in)
                .ok_or(TreasuryError::MathOverflow)?,
        )
    };

    let price_after = spot_price(new_primary, new_counter, weight)?;
    if auction.price_floor > 0 {
        require!(
            price_after >= auction.price_floor,
            TreasuryError::PriceFloorBreached
        );
    }

    auction.primary_reserve = new_primary;
    auction.counter_reserve = new_counter;

    let (vault_in, vault_out) = if primary_in {
        (&ctx.accounts.primary_vault, &ctx.accounts.counter_vault)
    } else {
        (&ctx.accounts.counter_vault, &ctx.accounts.primary_vault)
    };
    require!(
        ctx.accounts.user_token_in.mint == vault_in.mint,
        TreasuryError::InvalidMint
    );
    require!(
        ctx.accounts.user_token_out.mint == vault_out.mint,
        TreasuryError::InvalidMint
    );

    transfer_from_user_to_vault(
        &ctx.accounts.user_token_in,
        vault_in,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_in,
    )?;

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    transfer_from_vault(
        vault_out,
        &ctx.accounts.user_token_out,
        &ctx.accounts.engine_authority.to_account_info(),
        &ctx.accounts.token_program,
        authority_seeds,
        amount_out,
    )?;

    emit!(AuctionSwapExecuted {
        auction: ctx.accounts.auction.key(),
        user: ctx.accounts.user.key(),
        primary_in,
        amount_in,
        amount_out,
        weight_bps: weight,
        spot_price_after: price_after,
        timestamp: now,
    });
    Ok(())
}

pub fn finalize_auction(ctx: Context<FinalizeAuction>) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    auction.require_configured()?;
    auction.require_not_finalized()?;

    let now = Clock::get()?.unix_timestamp;
    require!(now >= auction.end_time, TreasuryError::AuctionNotEnded);

    // Sweep actual vault balances, not the book reserves, so dust from
    // external transfers into the vaults cannot strand.
    let primary_swept = ctx.accounts.primary_vault.amount;
    let counter_swept = ctx.accounts.counter_vault.amount;

    auction.finalized = true;
    auction.primary_reserve = 0;
    auction.counter_reserve = 0;

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    if primary_swept > 0 {
        transfer_from_vault(
            &ctx.accounts.primary_vault,
            &ctx.accounts.treasury_primary,
            &ctx.accounts.engine_authority.to_account_info(),
            &ctx.accounts.token_program,
            authority_seeds,
            primary_swept,
        )?;
    }
    if counter_swept > 0 {
        transfer_from_vault(
            &ctx.accounts.counter_vault,
            &ctx.accounts.treasury_counter,
            &ctx.accounts.engine_authority.to_account_info(),
            &ctx.accounts.token_program,
            authority_seeds,
            counter_swept,
        )?;
    }

    emit!(AuctionFinalized {
        auction: ctx.accounts.auction.key(),
        primary_swept,
        counter_swept,
        timestamp: now,
    });
    Ok(())
}
