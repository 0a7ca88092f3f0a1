//! Permissionless fee distribution: splits everything undistributed for one
//! token into the community / staking / protocol shares.
//!
//! The staking and protocol shares are pushed out immediately; the community
//! share only moves into the pending-bridge ledger and leaves later through
//! the bridge instructions.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{ENGINE_AUTHORITY_SEED, ENGINE_SEED, FEE_VAULT_SEED};
use crate::error::TreasuryError;
use crate::events::FeesDistributed;
use crate::logic::split_fees;
use crate::state::{EngineConfig, FeeVault, TokenFeeState};
use crate::utils::transfer_from_vault;

#[derive(Accounts)]
pub struct Distribute<'info> {
    /// Anyone may crank a distribution
    pub cranker: Signer<'info>,

    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the fee token vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(
        seeds = [FEE_VAULT_SEED],
        bump = fee_vault.bump,
        constraint = !fee_vault.paused @ TreasuryError::Paused,
    )]
    pub fee_vault: Account<'info, FeeVault>,

    #[account(mut)]
    pub token_state: Account<'info, TokenFeeState>,

    #[account(mut, address = token_state.vault @ TreasuryError::InvalidDestination)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = staking_destination.owner == engine.staking_pool
            @ TreasuryError::InvalidDestination,
        constraint = staking_destination.mint == token_state.mint @ TreasuryError::InvalidMint,
    )]
    pub staking_destination: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = protocol_destination.owner == engine.protocol_treasury
            @ TreasuryError::InvalidDestination,
        constraint = protocol_destination.mint == token_state.mint @ TreasuryError::InvalidMint,
    )]
    pub protocol_destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn distribute(ctx: Context<Distribute>) -> Result<()> {
    let state = &mut ctx.accounts.token_state;

    let total = state.undistributed;
    require!(total > 0, TreasuryError::NothingToDistribute);

    let split = split_fees(total)?;

    state.undistributed = 0;
    state.pending_bridge = state
        .pending_bridge
        .checked_add(split.community)
        .ok_or(TreasuryError::MathOverflow)?;
    state.total_distributed = state
        .total_distributed
        .checked_add(total)
        .ok_or(TreasuryError::MathOverflow)?;

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    if split.staking > 0 {
        transfer_from_vault(
            &ctx.accounts.vault,
            &ctx.accounts.staking_destination,
            &ctx.accounts.engine_authority.to_account_info(),
            &ctx.accounts.token_program,
            authority_seeds,
            split.staking,
        )?;
    }
    if split.protocol > 0 {
        transfer_from_vault(
            &ctx.accounts.vault,
            &ctx.accounts.protocol_destination,
            &ctx.accounts.engine_authority.to_account_info(),
            &ctx.accounts.token_program,
            authority_seeds,
            split.protocol,
        )?;
    }

    emit!(FeesDistributed {
        mint: ctx.accounts.token_state.mint,
        total,
        community_share: split.community,
        staking_share: split.staking,
        protocol_share: split.protocol,
        pending_bridge: ctx.accounts.token_state.pending_bridge,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
