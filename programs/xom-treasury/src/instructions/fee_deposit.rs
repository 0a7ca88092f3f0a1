//! Fee deposits into the per-token vaults.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CAP_DEPOSITOR, ENGINE_SEED, FEE_VAULT_SEED};
use crate::error::TreasuryError;
use crate::events::FeesDeposited;
use crate::state::{EngineConfig, FeeVault, TokenFeeState};
use crate::utils::transfer_from_user_to_vault;

#[derive(Accounts)]
pub struct DepositFees<'info> {
    pub depositor: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&depositor.key(), CAP_DEPOSITOR)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

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
        constraint = depositor_token.mint == token_state.mint @ TreasuryError::InvalidMint,
    )]
    pub depositor_token: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit_fees(ctx: Context<DepositFees>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let state = &mut ctx.accounts.token_state;
    state.undistributed = state
        .undistributed
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;
    state.total_deposited = state
        .total_deposited
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;

    transfer_from_user_to_vault(
        &ctx.accounts.depositor_token,
        &ctx.accounts.vault,
        &ctx.accounts.depositor,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(FeesDeposited {
        mint: ctx.accounts.token_state.mint,
        depositor: ctx.accounts.depositor.key(),
        amount,
        undistributed: ctx.accounts.token_state.undistributed,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
