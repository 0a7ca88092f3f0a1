//! Outward movement of the community share: in-kind transfer to a treasury
//! destination, or a swap to the reward token through an opaque adapter
//! program.
//!
//! The adapter contract is deliberately thin: the engine forwards the
//! remaining accounts untouched, signs as the vault authority, and verifies
//! the fill by balance delta on the destination afterwards. Anything the
//! adapter does in between is its own business.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CAP_BRIDGE_OPERATOR, ENGINE_AUTHORITY_SEED, ENGINE_SEED};
use crate::error::TreasuryError;
use crate::events::{BridgedToTreasury, SwappedAndBridged};
use crate::state::{BridgeMode, EngineConfig, TokenFeeState};
use crate::utils::transfer_from_vault;

/// Argument block handed to the swap adapter, borsh encoded
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct AdapterSwapArgs {
    pub token_in: Pubkey,
    pub amount_in: u64,
    pub min_out: u64,
}

#[derive(Accounts)]
pub struct BridgeToTreasury<'info> {
    pub operator: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&operator.key(), CAP_BRIDGE_OPERATOR)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the fee token vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub token_state: Account<'info, TokenFeeState>,

    #[account(mut, address = token_state.vault @ TreasuryError::InvalidDestination)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == token_state.mint @ TreasuryError::InvalidMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SwapAndBridge<'info> {
    pub operator: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&operator.key(), CAP_BRIDGE_OPERATOR)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the fee token vaults; signs the adapter CPI
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub token_state: Account<'info, TokenFeeState>,

    #[account(mut, address = token_state.vault @ TreasuryError::InvalidDestination)]
    pub vault: Account<'info, TokenAccount>,

    /// Reward-token account receiving the swap proceeds
    #[account(
        mut,
        constraint = destination.mint == engine.xom_mint @ TreasuryError::InvalidMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    /// CHECK: opaque swap program, verified executable only
    #[account(constraint = adapter_program.executable @ TreasuryError::InvalidDestination)]
    pub adapter_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn bridge_to_treasury(ctx: Context<BridgeToTreasury>, amount: u64) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let state = &mut ctx.accounts.token_state;
    require!(
        state.bridge_mode == BridgeMode::InKind,
        TreasuryError::WrongBridgeMode
    );
    require!(
        amount <= state.pending_bridge,
        TreasuryError::InsufficientPendingBridge
    );

    state.pending_bridge -= amount;
    state.total_bridged = state
        .total_bridged
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;

    let authority_seeds: &[&[&[u8]]] = &[&[
        ENGINE_AUTHORITY_SEED,
        &[ctx.accounts.engine.authority_bump],
    ]];
    transfer_from_vault(
        &ctx.accounts.vault,
        &ctx.accounts.destination,
        &ctx.accounts.engine_authority.to_account_info(),
        &ctx.accounts.token_program,
        authority_seeds,
        amount,
    )?;

    emit!(BridgedToTreasury {
        mint: ctx.accounts.token_state.mint,
        amount,
        destination: ctx.accounts.destination.key(),
        total_bridged: ctx.accounts.token_state.total_bridged,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn swap_and_bridge<'info>(
    ctx: Context<'_, '_, 'info, 'info, SwapAndBridge<'info>>,
    amount: u64,
    min_out: u64,
) -> Result<()> {
    require!(amount > 0, TreasuryError::ZeroAmount);

    let state = &mut ctx.accounts.token_state;
    require!(
        state.bridge_mode == BridgeMode::SwapToReference,
        TreasuryError::WrongBridgeMode
    );
    require!(
        amount <= state.pending_bridge,
        TreasuryError::InsufficientPendingBridge
    );

    state.pending_bridge -= amount;
    state.total_bridged = state
        .total_bridged
        .checked_add(amount)
        .ok_or(TreasuryError::MathOverflow)?;

    let balance_before = ctx.accounts.destination.amount;

    let authority_key = ctx.accounts.engine_authority.key();
    let metas = ctx
        .remaining_accounts
        .iter()
        .map(|account| AccountMeta {
            pubkey: *account.key,
            is_signer: account.is_signer || *account.key == authority_key,
            is_writable: account.is_writable,
        })
        .collect::<Vec<_>>();
    let args = AdapterSwapArgs {
        token_in: state.mint,
        amount_in: amount,
        min_out,
    };
    let instruction = Instruction {
        program_id: ctx.accounts.adapter_program.key(),
        accounts: metas,
        data: args.try_to_vec()?,
    };

    let mut infos = ctx.remaining_accounts.to_vec();
    infos.push(ctx.accounts.adapter_program.to_account_info());
    invoke_signed(
        &instruction,
        &infos,
        &[&[
            ENGINE_AUTHORITY_SEED,
            &[ctx.accounts.engine.authority_bump],
        ]],
    )?;

    ctx.accounts.destination.reload()?;
    let received = ctx
        .accounts
        .destination
        .amount
        .checked_sub(balance_before)
        .ok_or(TreasuryError::AdapterFillShortfall)?;
    require!(received >= min_out, TreasuryError::AdapterFillShortfall);

    emit!(SwappedAndBridged {
        mint: ctx.accounts.token_state.mint,
        amount_in: amount,
        amount_out: received,
        destination: ctx.accounts.destination.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
