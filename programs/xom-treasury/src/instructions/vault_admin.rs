//! Fee vault administration: initialization, token registration, bridge-mode
//! changes, and the pause circuit breaker.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    CAP_PAUSER, ENGINE_AUTHORITY_SEED, ENGINE_SEED, FEE_TOKEN_VAULT_SEED, FEE_VAULT_SEED,
    TOKEN_FEE_SEED,
};
use crate::error::TreasuryError;
use crate::events::{BridgeModeChanged, FeeTokenRegistered, VaultPaused, VaultUnpaused};
use crate::state::{BridgeMode, EngineConfig, FeeVault, TokenFeeState};

#[derive(Accounts)]
pub struct InitializeFeeVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == payer.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(
        init,
        payer = payer,
        space = 8 + FeeVault::INIT_SPACE,
        seeds = [FEE_VAULT_SEED],
        bump,
    )]
    pub fee_vault: Account<'info, FeeVault>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RegisterFeeToken<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == payer.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning the fee token vaults
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump = engine.authority_bump)]
    pub engine_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [FEE_VAULT_SEED], bump = fee_vault.bump)]
    pub fee_vault: Account<'info, FeeVault>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = 8 + TokenFeeState::INIT_SPACE,
        seeds = [TOKEN_FEE_SEED, mint.key().as_ref()],
        bump,
    )]
    pub token_state: Account<'info, TokenFeeState>,

    #[account(
        init,
        payer = payer,
        seeds = [FEE_TOKEN_VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = engine_authority,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetBridgeMode<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == admin.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut)]
    pub token_state: Account<'info, TokenFeeState>,
}

#[derive(Accounts)]
pub struct SetVaultPause<'info> {
    pub pauser: Signer<'info>,

    #[account(
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.has_capability(&pauser.key(), CAP_PAUSER)
            @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,

    #[account(mut, seeds = [FEE_VAULT_SEED], bump = fee_vault.bump)]
    pub fee_vault: Account<'info, FeeVault>,
}

pub fn initialize_fee_vault(ctx: Context<InitializeFeeVault>) -> Result<()> {
    let vault = &mut ctx.accounts.fee_vault;
    vault.version = 1;
    vault.bump = ctx.bumps.fee_vault;
    vault.paused = false;
    vault.token_count = 0;
    Ok(())
}

pub fn register_fee_token(ctx: Context<RegisterFeeToken>, bridge_mode: BridgeMode) -> Result<()> {
    let state = &mut ctx.accounts.token_state;
    state.version = 1;
    state.bump = ctx.bumps.token_state;
    state.mint = ctx.accounts.mint.key();
    state.vault = ctx.accounts.vault.key();
    state.bridge_mode = bridge_mode;

    ctx.accounts.fee_vault.token_count = ctx
        .accounts
        .fee_vault
        .token_count
        .checked_add(1)
        .ok_or(TreasuryError::MathOverflow)?;

    emit!(FeeTokenRegistered {
        mint: state.mint,
        bridge_mode,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_bridge_mode(ctx: Context<SetBridgeMode>, mode: BridgeMode) -> Result<()> {
    ctx.accounts.engine.require_not_ossified()?;

    let state = &mut ctx.accounts.token_state;
    state.bridge_mode = mode;

    emit!(BridgeModeChanged {
        mint: state.mint,
        mode,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn pause(ctx: Context<SetVaultPause>) -> Result<()> {
    let vault = &mut ctx.accounts.fee_vault;
    require!(!vault.paused, TreasuryError::Paused);
    vault.paused = true;

    emit!(VaultPaused {
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn unpause(ctx: Context<SetVaultPause>) -> Result<()> {
    let vault = &mut ctx.accounts.fee_vault;
    require!(vault.paused, TreasuryError::NotPaused);
    vault.paused = false;

    emit!(VaultUnpaused {
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
