//! Capability grants and revocations, plus the one-way ossification switch.

use anchor_lang::prelude::*;

use crate::constants::ENGINE_SEED;
use crate::error::TreasuryError;
use crate::events::{CapabilityGranted, CapabilityRevoked, EngineOssified};
use crate::state::EngineConfig;

#[derive(Accounts)]
pub struct ManageCapability<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_SEED],
        bump = engine.bump,
        constraint = engine.admin == admin.key() @ TreasuryError::Unauthorized,
    )]
    pub engine: Account<'info, EngineConfig>,
}

pub fn grant(ctx: Context<ManageCapability>, account: Pubkey, capability: u32) -> Result<()> {
    ctx.accounts.engine.grant(account, capability)?;

    emit!(CapabilityGranted {
        account,
        capability,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn revoke(ctx: Context<ManageCapability>, account: Pubkey, capability: u32) -> Result<()> {
    ctx.accounts.engine.revoke(&account, capability);

    emit!(CapabilityRevoked {
        account,
        capability,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Permanently freeze administrative reconfiguration. One way only.
pub fn ossify(ctx: Context<ManageCapability>) -> Result<()> {
    let engine = &mut ctx.accounts.engine;
    engine.require_not_ossified()?;
    engine.ossified = true;

    emit!(EngineOssified {
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
