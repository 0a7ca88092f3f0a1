//! Engine initialization: creates the config account and the authority PDA
//! that owns every vault the engine controls.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::{ENGINE_AUTHORITY_SEED, ENGINE_SEED, MAX_CAPABILITY_ENTRIES};
use crate::events::EngineInitialized;
use crate::state::{CapabilityEntry, EngineConfig};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + EngineConfig::INIT_SPACE,
        seeds = [ENGINE_SEED],
        bump,
    )]
    pub engine: Account<'info, EngineConfig>,

    /// CHECK: PDA owning all engine vaults; carries no data
    #[account(seeds = [ENGINE_AUTHORITY_SEED], bump)]
    pub engine_authority: UncheckedAccount<'info>,

    /// Reward token mint
    pub xom_mint: Account<'info, Mint>,

    /// CHECK: wallet receiving the protocol share of distributions
    pub protocol_treasury: UncheckedAccount<'info>,

    /// CHECK: wallet receiving the staking share of distributions
    pub staking_pool: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_engine(ctx: Context<Initialize>) -> Result<()> {
    let engine = &mut ctx.accounts.engine;
    engine.version = 1;
    engine.bump = ctx.bumps.engine;
    engine.authority_bump = ctx.bumps.engine_authority;
    engine.admin = ctx.accounts.payer.key();
    engine.xom_mint = ctx.accounts.xom_mint.key();
    engine.protocol_treasury = ctx.accounts.protocol_treasury.key();
    engine.staking_pool = ctx.accounts.staking_pool.key();
    engine.ossified = false;
    engine.capabilities = [CapabilityEntry::default(); MAX_CAPABILITY_ENTRIES];

    emit!(EngineInitialized {
        admin: engine.admin,
        xom_mint: engine.xom_mint,
        protocol_treasury: engine.protocol_treasury,
        staking_pool: engine.staking_pool,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
