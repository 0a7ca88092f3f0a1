//! Fee vault state: one global vault account plus a per-token fee ledger.
//!
//! `TokenFeeState` keeps the conservation books for a single mint:
//! `undistributed + pending_bridge + pushed-out shares <= total_deposited`
//! holds at all times because every mutation moves whole amounts between
//! these buckets before any outward transfer happens.

use anchor_lang::prelude::*;

/// How the community share leaves the vault for a given token
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeMode {
    /// Forward the collected token as-is
    InKind,
    /// Swap to the reference (reward) token through the adapter first
    SwapToReference,
}

#[account]
#[derive(InitSpace)]
pub struct FeeVault {
    pub version: u8,
    pub bump: u8,

    /// Circuit breaker blocking deposit and distribute
    pub paused: bool,

    /// Number of registered fee tokens
    pub token_count: u32,
}

/// Per-token fee accounting
#[account]
#[derive(InitSpace)]
pub struct TokenFeeState {
    pub version: u8,
    pub bump: u8,

    pub mint: Pubkey,
    /// Engine-owned token account holding collected fees for this mint
    pub vault: Pubkey,

    pub bridge_mode: BridgeMode,

    /// Collected but not yet split
    pub undistributed: u64,
    /// Community share awaiting outward bridge transfer
    pub pending_bridge: u64,

    pub total_deposited: u64,
    pub total_distributed: u64,
    pub total_bridged: u64,
}
