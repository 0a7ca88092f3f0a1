//! Event definitions

use anchor_lang::prelude::*;

use crate::state::BridgeMode;

// ============================================================================
// Engine / capability events
// ============================================================================

#[event]
pub struct EngineInitialized {
    pub admin: Pubkey,
    pub xom_mint: Pubkey,
    pub protocol_treasury: Pubkey,
    pub staking_pool: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CapabilityGranted {
    pub account: Pubkey,
    pub capability: u32,
    pub timestamp: i64,
}

#[event]
pub struct CapabilityRevoked {
    pub account: Pubkey,
    pub capability: u32,
    pub timestamp: i64,
}

#[event]
pub struct EngineOssified {
    pub timestamp: i64,
}

// ============================================================================
// Auction events
// ============================================================================

#[event]
pub struct AuctionConfigured {
    pub auction: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub start_weight: u16,
    pub end_weight: u16,
    pub price_floor: u128,
    pub max_purchase_per_tx: u64,
}

#[event]
pub struct AuctionLiquidityAdded {
    pub auction: Pubkey,
    pub provider: Pubkey,
    pub primary_amount: u64,
    pub counter_amount: u64,
    pub primary_reserve: u64,
    pub counter_reserve: u64,
    pub timestamp: i64,
}

/// Emitted on every auction swap with the post-trade spot price
#[event]
pub struct AuctionSwapExecuted {
    pub auction: Pubkey,
    pub user: Pubkey,
    pub primary_in: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub weight_bps: u16,
    pub spot_price_after: u128,
    pub timestamp: i64,
}

#[event]
pub struct AuctionFinalized {
    pub auction: Pubkey,
    pub primary_swept: u64,
    pub counter_swept: u64,
    pub timestamp: i64,
}

// ============================================================================
// Fee vault events
// ============================================================================

#[event]
pub struct FeeTokenRegistered {
    pub mint: Pubkey,
    pub bridge_mode: BridgeMode,
    pub timestamp: i64,
}

#[event]
pub struct FeesDeposited {
    pub mint: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub undistributed: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesDistributed {
    pub mint: Pubkey,
    pub total: u64,
    pub community_share: u64,
    pub staking_share: u64,
    pub protocol_share: u64,
    pub pending_bridge: u64,
    pub timestamp: i64,
}

#[event]
pub struct BridgedToTreasury {
    pub mint: Pubkey,
    pub amount: u64,
    pub destination: Pubkey,
    pub total_bridged: u64,
    pub timestamp: i64,
}

#[event]
pub struct SwappedAndBridged {
    pub mint: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub destination: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BridgeModeChanged {
    pub mint: Pubkey,
    pub mode: BridgeMode,
    pub timestamp: i64,
}

#[event]
pub struct VaultPaused {
    pub timestamp: i64,
}

#[event]
pub struct VaultUnpaused {
    pub timestamp: i64,
}

// ============================================================================
// Bond events
// ============================================================================

#[event]
pub struct BondAssetAdded {
    pub mint: Pubkey,
    pub decimals: u8,
    pub discount_bps: u16,
    pub vesting_period: i64,
    pub daily_capacity: u64,
    pub timestamp: i64,
}

#[event]
pub struct BondTermsUpdated {
    pub mint: Pubkey,
    pub enabled: bool,
    pub discount_bps: u16,
    pub vesting_period: i64,
    pub daily_capacity: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReferencePriceSet {
    pub price: u128,
    pub timestamp: i64,
}

#[event]
pub struct BondReserveDeposited {
    pub amount: u64,
    pub reserve: u64,
    pub timestamp: i64,
}

#[event]
pub struct Bonded {
    pub asset: Pubkey,
    pub user: Pubkey,
    pub amount_in: u64,
    pub reward_out: u64,
    pub immediate: u64,
    pub vested: u64,
    pub daily_remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct BondVestedClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

// ============================================================================
// Mining events
// ============================================================================

#[event]
pub struct MiningPoolAdded {
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub reward_per_second: u64,
    pub immediate_bps: u16,
    pub vesting_period: i64,
    pub timestamp: i64,
}

#[event]
pub struct RewardRateSet {
    pub pool: Pubkey,
    pub reward_per_second: u64,
    pub timestamp: i64,
}

#[event]
pub struct VestingParamsSet {
    pub pool: Pubkey,
    pub immediate_bps: u16,
    pub vesting_period: i64,
    pub timestamp: i64,
}

#[event]
pub struct PoolActiveSet {
    pub pool: Pubkey,
    pub active: bool,
    pub timestamp: i64,
}

#[event]
pub struct MiningRewardsDeposited {
    pub amount: u64,
    pub reserve: u64,
    pub timestamp: i64,
}

#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardsClaimed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub immediate: u64,
    pub vested: u64,
    pub timestamp: i64,
}

#[event]
pub struct MiningVestedClaimed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
