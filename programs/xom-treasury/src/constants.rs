//! Global constants for the XOM treasury engine
//!
//! Centralized constants for PDA seeds, fee-split ratios, and math precision

// PDA seed constants
pub const ENGINE_SEED: &[u8] = b"engine";
pub const ENGINE_AUTHORITY_SEED: &[u8] = b"engine_authority";
pub const AUCTION_SEED: &[u8] = b"auction";
pub const AUCTION_VAULT_SEED: &[u8] = b"auction_vault";
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault";
pub const TOKEN_FEE_SEED: &[u8] = b"token_fee";
pub const FEE_TOKEN_VAULT_SEED: &[u8] = b"fee_token_vault";
pub const BOND_ISSUER_SEED: &[u8] = b"bond_issuer";
pub const BOND_ASSET_SEED: &[u8] = b"bond_asset";
pub const BOND_ASSET_VAULT_SEED: &[u8] = b"bond_asset_vault";
pub const BOND_RESERVE_SEED: &[u8] = b"bond_reserve";
pub const BOND_VESTING_SEED: &[u8] = b"bond_vesting";
pub const MINING_EMITTER_SEED: &[u8] = b"mining_emitter";
pub const MINING_RESERVE_SEED: &[u8] = b"mining_reserve";
pub const MINING_POOL_SEED: &[u8] = b"mining_pool";
pub const MINING_POOL_VAULT_SEED: &[u8] = b"mining_pool_vault";
pub const STAKE_POSITION_SEED: &[u8] = b"stake_position";

// Basis point constants
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fixed fee-split shares. These must sum to exactly BPS_DENOMINATOR.
pub const COMMUNITY_BPS: u64 = 7_000;
pub const STAKING_BPS: u64 = 2_000;
pub const PROTOCOL_BPS: u64 = 1_000;

// Math constants
/// 18-decimal fixed-point scale used for all price quotations
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Per-share reward accumulator precision
pub const ACC_PRECISION: u128 = 1_000_000_000_000;

/// Q64.64 fixed-point one
pub const Q64: u128 = 1u128 << 64;

// Time constants
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Minimum delay between reference-price updates on the bond issuer
pub const MIN_PRICE_UPDATE_INTERVAL: i64 = 3_600;

// Capability bits
pub const CAP_DEPOSITOR: u32 = 1 << 0;
pub const CAP_BRIDGE_OPERATOR: u32 = 1 << 1;
pub const CAP_POOL_ADMIN: u32 = 1 << 2;
pub const CAP_PAUSER: u32 = 1 << 3;

/// Capability table capacity
pub const MAX_CAPABILITY_ENTRIES: usize = 16;

/// Active vesting schedules per account
pub const MAX_VESTING_SLOTS: usize = 16;

/// Internal normalization target for bond pricing (stablecoin vs reward
/// token decimal mismatch is resolved at this precision)
pub const NORMALIZED_DECIMALS: u8 = 18;
