//! Bond issuance state: the issuer, per-asset terms, and user vesting books.

use anchor_lang::prelude::*;

use crate::constants::MAX_VESTING_SLOTS;

#[account]
#[derive(InitSpace)]
pub struct BondIssuer {
    pub version: u8,
    pub bump: u8,

    /// XOM reference price in quote units, 1e18 fixed point
    pub reference_price: u128,
    pub last_price_update: i64,

    /// Engine-owned token account funding bond payouts
    pub reward_vault: Pubkey,
    /// Payable XOM balance; bonds fail hard when it cannot cover a payout
    pub reward_reserve: u64,

    /// Share of every bond paid immediately, rest vests linearly
    pub immediate_bps: u16,

    pub asset_count: u32,
}

/// Per-asset bond terms and the rolling daily window
#[account]
#[derive(InitSpace)]
pub struct BondAsset {
    pub version: u8,
    pub bump: u8,

    pub mint: Pubkey,
    /// Engine-owned token account accumulating bonded assets
    pub vault: Pubkey,
    pub decimals: u8,

    pub enabled: bool,
    pub discount_bps: u16,
    pub vesting_period: i64,

    pub daily_capacity: u64,
    pub daily_remaining: u64,
    /// UTC day (unix time / 86400) the daily window was last reset for
    pub day_index: i64,
}

/// One linear vesting schedule. `total == 0` marks a free slot.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Default, Debug)]
pub struct VestingSchedule {
    pub total: u64,
    pub released: u64,
    pub start_time: i64,
    pub end_time: i64,
}

/// Per-user vesting book for bond payouts
#[account]
#[derive(InitSpace)]
pub struct VestingAccount {
    pub version: u8,
    pub bump: u8,
    pub owner: Pubkey,
    pub schedules: [VestingSchedule; MAX_VESTING_SLOTS],
}
