//! Liquidity-mining state: the emitter, per-pool accumulators, and per-staker
//! positions.
//!
//! Reward accrual uses the per-share accumulator pattern: each pool tracks
//! `acc_reward_per_share` (scaled by `ACC_PRECISION`) and every position
//! carries a `reward_debt` snapshot, so settling a staker is O(1) regardless
//! of staker count.

use anchor_lang::prelude::*;

use crate::constants::MAX_VESTING_SLOTS;
use crate::state::VestingSchedule;

#[account]
#[derive(InitSpace)]
pub struct MiningEmitter {
    pub version: u8,
    pub bump: u8,

    /// Engine-owned token account funding mining payouts
    pub reward_vault: Pubkey,
    /// Payable XOM balance; claims fail hard when it cannot cover a payout
    pub reward_reserve: u64,

    pub pool_count: u32,
}

#[account]
#[derive(InitSpace)]
pub struct MiningPool {
    pub version: u8,
    pub bump: u8,

    pub lp_mint: Pubkey,
    /// Engine-owned token account holding staked LP tokens
    pub lp_vault: Pubkey,
    #[max_len(32)]
    pub name: String,

    pub reward_per_second: u64,
    pub total_staked: u64,
    pub last_update_time: i64,
    /// Monotone non-decreasing, scaled by ACC_PRECISION
    pub acc_reward_per_share: u128,

    pub active: bool,

    /// Share of each claim paid immediately, rest vests linearly
    pub immediate_bps: u16,
    pub vesting_period: i64,
}

/// Per-staker, per-pool position
#[account]
#[derive(InitSpace)]
pub struct StakePosition {
    pub version: u8,
    pub bump: u8,

    pub owner: Pubkey,
    pub pool: Pubkey,

    pub amount_staked: u64,
    /// `amount_staked * acc_reward_per_share / ACC_PRECISION` at last settle
    pub reward_debt: u128,
    /// Settled but unclaimed reward carried between interactions
    pub unclaimed: u64,

    pub schedules: [VestingSchedule; MAX_VESTING_SLOTS],
}
