//! Liquidity-bootstrapping auction pool state.
//!
//! Holds two reserves and a weight schedule; pricing is a pure function of
//! `(now, reserves, weights)` computed in `logic::weight`. Reserves are
//! mutated only by `add_liquidity`, `auction_swap`, and `finalize_auction`.

use anchor_lang::prelude::*;

use crate::error::TreasuryError;

#[account]
#[derive(InitSpace)]
pub struct AuctionPool {
    pub version: u8,
    pub bump: u8,

    /// Primary (distributed) asset mint - XOM
    pub primary_mint: Pubkey,
    /// Counter asset mint (what buyers pay with)
    pub counter_mint: Pubkey,
    pub primary_vault: Pubkey,
    pub counter_vault: Pubkey,

    pub primary_reserve: u64,
    pub counter_reserve: u64,

    /// Auction window; swaps permitted in `[start_time, end_time)`
    pub start_time: i64,
    pub end_time: i64,

    /// Primary-asset weight in basis points at window start / end
    pub start_weight: u16,
    pub end_weight: u16,

    /// Minimum acceptable post-trade spot price, counter per primary, 1e18
    pub price_floor: u128,

    /// Per-swap `amount_in` cap (anti-concentration)
    pub max_purchase_per_tx: u64,

    pub configured: bool,
    pub finalized: bool,
}

impl AuctionPool {
    pub fn require_configured(&self) -> Result<()> {
        require!(self.configured, TreasuryError::NotConfigured);
        Ok(())
    }

    pub fn require_not_finalized(&self) -> Result<()> {
        require!(!self.finalized, TreasuryError::AuctionFinalized);
        Ok(())
    }

    /// Swap window check: `[start_time, end_time)`
    pub fn require_in_window(&self, now: i64) -> Result<()> {
        require!(now >= self.start_time, TreasuryError::AuctionNotStarted);
        require!(now < self.end_time, TreasuryError::AuctionEnded);
        Ok(())
    }
}
