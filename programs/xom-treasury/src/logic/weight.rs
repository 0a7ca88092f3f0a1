//! Auction weight interpolation and weighted-pool pricing.
//!
//! The pool prices against time-interpolated weights: at time `t` the primary
//! asset carries `weight(t)` basis points and the counter asset the
//! complement. The swap curve is the weighted constant product
//! `r_in^w_in * r_out^w_out = k`, solved for exact-in via
//!
//! ```text
//! amount_out = r_out * (1 - (r_in / (r_in + amount_in))^(w_in / w_out))
//! ```
//!
//! computed in Q64.64. Every rounding decision biases against the trader:
//! the base ratio rounds up, the power rounds up, and the final output
//! rounds down.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, PRICE_SCALE, Q64};
use crate::error::TreasuryError;
use crate::utils::{mul_div_u128, pow_q64, Rounding};

/// Interpolated primary-asset weight at `now`, clamped to the window.
///
/// The division rounds the weight toward the higher value (toward +inf on
/// the signed delta), which biases the quoted primary price upward in both
/// auction directions.
pub fn interpolated_weight(
    now: i64,
    start_time: i64,
    end_time: i64,
    start_weight: u16,
    end_weight: u16,
) -> Result<u16> {
    require!(end_time > start_time, TreasuryError::InvalidTimeWindow);
    require_valid_weight(start_weight)?;
    require_valid_weight(end_weight)?;

    let t = now.clamp(start_time, end_time);
    let elapsed = (t - start_time) as i128;
    let duration = (end_time - start_time) as i128;

    let delta = (end_weight as i128 - start_weight as i128)
        .checked_mul(elapsed)
        .ok_or(TreasuryError::MathOverflow)?;
    // Rust integer division truncates toward zero, which already rounds
    // negative deltas toward +inf; bump positive remainders explicitly.
    let mut step = delta / duration;
    if delta % duration != 0 && delta > 0 {
        step += 1;
    }

    let weight = start_weight as i128 + step;
    require!(
        weight > 0 && weight < BPS_DENOMINATOR as i128,
        TreasuryError::InvalidWeight
    );
    Ok(weight as u16)
}

/// Spot price of the primary asset in counter units, 1e18 fixed point:
/// `(counter / (10000 - w)) / (primary / w)`
pub fn spot_price(primary_reserve: u64, counter_reserve: u64, weight_bps: u16) -> Result<u128> {
    require_valid_weight(weight_bps)?;
    require!(primary_reserve > 0, TreasuryError::DivisionByZero);

    let counter_weight = BPS_DENOMINATOR - weight_bps as u64;
    let numerator = (counter_reserve as u128)
        .checked_mul(weight_bps as u128)
        .ok_or(TreasuryError::MathOverflow)?;
    let denominator = (primary_reserve as u128)
        .checked_mul(counter_weight as u128)
        .ok_or(TreasuryError::MathOverflow)?;
    mul_div_u128(numerator, PRICE_SCALE, denominator, Rounding::Down)
}

/// Exact-in output of the weighted constant-product curve.
///
/// `w_in_bps` / `w_out_bps` are the weights of the input and output side at
/// the time of the trade. Output is strictly less than `reserve_out`.
pub fn weighted_swap_output(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    w_in_bps: u16,
    w_out_bps: u16,
) -> Result<u64> {
    require!(amount_in > 0, TreasuryError::ZeroAmount);
    require!(
        reserve_in > 0 && reserve_out > 0,
        TreasuryError::DivisionByZero
    );
    require_valid_weight(w_in_bps)?;
    require_valid_weight(w_out_bps)?;

    let new_reserve_in = (reserve_in as u128)
        .checked_add(amount_in as u128)
        .ok_or(TreasuryError::MathOverflow)?;

    // base = r_in / (r_in + amount_in), rounded up so the power and thus the
    // retained share of reserve_out are never under-stated
    let base = mul_div_u128(reserve_in as u128, Q64, new_reserve_in, Rounding::Up)?;
    // exponent = w_in / w_out, rounded down (a smaller exponent raises the
    // power for bases below one, again shrinking the output)
    let exp = mul_div_u128(w_in_bps as u128, Q64, w_out_bps as u128, Rounding::Down)?;

    let retained = pow_q64(base, exp)?;
    let released = Q64
        .checked_sub(retained)
        .ok_or(TreasuryError::MathOverflow)?;

    let out = mul_div_u128(reserve_out as u128, released, Q64, Rounding::Down)?;
    let out = u64::try_from(out).map_err(|_| TreasuryError::MathOverflow)?;
    require!(out < reserve_out, TreasuryError::InsufficientReserve);
    Ok(out)
}

fn require_valid_weight(weight_bps: u16) -> Result<()> {
    require!(
        weight_bps > 0 && (weight_bps as u64) < BPS_DENOMINATOR,
        TreasuryError::InvalidWeight
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn weight_hits_endpoints_exactly() {
        let (t0, t1) = (1_000_000, 1_000_000 + 7 * DAY);
        assert_eq!(interpolated_weight(t0, t0, t1, 9000, 3000).unwrap(), 9000);
        assert_eq!(interpolated_weight(t1, t0, t1, 9000, 3000).unwrap(), 3000);
        // clamped outside the window
        assert_eq!(interpolated_weight(t0 - 50, t0, t1, 9000, 3000).unwrap(), 9000);
        assert_eq!(interpolated_weight(t1 + 50, t0, t1, 9000, 3000).unwrap(), 3000);
    }

    #[test]
    fn weight_midpoint_decreasing() {
        let (t0, t1) = (0, 100);
        assert_eq!(interpolated_weight(50, t0, t1, 9000, 3000).unwrap(), 6000);
    }

    #[test]
    fn weight_rounds_toward_higher_value() {
        // decreasing: 9000 -> 3000 over 7 steps; exact value at t=1 is
        // 9000 - 6000/7 = 8142.86..., truncation toward zero keeps 8143
        let w = interpolated_weight(1, 0, 7, 9000, 3000).unwrap();
        assert_eq!(w, 8143);
        // increasing: 3000 -> 9000 over 7 steps; exact value at t=1 is
        // 3857.14..., rounded up to 3858
        let w = interpolated_weight(1, 0, 7, 3000, 9000).unwrap();
        assert_eq!(w, 3858);
    }

    #[test]
    fn weight_rejects_bad_windows_and_weights() {
        assert!(interpolated_weight(0, 10, 10, 9000, 3000).is_err());
        assert!(interpolated_weight(0, 0, 10, 0, 3000).is_err());
        assert!(interpolated_weight(0, 0, 10, 10_000, 3000).is_err());
    }

    #[test]
    fn spot_price_balanced_pool_equal_weights() {
        // equal reserves, equal weights: price is exactly 1.0
        let p = spot_price(1_000_000, 1_000_000, 5000).unwrap();
        assert_eq!(p, PRICE_SCALE);
    }

    #[test]
    fn spot_price_weight_skew() {
        // 90/10 weighting over equal reserves: price = 9.0
        let p = spot_price(1_000, 1_000, 9000).unwrap();
        assert_eq!(p, 9 * PRICE_SCALE);
    }

    #[test]
    fn spot_price_decreasing_auction_declines_without_trades() {
        // seeded 1,000,000 primary / 10,000 counter, weights 9000 -> 3000
        let start = spot_price(1_000_000, 10_000, 9000).unwrap();
        let end = spot_price(1_000_000, 10_000, 3000).unwrap();
        assert!(start > end);
    }

    #[test]
    fn spot_price_zero_primary_reserve_is_error() {
        assert!(spot_price(0, 1_000, 5000).is_err());
    }

    #[test]
    fn swap_output_equal_weights_matches_constant_product() {
        // with w_in == w_out the curve degenerates to x*y=k:
        // out = r_out * dx / (r_in + dx)
        let out = weighted_swap_output(1_000_000, 1_000_000, 10_000, 5000, 5000).unwrap();
        let expect = 1_000_000u128 * 10_000 / 1_010_000;
        let diff = (out as u128).abs_diff(expect);
        assert!(diff <= expect / 1_000, "out {out} expect {expect}");
        // never over-pays versus the exact curve
        assert!(out as u128 <= expect);
    }

    #[test]
    fn swap_output_weight_skew_pays_less_for_heavy_out_side() {
        // paying into the light side for the heavy side releases less than
        // the constant-product amount: the exponent w_in/w_out < 1 keeps the
        // power closer to one, so more of the output reserve is retained
        let balanced = weighted_swap_output(1_000_000, 1_000_000, 10_000, 5000, 5000).unwrap();
        let skewed = weighted_swap_output(1_000_000, 1_000_000, 10_000, 1000, 9000).unwrap();
        assert!(skewed < balanced);
    }

    #[test]
    fn swap_output_is_monotone_in_amount_in() {
        let small = weighted_swap_output(1_000_000, 500_000, 1_000, 7000, 3000).unwrap();
        let large = weighted_swap_output(1_000_000, 500_000, 50_000, 7000, 3000).unwrap();
        assert!(large > small);
    }

    #[test]
    fn swap_output_never_drains_reserve() {
        // enormous input still leaves the output reserve positive
        let out = weighted_swap_output(1_000, 1_000_000, u64::MAX / 2, 5000, 5000).unwrap();
        assert!(out < 1_000_000);
    }

    #[test]
    fn swap_output_rejects_empty_pool_and_zero_input() {
        assert!(weighted_swap_output(0, 1_000, 10, 5000, 5000).is_err());
        assert!(weighted_swap_output(1_000, 0, 10, 5000, 5000).is_err());
        assert!(weighted_swap_output(1_000, 1_000, 0, 5000, 5000).is_err());
    }
}
