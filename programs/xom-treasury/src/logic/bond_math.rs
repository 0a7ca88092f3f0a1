//! Bond pricing and the rolling daily issuance window.
//!
//! Bonded amounts are normalized to 18 decimals before pricing so that a
//! 6-decimal stablecoin and the reward token's native precision never mix.
//! The discount applies to the reference price, never the input amount.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, NORMALIZED_DECIMALS, PRICE_SCALE, SECONDS_PER_DAY};
use crate::error::TreasuryError;
use crate::utils::{mul_div_u128, Rounding};

/// Scale a native token amount to 18-decimal fixed point
pub fn normalize_to_18(amount: u64, decimals: u8) -> Result<u128> {
    if decimals <= NORMALIZED_DECIMALS {
        let factor = 10u128.pow((NORMALIZED_DECIMALS - decimals) as u32);
        (amount as u128)
            .checked_mul(factor)
            .ok_or_else(|| TreasuryError::MathOverflow.into())
    } else {
        let factor = 10u128.pow((decimals - NORMALIZED_DECIMALS) as u32);
        Ok(amount as u128 / factor)
    }
}

/// Scale an 18-decimal amount down to a token's native decimals (truncating)
pub fn denormalize_from_18(amount_18: u128, decimals: u8) -> Result<u64> {
    let native = if decimals <= NORMALIZED_DECIMALS {
        let factor = 10u128.pow((NORMALIZED_DECIMALS - decimals) as u32);
        amount_18 / factor
    } else {
        let factor = 10u128.pow((decimals - NORMALIZED_DECIMALS) as u32);
        amount_18
            .checked_mul(factor)
            .ok_or(TreasuryError::MathOverflow)?
    };
    u64::try_from(native).map_err(|_| TreasuryError::MathOverflow.into())
}

/// Reference price after the bond discount, 1e18 fixed point
pub fn effective_price(reference_price: u128, discount_bps: u16) -> Result<u128> {
    require!(
        (discount_bps as u64) < BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    require!(reference_price > 0, TreasuryError::DivisionByZero);
    mul_div_u128(
        reference_price,
        (BPS_DENOMINATOR - discount_bps as u64) as u128,
        BPS_DENOMINATOR as u128,
        Rounding::Up,
    )
}

/// Reward tokens owed for a bonded amount, in the reward mint's native
/// decimals. Truncates in the protocol's favor.
pub fn bond_output(
    amount_in: u64,
    asset_decimals: u8,
    reference_price: u128,
    discount_bps: u16,
    reward_decimals: u8,
) -> Result<u64> {
    let amount_18 = normalize_to_18(amount_in, asset_decimals)?;
    let price = effective_price(reference_price, discount_bps)?;
    let reward_18 = mul_div_u128(amount_18, PRICE_SCALE, price, Rounding::Down)?;
    denormalize_from_18(reward_18, reward_decimals)
}

/// UTC calendar day for the rolling daily cap
pub fn day_index(now: i64) -> i64 {
    now.div_euclid(SECONDS_PER_DAY)
}

/// Split an amount into an immediate part and a vested remainder
pub fn split_immediate(total: u64, immediate_bps: u16) -> Result<(u64, u64)> {
    require!(
        immediate_bps as u64 <= BPS_DENOMINATOR,
        TreasuryError::InvalidBps
    );
    let immediate = crate::utils::mul_bps(total, immediate_bps as u64)?;
    let vested = total
        .checked_sub(immediate)
        .ok_or(TreasuryError::MathOverflow)?;
    Ok((immediate, vested))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_round_trip_6_decimals() {
        let n = normalize_to_18(1_000_000, 6).unwrap(); // 1.0 USDC
        assert_eq!(n, PRICE_SCALE);
        assert_eq!(denormalize_from_18(n, 6).unwrap(), 1_000_000);
    }

    #[test]
    fn normalization_is_identity_at_18() {
        assert_eq!(normalize_to_18(42, 18).unwrap(), 42);
        assert_eq!(denormalize_from_18(42, 18).unwrap(), 42);
    }

    #[test]
    fn effective_price_applies_discount() {
        // $0.005 at 500 bps discount -> $0.00475
        let reference = PRICE_SCALE / 200;
        let p = effective_price(reference, 500).unwrap();
        assert_eq!(p, PRICE_SCALE * 475 / 100_000);
    }

    #[test]
    fn bond_output_reference_scenario() {
        // 100 quote units (6 decimals) at $0.005 with 5% discount:
        // 100 / 0.00475 = 21052.63... reward tokens (9 decimals)
        let reference = PRICE_SCALE / 200;
        let out = bond_output(100_000_000, 6, reference, 500, 9).unwrap();
        let expect = 21_052_631_578_947u64; // 21052.631578947 * 1e9
        assert!(out.abs_diff(expect) <= 1, "out {out}");
    }

    #[test]
    fn bond_output_no_discount() {
        // 1 quote unit at $1.00, 18-decimal reward: exactly 1 reward token
        let out = bond_output(1_000_000, 6, PRICE_SCALE, 0, 18).unwrap();
        assert_eq!(out, 1_000_000_000_000_000_000);
    }

    #[test]
    fn bond_output_rejects_zero_price_and_full_discount() {
        assert!(bond_output(1_000, 6, 0, 0, 9).is_err());
        assert!(bond_output(1_000, 6, PRICE_SCALE, 10_000, 9).is_err());
    }

    #[test]
    fn day_index_boundaries() {
        assert_eq!(day_index(0), 0);
        assert_eq!(day_index(SECONDS_PER_DAY - 1), 0);
        assert_eq!(day_index(SECONDS_PER_DAY), 1);
        assert_eq!(day_index(2 * SECONDS_PER_DAY + 5), 2);
    }

    #[test]
    fn split_immediate_thirty_seventy() {
        let (now, later) = split_immediate(1_000, 3_000).unwrap();
        assert_eq!(now, 300);
        assert_eq!(later, 700);
    }

    #[test]
    fn split_immediate_dust_goes_to_vested() {
        let (now, later) = split_immediate(7, 3_000).unwrap();
        assert_eq!(now, 2); // 2.1 floored
        assert_eq!(later, 5);
        assert_eq!(now + later, 7);
    }

    #[test]
    fn split_immediate_rejects_bps_above_denominator() {
        assert!(split_immediate(100, 10_001).is_err());
    }
}
