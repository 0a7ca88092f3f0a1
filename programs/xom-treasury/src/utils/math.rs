//! Shared checked arithmetic for the treasury engine.
//!
//! All balance math goes through `mul_div` with an explicit `Rounding` so the
//! truncation direction is a deliberate choice at every call site. 256-bit
//! intermediates use `ethnum::U256`; the fractional-exponent power function
//! needed by the weighted pool works in Q64.64 fixed point and reduces the
//! fractional bits with repeated integer square roots (`integer_sqrt`).

use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

use crate::constants::{BPS_DENOMINATOR, Q64};
use crate::error::TreasuryError;

/// Rounding modes for financial calculations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down, // Floor - round towards zero
    Up,   // Ceiling - round away from zero
}

/// Multiply two u128 values and divide by a third without intermediate
/// overflow, with explicit rounding.
pub fn mul_div_u128(a: u128, numerator: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(TreasuryError::DivisionByZero.into());
    }

    let product = U256::from(a)
        .checked_mul(U256::from(numerator))
        .ok_or(TreasuryError::MathOverflow)?;
    let denom = U256::from(denominator);

    let mut quotient = product / denom;
    if rounding == Rounding::Up && product % denom != U256::ZERO {
        quotient = quotient
            .checked_add(U256::ONE)
            .ok_or(TreasuryError::MathOverflow)?;
    }

    if quotient > U256::from(u128::MAX) {
        return Err(TreasuryError::MathOverflow.into());
    }
    Ok(quotient.as_u128())
}

/// `mul_div` over u64 operands, overflow-checked on the final narrowing
pub fn mul_div_u64(a: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    let wide = mul_div_u128(a as u128, numerator as u128, denominator as u128, rounding)?;
    u64::try_from(wide).map_err(|_| TreasuryError::MathOverflow.into())
}

/// Truncating basis-point share of an amount
pub fn mul_bps(amount: u64, bps: u64) -> Result<u64> {
    mul_div_u64(amount, bps, BPS_DENOMINATOR, Rounding::Down)
}

/// Q64.64 multiply: `(a * b) >> 64` with rounding
pub fn mul_q64(a: u128, b: u128, rounding: Rounding) -> Result<u128> {
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(TreasuryError::MathOverflow)?;

    let mut shifted: U256 = product >> 64;
    if rounding == Rounding::Up && product & U256::from(u64::MAX) != U256::ZERO {
        shifted += U256::ONE;
    }

    if shifted > U256::from(u128::MAX) {
        return Err(TreasuryError::MathOverflow.into());
    }
    Ok(shifted.as_u128())
}

/// Square root of a Q64.64 value at most one, staying in Q64.64
pub fn sqrt_q64(x: u128, rounding: Rounding) -> Result<u128> {
    require!(x <= Q64, TreasuryError::MathOverflow);
    if x == Q64 {
        return Ok(Q64);
    }
    // sqrt(x / 2^64) * 2^64 == sqrt(x << 64); x < 2^64 so the shift fits
    let scaled = x << 64;
    let mut root = scaled.integer_sqrt();
    if rounding == Rounding::Up && root * root < scaled {
        root += 1;
    }
    Ok(root)
}

/// Raise a Q64.64 base (at most 1.0) to a Q64.64 exponent.
///
/// The integer part of the exponent uses square-and-multiply; each fractional
/// bit contributes one repeated square root of the base. Every step rounds
/// up, so for bases below one the result is never under-estimated. Callers
/// rely on that bias: `1 - pow` under-states the buyer's output.
pub fn pow_q64(base: u128, exp: u128) -> Result<u128> {
    require!(base <= Q64, TreasuryError::MathOverflow);
    if exp == 0 {
        return Ok(Q64);
    }
    if base == 0 {
        return Ok(0);
    }

    let mut result = Q64;

    // Integer part
    let mut n = exp >> 64;
    let mut b = base;
    while n > 0 {
        if n & 1 == 1 {
            result = mul_q64(result, b, Rounding::Up)?;
        }
        n >>= 1;
        if n > 0 {
            b = mul_q64(b, b, Rounding::Up)?;
        }
    }

    // Fractional part, most significant bit first
    let mut frac = exp & (u64::MAX as u128);
    let mut sq = base;
    let mut bit = 1u128 << 63;
    while bit > 0 && frac != 0 && sq < Q64 {
        sq = sqrt_q64(sq, Rounding::Up)?;
        if frac & bit != 0 {
            result = mul_q64(result, sq, Rounding::Up)?;
            frac &= !bit;
        }
        bit >>= 1;
    }

    Ok(result.min(Q64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_as_requested() {
        assert_eq!(mul_div_u128(10, 10, 3, Rounding::Down).unwrap(), 33);
        assert_eq!(mul_div_u128(10, 10, 3, Rounding::Up).unwrap(), 34);
        assert_eq!(mul_div_u128(10, 10, 5, Rounding::Up).unwrap(), 20);
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert!(mul_div_u128(1, 1, 0, Rounding::Down).is_err());
    }

    #[test]
    fn mul_div_large_operands_use_wide_intermediate() {
        // (u128::MAX * 2) / 2 overflows u128 mid-computation but not the result
        let r = mul_div_u128(u128::MAX, 2, 2, Rounding::Down).unwrap();
        assert_eq!(r, u128::MAX);
    }

    #[test]
    fn mul_div_detects_result_overflow() {
        assert!(mul_div_u128(u128::MAX, 2, 1, Rounding::Down).is_err());
    }

    #[test]
    fn bps_share_truncates() {
        assert_eq!(mul_bps(10_000, 7_000).unwrap(), 7_000);
        assert_eq!(mul_bps(3, 7_000).unwrap(), 2); // 2.1 -> 2
    }

    #[test]
    fn mul_q64_shifts_and_rounds() {
        // 0.5 * 0.5 == 0.25 exactly, either rounding
        assert_eq!(mul_q64(Q64 / 2, Q64 / 2, Rounding::Down).unwrap(), Q64 / 4);
        assert_eq!(mul_q64(Q64 / 2, Q64 / 2, Rounding::Up).unwrap(), Q64 / 4);
        // a product with low bits set bumps under Up
        assert_eq!(mul_q64(3, 3, Rounding::Down).unwrap(), 0);
        assert_eq!(mul_q64(3, 3, Rounding::Up).unwrap(), 1);
    }

    #[test]
    fn sqrt_q64_of_quarter_is_half() {
        let quarter = Q64 / 4;
        let half = sqrt_q64(quarter, Rounding::Down).unwrap();
        assert_eq!(half, Q64 / 2);
    }

    #[test]
    fn pow_q64_identity_cases() {
        assert_eq!(pow_q64(Q64 / 2, 0).unwrap(), Q64);
        assert_eq!(pow_q64(Q64, 5 << 64).unwrap(), Q64);
        // 0.5^1 == 0.5
        assert_eq!(pow_q64(Q64 / 2, 1 << 64).unwrap(), Q64 / 2);
    }

    #[test]
    fn pow_q64_integer_exponent() {
        // 0.5^3 == 0.125, allow the deliberate upward bias
        let r = pow_q64(Q64 / 2, 3 << 64).unwrap();
        assert!(r >= Q64 / 8);
        assert!(r - Q64 / 8 < 1 << 8);
    }

    #[test]
    fn pow_q64_fractional_exponent() {
        // 0.25^0.5 == 0.5
        let r = pow_q64(Q64 / 4, 1 << 63).unwrap();
        let expect = Q64 / 2;
        let diff = r.abs_diff(expect);
        assert!(diff < 1 << 16, "diff {diff}");
    }

    #[test]
    fn pow_q64_mixed_exponent() {
        // 0.81^1.5 = 0.729
        let base = (Q64 / 100) * 81;
        let exp = (1u128 << 64) + (1 << 63);
        let r = pow_q64(base, exp).unwrap();
        let expect = (Q64 / 1000) * 729;
        let tolerance = Q64 / 100_000; // 1e-5 in Q64
        assert!(r.abs_diff(expect) < tolerance);
    }

    #[test]
    fn pow_q64_never_underestimates_below_one_base() {
        // upward rounding means result >= exact value; spot check 0.9^2
        let base = (Q64 / 10) * 9;
        let r = pow_q64(base, 2 << 64).unwrap();
        let exact = (Q64 / 100) * 81;
        assert!(r >= exact);
    }
}
