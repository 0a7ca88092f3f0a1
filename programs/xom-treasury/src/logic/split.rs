//! Three-way fee split in basis points.
//!
//! The staking and protocol shares truncate; the community share takes the
//! rest, so the three shares always sum to the input exactly and no dust is
//! ever stranded in the vault.

use anchor_lang::prelude::*;

use crate::constants::{PROTOCOL_BPS, STAKING_BPS};
use crate::error::TreasuryError;
use crate::utils::mul_bps;

/// Result of splitting one distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub community: u64,
    pub staking: u64,
    pub protocol: u64,
}

pub fn split_fees(amount: u64) -> Result<FeeSplit> {
    require!(amount > 0, TreasuryError::NothingToDistribute);

    let staking = mul_bps(amount, STAKING_BPS)?;
    let protocol = mul_bps(amount, PROTOCOL_BPS)?;
    // largest share absorbs the truncation remainder
    let community = amount
        .checked_sub(staking)
        .and_then(|v| v.checked_sub(protocol))
        .ok_or(TreasuryError::MathOverflow)?;

    Ok(FeeSplit {
        community,
        staking,
        protocol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_split() {
        // 10,000 units -> 7,000 / 2,000 / 1,000
        let s = split_fees(10_000).unwrap();
        assert_eq!(s.community, 7_000);
        assert_eq!(s.staking, 2_000);
        assert_eq!(s.protocol, 1_000);
    }

    #[test]
    fn community_absorbs_dust() {
        // 10,001: staking 2000 (2000.2 floored), protocol 1000 (1000.1)
        let s = split_fees(10_001).unwrap();
        assert_eq!(s.staking, 2_000);
        assert_eq!(s.protocol, 1_000);
        assert_eq!(s.community, 7_001);
    }

    #[test]
    fn tiny_amounts_go_entirely_to_community() {
        let s = split_fees(3).unwrap();
        assert_eq!(s.staking, 0);
        assert_eq!(s.protocol, 0);
        assert_eq!(s.community, 3);
    }

    #[test]
    fn zero_is_rejected() {
        assert!(split_fees(0).is_err());
    }

    proptest! {
        #[test]
        fn conservation_holds_for_any_amount(amount in 1u64..=u64::MAX) {
            let s = split_fees(amount).unwrap();
            prop_assert_eq!(
                s.community as u128 + s.staking as u128 + s.protocol as u128,
                amount as u128
            );
            // community stays the largest share
            prop_assert!(s.community >= s.staking);
            prop_assert!(s.staking >= s.protocol);
        }

        #[test]
        fn repeated_distribution_conserves_across_sequences(
            amounts in proptest::collection::vec(1u64..1_000_000_000u64, 1..50)
        ) {
            let mut total_in = 0u128;
            let mut total_out = 0u128;
            for amount in amounts {
                total_in += amount as u128;
                let s = split_fees(amount).unwrap();
                total_out += s.community as u128 + s.staking as u128 + s.protocol as u128;
            }
            prop_assert_eq!(total_in, total_out);
        }
    }
}
