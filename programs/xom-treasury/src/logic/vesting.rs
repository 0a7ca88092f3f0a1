//! Linear vesting over fixed schedule slots.
//!
//! Schedules release pro-rata over `[start_time, end_time]`; a slot with
//! `total == 0` is free. Fully released slots are cleared on claim so the
//! book never grows beyond `MAX_VESTING_SLOTS` live schedules.

use anchor_lang::prelude::*;

use crate::error::TreasuryError;
use crate::state::VestingSchedule;
use crate::utils::{mul_div_u64, Rounding};

/// Amount a single schedule can release at `now`
pub fn releasable(schedule: &VestingSchedule, now: i64) -> Result<u64> {
    if schedule.total == 0 {
        return Ok(0);
    }

    let vested = if now >= schedule.end_time {
        schedule.total
    } else if now <= schedule.start_time {
        0
    } else {
        let elapsed = (now - schedule.start_time) as u64;
        let duration = (schedule.end_time - schedule.start_time) as u64;
        mul_div_u64(schedule.total, elapsed, duration, Rounding::Down)?
    };

    vested
        .checked_sub(schedule.released)
        .ok_or_else(|| TreasuryError::MathOverflow.into())
}

/// Record a new schedule in the first free slot
pub fn add_schedule(
    slots: &mut [VestingSchedule],
    total: u64,
    now: i64,
    period: i64,
) -> Result<()> {
    require!(total > 0, TreasuryError::ZeroAmount);
    require!(period > 0, TreasuryError::InvalidTimeWindow);

    let slot = slots
        .iter_mut()
        .find(|s| s.total == 0)
        .ok_or(TreasuryError::VestingSlotsFull)?;
    *slot = VestingSchedule {
        total,
        released: 0,
        start_time: now,
        end_time: now
            .checked_add(period)
            .ok_or(TreasuryError::MathOverflow)?,
    };
    Ok(())
}

/// Release everything currently claimable across all slots, clearing the
/// slots that finished. Returns the total released amount.
pub fn claim_released(slots: &mut [VestingSchedule], now: i64) -> Result<u64> {
    let mut claimed = 0u64;
    for slot in slots.iter_mut() {
        let amount = releasable(slot, now)?;
        if amount == 0 {
            if slot.total > 0 && slot.released == slot.total {
                *slot = VestingSchedule::default();
            }
            continue;
        }
        claimed = claimed
            .checked_add(amount)
            .ok_or(TreasuryError::MathOverflow)?;
        slot.released = slot
            .released
            .checked_add(amount)
            .ok_or(TreasuryError::MathOverflow)?;
        if slot.released == slot.total {
            *slot = VestingSchedule::default();
        }
    }
    Ok(claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_VESTING_SLOTS;

    fn book() -> [VestingSchedule; MAX_VESTING_SLOTS] {
        [VestingSchedule::default(); MAX_VESTING_SLOTS]
    }

    #[test]
    fn linear_release_midpoint_and_end() {
        let mut slots = book();
        add_schedule(&mut slots, 1_000, 100, 200).unwrap();

        assert_eq!(releasable(&slots[0], 100).unwrap(), 0);
        assert_eq!(releasable(&slots[0], 200).unwrap(), 500);
        assert_eq!(releasable(&slots[0], 300).unwrap(), 1_000);
        assert_eq!(releasable(&slots[0], 1_000).unwrap(), 1_000);
    }

    #[test]
    fn claim_tracks_released_and_frees_finished_slots() {
        let mut slots = book();
        add_schedule(&mut slots, 1_000, 0, 100).unwrap();

        assert_eq!(claim_released(&mut slots, 50).unwrap(), 500);
        // nothing more at the same instant
        assert_eq!(claim_released(&mut slots, 50).unwrap(), 0);
        assert_eq!(claim_released(&mut slots, 100).unwrap(), 500);
        // slot recycled
        assert_eq!(slots[0].total, 0);
    }

    #[test]
    fn partial_claims_sum_to_total() {
        let mut slots = book();
        add_schedule(&mut slots, 997, 0, 300).unwrap(); // awkward divisor
        let mut claimed = 0;
        for t in [17, 85, 160, 299, 300] {
            claimed += claim_released(&mut slots, t).unwrap();
        }
        assert_eq!(claimed, 997);
    }

    #[test]
    fn multiple_schedules_claim_together() {
        let mut slots = book();
        add_schedule(&mut slots, 600, 0, 100).unwrap();
        add_schedule(&mut slots, 400, 0, 200).unwrap();
        // t=100: first fully vested, second half vested
        assert_eq!(claim_released(&mut slots, 100).unwrap(), 800);
    }

    #[test]
    fn slots_exhaust_then_recycle() {
        let mut slots = book();
        for _ in 0..MAX_VESTING_SLOTS {
            add_schedule(&mut slots, 10, 0, 100).unwrap();
        }
        assert!(add_schedule(&mut slots, 10, 0, 100).is_err());
        // vest everything out, then space is available again
        assert_eq!(
            claim_released(&mut slots, 100).unwrap(),
            10 * MAX_VESTING_SLOTS as u64
        );
        add_schedule(&mut slots, 10, 0, 100).unwrap();
    }

    #[test]
    fn zero_total_and_zero_period_are_rejected() {
        let mut slots = book();
        assert!(add_schedule(&mut slots, 0, 0, 100).is_err());
        assert!(add_schedule(&mut slots, 10, 0, 0).is_err());
    }
}
