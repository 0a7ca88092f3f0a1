//! Engine configuration and capability table.
//!
//! Authorization is an explicit table carried in `EngineConfig` rather than
//! per-component authority fields: each entry pairs an account with a bitmask
//! of capabilities, and every mutating instruction checks the table (or the
//! admin) at entry and fails closed.

use anchor_lang::prelude::*;

use crate::constants::MAX_CAPABILITY_ENTRIES;
use crate::error::TreasuryError;

/// One capability-table row. A zeroed `account` marks a free slot.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Default)]
pub struct CapabilityEntry {
    pub account: Pubkey,
    pub caps: u32,
}

/// Global engine configuration
#[account]
#[derive(InitSpace)]
pub struct EngineConfig {
    pub version: u8,
    pub bump: u8,
    pub authority_bump: u8,

    /// Admin authority; implicitly holds every capability
    pub admin: Pubkey,

    /// Reward token mint (XOM)
    pub xom_mint: Pubkey,

    /// Wallet receiving the protocol share of fee distributions
    pub protocol_treasury: Pubkey,

    /// Wallet receiving the staking share of fee distributions
    pub staking_pool: Pubkey,

    /// One-way governance finality flag; permanently disables admin setters
    pub ossified: bool,

    pub capabilities: [CapabilityEntry; MAX_CAPABILITY_ENTRIES],
}

impl EngineConfig {
    pub fn has_capability(&self, account: &Pubkey, cap: u32) -> bool {
        if *account == self.admin {
            return true;
        }
        self.capabilities
            .iter()
            .any(|e| e.account == *account && e.caps & cap == cap)
    }

    pub fn grant(&mut self, account: Pubkey, cap: u32) -> Result<()> {
        if let Some(entry) = self.capabilities.iter_mut().find(|e| e.account == account) {
            entry.caps |= cap;
            return Ok(());
        }
        let slot = self
            .capabilities
            .iter_mut()
            .find(|e| e.account == Pubkey::default())
            .ok_or(TreasuryError::CapabilityTableFull)?;
        slot.account = account;
        slot.caps = cap;
        Ok(())
    }

    pub fn revoke(&mut self, account: &Pubkey, cap: u32) {
        if let Some(entry) = self.capabilities.iter_mut().find(|e| e.account == *account) {
            entry.caps &= !cap;
            if entry.caps == 0 {
                *entry = CapabilityEntry::default();
            }
        }
    }

    /// Admin-gated setters fail permanently once the engine is ossified
    pub fn require_not_ossified(&self) -> Result<()> {
        require!(!self.ossified, TreasuryError::Ossified);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CAP_BRIDGE_OPERATOR, CAP_DEPOSITOR};

    fn config() -> EngineConfig {
        EngineConfig {
            version: 1,
            bump: 0,
            authority_bump: 0,
            admin: Pubkey::new_unique(),
            xom_mint: Pubkey::default(),
            protocol_treasury: Pubkey::default(),
            staking_pool: Pubkey::default(),
            ossified: false,
            capabilities: [CapabilityEntry::default(); MAX_CAPABILITY_ENTRIES],
        }
    }

    #[test]
    fn admin_holds_every_capability() {
        let cfg = config();
        let admin = cfg.admin;
        assert!(cfg.has_capability(&admin, CAP_DEPOSITOR | CAP_BRIDGE_OPERATOR));
    }

    #[test]
    fn grant_and_revoke_round_trip() {
        let mut cfg = config();
        let key = Pubkey::new_unique();
        assert!(!cfg.has_capability(&key, CAP_DEPOSITOR));

        cfg.grant(key, CAP_DEPOSITOR).unwrap();
        assert!(cfg.has_capability(&key, CAP_DEPOSITOR));
        assert!(!cfg.has_capability(&key, CAP_BRIDGE_OPERATOR));

        cfg.grant(key, CAP_BRIDGE_OPERATOR).unwrap();
        assert!(cfg.has_capability(&key, CAP_DEPOSITOR | CAP_BRIDGE_OPERATOR));

        cfg.revoke(&key, CAP_DEPOSITOR);
        assert!(!cfg.has_capability(&key, CAP_DEPOSITOR));
        assert!(cfg.has_capability(&key, CAP_BRIDGE_OPERATOR));
    }

    #[test]
    fn table_exhaustion_is_an_error() {
        let mut cfg = config();
        for _ in 0..MAX_CAPABILITY_ENTRIES {
            cfg.grant(Pubkey::new_unique(), CAP_DEPOSITOR).unwrap();
        }
        assert!(cfg.grant(Pubkey::new_unique(), CAP_DEPOSITOR).is_err());
    }

    #[test]
    fn revoking_last_capability_frees_the_slot() {
        let mut cfg = config();
        let key = Pubkey::new_unique();
        cfg.grant(key, CAP_DEPOSITOR).unwrap();
        cfg.revoke(&key, CAP_DEPOSITOR);
        // slot is reusable again
        for _ in 0..MAX_CAPABILITY_ENTRIES {
            cfg.grant(Pubkey::new_unique(), CAP_DEPOSITOR).unwrap();
        }
    }
}
