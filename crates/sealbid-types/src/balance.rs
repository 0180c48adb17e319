//! Balance tracking types for the custody layer.
//!
//! Every party has an `available` balance (usable for escrow and payment)
//! and a `frozen` balance (locked by a live deal's escrow).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single balance entry for a (party, asset) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Available for new escrows / payments / withdrawal.
    pub available: Decimal,
    /// Frozen in escrow for a live deal.
    pub frozen: Decimal,
}

impl BalanceEntry {
    /// Create a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Decimal::ZERO,
            frozen: Decimal::ZERO,
        }
    }

    /// Total balance (available + frozen).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.frozen
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available.is_zero() && self.frozen.is_zero()
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        let entry = BalanceEntry::default();
        assert_eq!(entry.available, Decimal::ZERO);
        assert_eq!(entry.frozen, Decimal::ZERO);
        assert!(entry.is_zero());
    }

    #[test]
    fn total_sums_both_buckets() {
        let entry = BalanceEntry {
            available: Decimal::new(100, 0),
            frozen: Decimal::new(50, 0),
        };
        assert_eq!(entry.total(), Decimal::new(150, 0));
        assert!(!entry.is_zero());
    }

    #[test]
    fn serde_roundtrip() {
        let entry = BalanceEntry {
            available: Decimal::new(12345, 2),
            frozen: Decimal::new(678, 1),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: BalanceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
