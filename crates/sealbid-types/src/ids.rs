//! Identifiers used throughout SealBid.
//!
//! Deal identifiers are monotonically assigned `u64`s (the ledger is the
//! assigning authority). Party identifiers use UUIDv7 for time-ordered
//! lexicographic sorting; the nil UUID is reserved for "no buyer yet" in
//! open-mode deals.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// DealId
// ---------------------------------------------------------------------------

/// Unique, monotonically assigned deal identifier.
///
/// Assigned by the ledger at creation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DealId(pub u64);

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deal:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PartyId
// ---------------------------------------------------------------------------

/// Unique identifier for a negotiating party (seller, buyer, or admin).
///
/// The nil value stands for "unassigned" and is only legal as the buyer of
/// an open-mode deal that has not yet received a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PartyId(pub Uuid);

impl PartyId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The reserved "no party" identifier.
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// Type alias for asset identifiers (e.g., "GOLD", "USDC").
pub type Asset = String;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_id_display() {
        assert_eq!(format!("{}", DealId(7)), "deal:7");
    }

    #[test]
    fn party_id_uniqueness() {
        let a = PartyId::new();
        let b = PartyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn party_id_ordering() {
        let a = PartyId::new();
        let b = PartyId::new();
        assert!(a < b);
    }

    #[test]
    fn nil_party_is_nil() {
        assert!(PartyId::nil().is_nil());
        assert!(!PartyId::new().is_nil());
    }

    #[test]
    fn serde_roundtrips() {
        let did = DealId(99);
        let json = serde_json::to_string(&did).unwrap();
        let back: DealId = serde_json::from_str(&json).unwrap();
        assert_eq!(did, back);

        let pid = PartyId::new();
        let json = serde_json::to_string(&pid).unwrap();
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(pid, back);
    }
}
