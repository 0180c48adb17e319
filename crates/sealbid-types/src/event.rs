//! Observations emitted by the ledger's append-only event log.
//!
//! Every committed mutation appends exactly one event. The log is an audit
//! trail for front ends and monitors; it is never consulted by the engine's
//! own decision logic (the deal record is the single source of truth).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, DealId, DealMode, PartyId};

/// A single observation about a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealEvent {
    /// A deal was created and the seller's asset escrowed.
    DealCreated {
        deal_id: DealId,
        seller: PartyId,
        mode: DealMode,
        asset_token: Asset,
        asset_amount: Decimal,
        pay_token: Asset,
    },
    /// The seller's encrypted ask was recorded.
    AskSubmitted { deal_id: DealId, seller: PartyId },
    /// The buyer's encrypted bid was recorded. In open mode this also locks
    /// the buyer in.
    BidSubmitted { deal_id: DealId, buyer: PartyId },
    /// The seller's encrypted match threshold was recorded.
    ThresholdSet { deal_id: DealId },
    /// A revealed snapshot became authoritative.
    SnapshotBound { deal_id: DealId, matched: bool },
    /// Asset and payment were exchanged; the deal is terminal.
    DealSettled { deal_id: DealId, payment: Decimal },
    /// Escrow was returned to the seller; the deal is terminal.
    DealCanceled { deal_id: DealId, by: PartyId },
}

impl DealEvent {
    /// The deal this event belongs to.
    #[must_use]
    pub fn deal_id(&self) -> DealId {
        match self {
            Self::DealCreated { deal_id, .. }
            | Self::AskSubmitted { deal_id, .. }
            | Self::BidSubmitted { deal_id, .. }
            | Self::ThresholdSet { deal_id }
            | Self::SnapshotBound { deal_id, .. }
            | Self::DealSettled { deal_id, .. }
            | Self::DealCanceled { deal_id, .. } => *deal_id,
        }
    }
}

impl std::fmt::Display for DealEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DealCreated { deal_id, mode, .. } => {
                write!(f, "DEAL_CREATED {deal_id} ({mode})")
            }
            Self::AskSubmitted { deal_id, .. } => write!(f, "ASK_SUBMITTED {deal_id}"),
            Self::BidSubmitted { deal_id, .. } => write!(f, "BID_SUBMITTED {deal_id}"),
            Self::ThresholdSet { deal_id } => write!(f, "THRESHOLD_SET {deal_id}"),
            Self::SnapshotBound { deal_id, matched } => {
                write!(f, "SNAPSHOT_BOUND {deal_id} matched={matched}")
            }
            Self::DealSettled { deal_id, payment } => {
                write!(f, "DEAL_SETTLED {deal_id} payment={payment}")
            }
            Self::DealCanceled { deal_id, by } => write!(f, "DEAL_CANCELED {deal_id} by={by}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_id_accessor_covers_all_variants() {
        let id = DealId(9);
        let events = vec![
            DealEvent::AskSubmitted {
                deal_id: id,
                seller: PartyId::new(),
            },
            DealEvent::BidSubmitted {
                deal_id: id,
                buyer: PartyId::new(),
            },
            DealEvent::ThresholdSet { deal_id: id },
            DealEvent::SnapshotBound {
                deal_id: id,
                matched: true,
            },
            DealEvent::DealSettled {
                deal_id: id,
                payment: Decimal::new(1000, 0),
            },
            DealEvent::DealCanceled {
                deal_id: id,
                by: PartyId::new(),
            },
        ];
        for ev in events {
            assert_eq!(ev.deal_id(), id, "{ev}");
        }
    }

    #[test]
    fn serde_roundtrip() {
        let ev = DealEvent::DealCreated {
            deal_id: DealId(1),
            seller: PartyId::new(),
            mode: DealMode::Open,
            asset_token: "GOLD".into(),
            asset_amount: Decimal::new(1000, 0),
            pay_token: "USDC".into(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: DealEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
