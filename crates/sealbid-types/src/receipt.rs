//! Commit receipts for mutating ledger operations.
//!
//! Every successful mutating call on the ledger commits atomically and
//! returns a [`LedgerReceipt`] carrying the global commit sequence. A failed
//! call returns an error and leaves the record untouched — there is no
//! receipt for a revert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DealId;

/// The kind of mutating operation a receipt proves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerOp {
    Create,
    SubmitAsk,
    SubmitBid,
    SetThreshold,
    Bind,
    Settle,
    Cancel,
}

impl std::fmt::Display for LedgerOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::SubmitAsk => write!(f, "SUBMIT_ASK"),
            Self::SubmitBid => write!(f, "SUBMIT_BID"),
            Self::SetThreshold => write!(f, "SET_THRESHOLD"),
            Self::Bind => write!(f, "BIND"),
            Self::Settle => write!(f, "SETTLE"),
            Self::Cancel => write!(f, "CANCEL"),
        }
    }
}

/// Proof that a mutating operation committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    pub deal_id: DealId,
    pub op: LedgerOp,
    /// Global, strictly increasing commit sequence across all deals.
    pub sequence: u64,
    pub committed_at: DateTime<Utc>,
}
