//! # Deal — the central entity of the negotiation engine
//!
//! A `Deal` escrows a seller's asset and collects exactly one encrypted ask,
//! one encrypted bid, and at most one encrypted match threshold. Prices stay
//! sealed until both sides have committed; only the bind step makes a
//! revealed snapshot authoritative.
//!
//! ## State Machine
//!
//! ```text
//!              ┌──────────────┐
//!       ask ┌─▶│ AskSubmitted ├─┐ bid
//!           │  └──────────────┘ │
//!   ┌───────┴─┐                 ▼  settle   ┌─────────┐
//!   │ Created │              ┌───────┐────▶│ Settled │
//!   └───────┬─┘              │ Ready │      └─────────┘
//!           │  ┌──────────────┐ ▲
//!       bid └─▶│ BidSubmitted ├─┘ ask
//!              └──────────────┘
//!
//!   any non-terminal state ──cancel──▶ Canceled
//! ```
//!
//! Transitions are **monotonic**: `Settled` and `Canceled` are terminal and
//! no mutation is accepted afterwards. Each ciphertext slot transitions
//! `None → Some` exactly once and is never overwritten.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, CipherHandle, DealId, PartyId};

/// How the counterparty is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealMode {
    /// Buyer fixed at creation.
    P2p,
    /// Buyer unassigned until the first bid locks it in.
    Open,
}

impl std::fmt::Display for DealMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P2p => write!(f, "P2P"),
            Self::Open => write!(f, "OPEN"),
        }
    }
}

/// Lifecycle state of a deal.
///
/// A deal that does not exist has no state; lookups of unknown IDs fail with
/// `DealNotFound` rather than returning a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealState {
    /// Created and escrowed; no prices submitted yet.
    Created,
    /// Seller's ask is in; waiting on the bid.
    AskSubmitted,
    /// Buyer's bid is in; waiting on the ask.
    BidSubmitted,
    /// Both ciphertexts present; eligible for reveal, bind, and settlement.
    Ready,
    /// Asset and payment exchanged. **Terminal.**
    Settled,
    /// Escrow returned to the seller. **Terminal.**
    Canceled,
}

impl DealState {
    /// Whether no further mutation is accepted in this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Canceled)
    }

    /// Can this state legally transition to the given target?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Created, Self::AskSubmitted | Self::BidSubmitted)
                | (Self::AskSubmitted | Self::BidSubmitted, Self::Ready)
                | (Self::Ready, Self::Settled)
        ) || (!self.is_terminal() && target == Self::Canceled)
    }
}

impl std::fmt::Display for DealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::AskSubmitted => write!(f, "ASK_SUBMITTED"),
            Self::BidSubmitted => write!(f, "BID_SUBMITTED"),
            Self::Ready => write!(f, "READY"),
            Self::Settled => write!(f, "SETTLED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// The plaintext snapshot produced by a reveal and committed by bind.
///
/// Immutable once bound. `matched` is re-derivable from the three clear
/// values by any party auditing a bound snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedSnapshot {
    pub ask_clear: u32,
    pub bid_clear: u32,
    pub threshold_clear: u32,
    pub matched: bool,
}

/// The deal record as owned by the ledger.
///
/// All other components operate on it by reference through the ledger's API,
/// never holding a private copy that could drift from the committed version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub mode: DealMode,
    pub seller: PartyId,
    /// Nil only while `mode = Open` and no bid has been submitted.
    pub buyer: PartyId,
    pub asset_token: Asset,
    /// Strictly positive at creation, immutable thereafter.
    pub asset_amount: Decimal,
    pub pay_token: Asset,
    pub enc_ask: Option<CipherHandle>,
    pub enc_bid: Option<CipherHandle>,
    pub enc_threshold: Option<CipherHandle>,
    /// Populated only by the bind step; immutable after.
    pub revealed: Option<RevealedSnapshot>,
    pub state: DealState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    #[must_use]
    pub fn has_ask(&self) -> bool {
        self.enc_ask.is_some()
    }

    #[must_use]
    pub fn has_bid(&self) -> bool {
        self.enc_bid.is_some()
    }

    #[must_use]
    pub fn has_threshold(&self) -> bool {
        self.enc_threshold.is_some()
    }

    /// Whether the given party is the seller or the (assigned) buyer.
    #[must_use]
    pub fn is_participant(&self, party: PartyId) -> bool {
        party == self.seller || (!self.buyer.is_nil() && party == self.buyer)
    }

    /// The payment owed at settlement: the revealed ask price, denominated
    /// in `pay_token`. `None` until a snapshot is bound.
    #[must_use]
    pub fn payment_due(&self) -> Option<Decimal> {
        self.revealed.map(|s| Decimal::from(s.ask_clear))
    }

    /// Produce the strongly-typed read model.
    #[must_use]
    pub fn view(&self) -> DealView {
        DealView {
            deal_id: self.id,
            mode: self.mode,
            seller: self.seller,
            buyer: (!self.buyer.is_nil()).then_some(self.buyer),
            asset_token: self.asset_token.clone(),
            asset_amount: self.asset_amount,
            pay_token: self.pay_token.clone(),
            has_ask: self.has_ask(),
            has_bid: self.has_bid(),
            has_threshold: self.has_threshold(),
            revealed: self.revealed,
            state: self.state,
        }
    }
}

/// The full deal view for consumption by any front end.
///
/// This is the single decoding boundary: downstream logic reads named,
/// typed fields and never re-interprets raw positional ledger data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealView {
    pub deal_id: DealId,
    pub mode: DealMode,
    pub seller: PartyId,
    /// `None` while an open-mode deal has no buyer yet.
    pub buyer: Option<PartyId>,
    pub asset_token: Asset,
    pub asset_amount: Decimal,
    pub pay_token: Asset,
    pub has_ask: bool,
    pub has_bid: bool,
    pub has_threshold: bool,
    pub revealed: Option<RevealedSnapshot>,
    pub state: DealState,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Deal {
    pub fn dummy(id: DealId, seller: PartyId, mode: DealMode, buyer: PartyId) -> Self {
        Self {
            id,
            mode,
            seller,
            buyer,
            asset_token: "GOLD".to_string(),
            asset_amount: Decimal::new(1000, 0),
            pay_token: "USDC".to_string(),
            enc_ask: None,
            enc_bid: None,
            enc_threshold: None,
            revealed: None,
            state: DealState::Created,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
