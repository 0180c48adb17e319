//! # sealbid-ledger
//!
//! **Reference ledger plane**: durable per-deal records with commit-or-discard
//! atomicity, plus the asset custody layer (escrow and payment allowances).
//!
//! ## Architecture
//!
//! The ledger is the single source of truth and the sole serialization point:
//! 1. **Ledger**: deal records behind per-deal locks; every mutation runs on
//!    a working copy and only commits on success
//! 2. **AssetCustody**: available/frozen balances per (party, asset),
//!    payment allowances, and the atomic asset-for-payment exchange
//!
//! ## Mutation Flow
//!
//! ```text
//! Engine → Ledger.commit(deal_id, op, closure) → working copy → Ok? commit + receipt
//!                                                             → Err? discard
//! ```
//!
//! At most one mutating operation per deal commits at a time; there is no
//! cross-deal locking.

pub mod custody;
pub mod ledger;

pub use custody::{AssetCustody, ExchangeOrder};
pub use ledger::Ledger;
