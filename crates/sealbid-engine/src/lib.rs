//! # sealbid-engine
//!
//! **The deal lifecycle engine** for SealBid blind escrow negotiation.
//!
//! A seller and a buyer trade an asset for a payment at prices that stay
//! sealed until both sides have committed. The engine owns:
//!
//! - **Capability seams**: [`Encryptor`] and [`RevealOracle`] traits — the
//!   implementation is chosen once at construction, never per call
//! - **Codebook capability**: an in-process encryptor/oracle pair for local
//!   deployments and tests
//! - **Submission guard**: role checks and at-most-once ciphertext slots
//! - **Threshold matcher**: the pure match predicate
//! - **Reveal/bind**: read-only decryption preview, then a ledger-final
//!   snapshot commit
//! - **Settlement & cancellation**: atomic asset-for-payment exchange or
//!   escrow return
//!
//! The ledger is the single source of truth; every consumer re-reads the
//! bound snapshot through [`DealEngine::deal_info`] rather than trusting a
//! private cache.

pub mod capability;
pub mod codebook;
pub mod engine;
pub mod guard;
pub mod matcher;
pub mod reveal;

pub use capability::{EncryptionContext, Encryptor, RevealOracle};
pub use codebook::{Codebook, CodebookEncryptor, CodebookOracle};
pub use engine::DealEngine;
pub use guard::SubmissionGuard;
pub use matcher::{audit_snapshot, prices_match};
pub use reveal::reveal_deal;
