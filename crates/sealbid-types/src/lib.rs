//! # sealbid-types
//!
//! Shared types, errors, and configuration for the **SealBid** blind escrow
//! negotiation engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`DealId`], [`PartyId`], [`Asset`]
//! - **Deal model**: [`Deal`], [`DealMode`], [`DealState`], [`DealView`], [`RevealedSnapshot`]
//! - **Ciphertext model**: [`CipherHandle`], [`CipherProof`], [`EncryptedInput`]
//! - **Balance model**: [`BalanceEntry`]
//! - **Observation model**: [`DealEvent`]
//! - **Receipt model**: [`LedgerReceipt`], [`LedgerOp`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`SealbidError`] with `SB_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod balance;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod deal;
pub mod error;
pub mod event;
pub mod ids;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use sealbid_types::{Deal, DealState, CipherHandle, ...};

pub use balance::*;
pub use cipher::*;
pub use config::*;
pub use deal::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use receipt::*;

// Constants are accessed via `sealbid_types::constants::FOO`
// (not re-exported to avoid name collisions).
