//! Error types for the SealBid engine.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Deal record errors
//! - 2xx: Submission errors
//! - 3xx: Reveal / bind errors
//! - 4xx: Settlement / custody errors
//! - 5xx: Ledger errors
//!
//! No error is retried automatically by the engine; retry is a caller
//! policy. Local checks are advisory — the ledger commit is authoritative.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::DealId;

/// Central error enum for all SealBid operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SealbidError {
    // =================================================================
    // Deal Record Errors (1xx)
    // =================================================================
    /// The requested deal does not exist in the ledger.
    #[error("SB_ERR_100: Deal not found: {0}")]
    DealNotFound(DealId),

    /// The asset amount at creation was not strictly positive.
    #[error("SB_ERR_101: Invalid asset amount: {amount}")]
    InvalidAmount { amount: Decimal },

    /// A party field was missing or illegal (e.g., P2P deal without a buyer).
    #[error("SB_ERR_102: Invalid party: {reason}")]
    InvalidParty { reason: String },

    // =================================================================
    // Submission Errors (2xx)
    // =================================================================
    /// The caller does not hold the role required for this operation.
    #[error("SB_ERR_200: Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The ciphertext slot was already populated; no overwrite is possible.
    #[error("SB_ERR_201: Duplicate submission: {what} already present on {deal_id}")]
    DuplicateSubmission { deal_id: DealId, what: String },

    // =================================================================
    // Reveal / Bind Errors (3xx)
    // =================================================================
    /// Ask and bid are not both present yet.
    #[error("SB_ERR_300: Deal not ready: {0}")]
    NotReady(DealId),

    /// A revealed snapshot has already been bound for this deal.
    #[error("SB_ERR_301: Snapshot already bound: {0}")]
    AlreadyBound(DealId),

    /// The reveal oracle failed; values are never fabricated in its place.
    #[error("SB_ERR_302: Reveal oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },

    /// The ciphertext encoder failed.
    #[error("SB_ERR_303: Encryption unavailable: {reason}")]
    EncryptionUnavailable { reason: String },

    // =================================================================
    // Settlement / Custody Errors (4xx)
    // =================================================================
    /// The bound snapshot says ask and bid do not match.
    #[error("SB_ERR_400: Prices not matched: {0}")]
    NotMatched(DealId),

    /// The deal has already been settled (stale-state race loser).
    #[error("SB_ERR_401: Deal already settled: {0}")]
    AlreadySettled(DealId),

    /// The deal has already been canceled (stale-state race loser).
    #[error("SB_ERR_402: Deal already canceled: {0}")]
    AlreadyCanceled(DealId),

    /// The buyer's payment pre-authorization does not cover the revealed ask.
    #[error("SB_ERR_403: Insufficient allowance: need {needed}, authorized {authorized}")]
    InsufficientAllowance { needed: Decimal, authorized: Decimal },

    /// Not enough available balance to escrow or pay.
    #[error("SB_ERR_404: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    // =================================================================
    // Ledger Errors (5xx)
    // =================================================================
    /// Catch-all for a ledger-side revert.
    #[error("SB_ERR_500: Ledger rejected operation: {reason}")]
    LedgerRejected { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SealbidError>;
