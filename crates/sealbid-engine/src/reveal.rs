//! Reveal — the read-only half of the two-phase reveal/bind protocol.
//!
//! Revealing decrypts a deal's stored ciphertexts and computes the match
//! predicate without touching the ledger. It is callable by anyone,
//! repeatable, and deterministic for unchanged ciphertexts. Nothing
//! downstream trusts a reveal until the bind step commits it.

use sealbid_types::{constants, Deal, Result, RevealedSnapshot, SealbidError};

use crate::capability::RevealOracle;
use crate::matcher::prices_match;

/// Decrypt a deal's ask, bid, and threshold and compute the snapshot.
///
/// A deal whose seller never set a threshold reveals with
/// [`constants::DEFAULT_THRESHOLD`]: exact match required.
///
/// # Errors
/// - `NotReady` if ask and bid are not both present
/// - `OracleUnavailable` if decryption fails or returns the wrong arity
pub fn reveal_deal(deal: &Deal, oracle: &dyn RevealOracle) -> Result<RevealedSnapshot> {
    let (Some(enc_ask), Some(enc_bid)) = (deal.enc_ask, deal.enc_bid) else {
        return Err(SealbidError::NotReady(deal.id));
    };

    let mut handles = vec![enc_ask, enc_bid];
    if let Some(enc_threshold) = deal.enc_threshold {
        handles.push(enc_threshold);
    }

    let clear = oracle.decrypt(&handles)?;
    if clear.len() != handles.len() {
        return Err(SealbidError::OracleUnavailable {
            reason: format!(
                "oracle returned {} values for {} handles",
                clear.len(),
                handles.len()
            ),
        });
    }

    let ask_clear = clear[0];
    let bid_clear = clear[1];
    let threshold_clear = clear.get(2).copied().unwrap_or(constants::DEFAULT_THRESHOLD);

    Ok(RevealedSnapshot {
        ask_clear,
        bid_clear,
        threshold_clear,
        matched: prices_match(ask_clear, bid_clear, threshold_clear),
    })
}
