//! The threshold matcher — a pure predicate, no state, no side effects.
//!
//! Used during reveal as a preview and re-derivable by any party to audit a
//! bound snapshot.

use sealbid_types::RevealedSnapshot;

/// Whether ask and bid are close enough to trade:
/// `|bid - ask| <= threshold`.
#[must_use]
pub fn prices_match(ask_clear: u32, bid_clear: u32, threshold_clear: u32) -> bool {
    bid_clear.abs_diff(ask_clear) <= threshold_clear
}

/// Re-derive the match predicate for a bound snapshot. Returns `false` when
/// the stored `matched` flag disagrees with the clear values.
#[must_use]
pub fn audit_snapshot(snapshot: &RevealedSnapshot) -> bool {
    prices_match(
        snapshot.ask_clear,
        snapshot.bid_clear,
        snapshot.threshold_clear,
    ) == snapshot.matched
}
