//! Asset custody — escrow freezes, payment allowances, and the atomic
//! settlement exchange.
//!
//! Custody only moves value; it never decides *whether* to move it. The
//! engine decides, inside a ledger commit, and calls exactly one custody
//! operation per decision. Every operation validates all of its
//! preconditions before mutating anything, so a failed call leaves every
//! balance and allowance untouched.

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use sealbid_types::{Asset, BalanceEntry, PartyId, Result, SealbidError};

/// The two legs of a settlement, executed atomically:
/// escrowed asset → buyer, payment → seller.
#[derive(Debug, Clone)]
pub struct ExchangeOrder {
    pub seller: PartyId,
    pub buyer: PartyId,
    pub asset_token: Asset,
    pub asset_amount: Decimal,
    pub pay_token: Asset,
    pub payment: Decimal,
}

#[derive(Default)]
struct CustodyBook {
    balances: HashMap<(PartyId, Asset), BalanceEntry>,
    /// Payment pre-authorizations per (party, asset).
    allowances: HashMap<(PartyId, Asset), Decimal>,
}

/// Balance and allowance bookkeeping for all parties.
///
/// One lock guards the whole book, which is what makes [`AssetCustody::exchange`]
/// atomic: both legs happen under the same critical section or not at all.
#[derive(Default)]
pub struct AssetCustody {
    inner: Mutex<CustodyBook>,
}

impl AssetCustody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a party's available balance.
    pub fn deposit(&self, party: PartyId, asset: &str, amount: Decimal) {
        let mut book = self.inner.lock();
        let entry = book
            .balances
            .entry((party, asset.to_string()))
            .or_insert_with(BalanceEntry::new);
        entry.available += amount;
    }

    /// Current balance for a (party, asset) pair.
    #[must_use]
    pub fn balance(&self, party: PartyId, asset: &str) -> BalanceEntry {
        self.inner
            .lock()
            .balances
            .get(&(party, asset.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Pre-authorize payments up to `amount` of `asset` from `party`.
    /// Overwrites any previous authorization for the same pair.
    pub fn approve(&self, party: PartyId, asset: &str, amount: Decimal) {
        self.inner
            .lock()
            .allowances
            .insert((party, asset.to_string()), amount);
    }

    /// Remaining payment authorization for a (party, asset) pair.
    #[must_use]
    pub fn allowance(&self, party: PartyId, asset: &str) -> Decimal {
        self.inner
            .lock()
            .allowances
            .get(&(party, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Move `amount` from a party's available balance into escrow.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the available balance does not cover
    /// `amount`; nothing is moved in that case.
    pub fn escrow_lock(&self, party: PartyId, asset: &str, amount: Decimal) -> Result<()> {
        let mut book = self.inner.lock();
        let entry = book
            .balances
            .get_mut(&(party, asset.to_string()))
            .ok_or(SealbidError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            })?;

        if entry.available < amount {
            return Err(SealbidError::InsufficientBalance {
                needed: amount,
                available: entry.available,
            });
        }

        entry.available -= amount;
        entry.frozen += amount;
        Ok(())
    }

    /// Return `amount` from escrow to a party's available balance
    /// (cancellation path).
    ///
    /// # Errors
    /// Returns `LedgerRejected` if the frozen balance does not cover
    /// `amount` — that would mean the escrow invariant was broken upstream.
    pub fn escrow_release(&self, party: PartyId, asset: &str, amount: Decimal) -> Result<()> {
        let mut book = self.inner.lock();
        let entry = book
            .balances
            .get_mut(&(party, asset.to_string()))
            .filter(|entry| entry.frozen >= amount)
            .ok_or_else(|| SealbidError::LedgerRejected {
                reason: format!("escrow shortfall releasing {amount} {asset}"),
            })?;

        entry.frozen -= amount;
        entry.available += amount;
        Ok(())
    }

    /// Execute both settlement legs atomically:
    /// 1. seller's escrowed `asset_amount` of `asset_token` → buyer
    /// 2. buyer's `payment` of `pay_token` → seller, consuming allowance
    ///
    /// All preconditions are checked before any mutation, so on error no
    /// partial transfer exists.
    ///
    /// # Errors
    /// - `LedgerRejected` if the seller's escrow does not cover the asset leg
    /// - `InsufficientAllowance` if the buyer's authorization does not cover
    ///   the payment
    /// - `InsufficientBalance` if the buyer's available balance does not
    ///   cover the payment
    pub fn exchange(&self, order: &ExchangeOrder) -> Result<()> {
        let mut book = self.inner.lock();

        let seller_asset_key = (order.seller, order.asset_token.clone());
        let buyer_pay_key = (order.buyer, order.pay_token.clone());

        // Preconditions first; no mutation until all of them hold.
        let seller_frozen = book
            .balances
            .get(&seller_asset_key)
            .map_or(Decimal::ZERO, |entry| entry.frozen);
        if seller_frozen < order.asset_amount {
            return Err(SealbidError::LedgerRejected {
                reason: format!(
                    "escrow shortfall: frozen {seller_frozen} < {} {}",
                    order.asset_amount, order.asset_token
                ),
            });
        }

        let authorized = book
            .allowances
            .get(&buyer_pay_key)
            .copied()
            .unwrap_or(Decimal::ZERO);
        if authorized < order.payment {
            return Err(SealbidError::InsufficientAllowance {
                needed: order.payment,
                authorized,
            });
        }

        let buyer_available = book
            .balances
            .get(&buyer_pay_key)
            .map_or(Decimal::ZERO, |entry| entry.available);
        if buyer_available < order.payment {
            return Err(SealbidError::InsufficientBalance {
                needed: order.payment,
                available: buyer_available,
            });
        }

        // Leg 1: escrowed asset → buyer.
        if let Some(entry) = book.balances.get_mut(&seller_asset_key) {
            entry.frozen -= order.asset_amount;
        }
        book.balances
            .entry((order.buyer, order.asset_token.clone()))
            .or_insert_with(BalanceEntry::new)
            .available += order.asset_amount;

        // Leg 2: payment → seller, consuming the allowance.
        if let Some(entry) = book.balances.get_mut(&buyer_pay_key) {
            entry.available -= order.payment;
        }
        if let Some(allowance) = book.allowances.get_mut(&buyer_pay_key) {
            *allowance -= order.payment;
        }
        book.balances
            .entry((order.seller, order.pay_token.clone()))
            .or_insert_with(BalanceEntry::new)
            .available += order.payment;

        tracing::debug!(
            seller = %order.seller,
            buyer = %order.buyer,
            asset = %order.asset_token,
            amount = %order.asset_amount,
            payment = %order.payment,
            "Exchange executed"
        );
        Ok(())
    }

    /// Total supply of an asset across all parties (available + frozen).
    /// Settlement only moves value between parties, so this is invariant
    /// under `exchange`.
    #[must_use]
    pub fn total_supply(&self, asset: &str) -> Decimal {
        self.inner
            .lock()
            .balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, entry)| entry.total())
            .sum()
    }
}
