//! The deal lifecycle engine.
//!
//! Every mutating operation is expressed as one atomic ledger commit: the
//! guard checks, the record mutation, and (for settlement/cancellation) the
//! custody movement all happen inside the commit closure, so a failure at
//! any point leaves the committed record and the balances unchanged. Calls
//! block until the ledger answers; nothing here retries — resubmission is
//! the caller's policy, and the presence-flag guards make a resubmission
//! safe wherever the original commit was not accepted.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sealbid_ledger::{AssetCustody, ExchangeOrder, Ledger};
use sealbid_types::{
    constants, Deal, DealEvent, DealId, DealMode, DealState, DealView, EncryptedInput,
    EngineConfig, LedgerOp, LedgerReceipt, PartyId, Result, RevealedSnapshot, SealbidError,
};

use crate::capability::RevealOracle;
use crate::guard::SubmissionGuard;
use crate::reveal::reveal_deal;

/// The engine: one instance serves all deals and all callers.
///
/// Holds no per-deal working state of its own — the ledger record is the
/// only source of truth, and every consumer re-reads it.
pub struct DealEngine {
    ledger: Arc<Ledger>,
    custody: Arc<AssetCustody>,
    oracle: Arc<dyn RevealOracle>,
    guard: SubmissionGuard,
}

impl DealEngine {
    #[must_use]
    pub fn new(
        ledger: Arc<Ledger>,
        custody: Arc<AssetCustody>,
        oracle: Arc<dyn RevealOracle>,
        config: EngineConfig,
    ) -> Self {
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            "Engine initialized"
        );
        Self {
            ledger,
            custody,
            oracle,
            guard: SubmissionGuard::new(config),
        }
    }

    /// Create a deal and escrow `asset_amount` of `asset_token` from the
    /// seller.
    ///
    /// # Errors
    /// - `InvalidAmount` if `asset_amount` is not strictly positive
    /// - `InvalidParty` for a P2P deal without a distinct buyer, or an open
    ///   deal created with one
    /// - `InsufficientBalance` if the seller cannot fund the escrow (in
    ///   which case no deal is created)
    pub fn create_deal(
        &self,
        seller: PartyId,
        mode: DealMode,
        buyer: Option<PartyId>,
        asset_token: &str,
        asset_amount: Decimal,
        pay_token: &str,
    ) -> Result<DealId> {
        if asset_amount <= Decimal::ZERO {
            return Err(SealbidError::InvalidAmount {
                amount: asset_amount,
            });
        }
        let buyer = match mode {
            DealMode::P2p => match buyer {
                Some(buyer) if buyer.is_nil() => {
                    return Err(SealbidError::InvalidParty {
                        reason: "P2P deal requires a buyer".into(),
                    });
                }
                Some(buyer) if buyer == seller => {
                    return Err(SealbidError::InvalidParty {
                        reason: "seller cannot be own counterparty".into(),
                    });
                }
                Some(buyer) => buyer,
                None => {
                    return Err(SealbidError::InvalidParty {
                        reason: "P2P deal requires a buyer".into(),
                    });
                }
            },
            DealMode::Open => {
                if buyer.is_some_and(|b| !b.is_nil()) {
                    return Err(SealbidError::InvalidParty {
                        reason: "open deal starts without a buyer".into(),
                    });
                }
                PartyId::nil()
            }
        };

        // Escrow first: if the freeze fails, no record exists.
        self.custody.escrow_lock(seller, asset_token, asset_amount)?;

        let now = Utc::now();
        let (deal_id, receipt) = self.ledger.create(|id| Deal {
            id,
            mode,
            seller,
            buyer,
            asset_token: asset_token.to_string(),
            asset_amount,
            pay_token: pay_token.to_string(),
            enc_ask: None,
            enc_bid: None,
            enc_threshold: None,
            revealed: None,
            state: DealState::Created,
            created_at: now,
            updated_at: now,
        });

        self.ledger.append_event(DealEvent::DealCreated {
            deal_id,
            seller,
            mode,
            asset_token: asset_token.to_string(),
            asset_amount,
            pay_token: pay_token.to_string(),
        });
        tracing::info!(
            deal = %deal_id,
            seller = %seller,
            mode = %mode,
            asset = asset_token,
            amount = %asset_amount,
            seq = receipt.sequence,
            "Deal created, escrow locked"
        );
        Ok(deal_id)
    }

    /// Record the seller's encrypted ask, optionally bundling the threshold
    /// in the same atomic commit.
    pub fn submit_ask(
        &self,
        deal_id: DealId,
        caller: PartyId,
        ask: EncryptedInput,
        threshold: Option<EncryptedInput>,
    ) -> Result<LedgerReceipt> {
        let ((), receipt) = self.ledger.commit(deal_id, LedgerOp::SubmitAsk, |deal| {
            self.guard.ensure_active(deal)?;
            self.guard.ensure_seller(deal, caller)?;
            self.guard.ensure_fresh(deal, deal.has_ask(), "ask")?;
            self.guard.ensure_proof(deal, &ask)?;
            if let Some(threshold) = &threshold {
                self.guard
                    .ensure_fresh(deal, deal.has_threshold(), "threshold")?;
                self.guard.ensure_proof(deal, threshold)?;
            }

            let target = if deal.has_bid() {
                DealState::Ready
            } else {
                DealState::AskSubmitted
            };
            if !deal.state.can_transition_to(target) {
                return Err(SealbidError::LedgerRejected {
                    reason: format!("illegal transition {} -> {target} on {deal_id}", deal.state),
                });
            }

            deal.enc_ask = Some(ask.handle);
            if let Some(threshold) = &threshold {
                deal.enc_threshold = Some(threshold.handle);
            }
            deal.state = target;
            Ok(())
        })?;

        self.ledger.append_event(DealEvent::AskSubmitted {
            deal_id,
            seller: caller,
        });
        if threshold.is_some() {
            self.ledger.append_event(DealEvent::ThresholdSet { deal_id });
        }
        tracing::debug!(
            deal = %deal_id,
            ct = %ask.handle.short(),
            seq = receipt.sequence,
            "Ask submitted"
        );
        Ok(receipt)
    }

    /// Record the buyer's encrypted bid. In open mode the first bidder
    /// becomes the locked buyer.
    pub fn submit_bid(
        &self,
        deal_id: DealId,
        caller: PartyId,
        bid: EncryptedInput,
    ) -> Result<LedgerReceipt> {
        let (locked_in, receipt) = self.ledger.commit(deal_id, LedgerOp::SubmitBid, |deal| {
            self.guard.ensure_active(deal)?;
            let locked_in = self.guard.ensure_bidder(deal, caller)?;
            self.guard.ensure_fresh(deal, deal.has_bid(), "bid")?;
            self.guard.ensure_proof(deal, &bid)?;

            let target = if deal.has_ask() {
                DealState::Ready
            } else {
                DealState::BidSubmitted
            };
            if !deal.state.can_transition_to(target) {
                return Err(SealbidError::LedgerRejected {
                    reason: format!("illegal transition {} -> {target} on {deal_id}", deal.state),
                });
            }

            if locked_in {
                deal.buyer = caller;
            }
            deal.enc_bid = Some(bid.handle);
            deal.state = target;
            Ok(locked_in)
        })?;

        self.ledger.append_event(DealEvent::BidSubmitted {
            deal_id,
            buyer: caller,
        });
        tracing::debug!(
            deal = %deal_id,
            buyer = %caller,
            ct = %bid.handle.short(),
            locked_in,
            seq = receipt.sequence,
            "Bid submitted"
        );
        Ok(receipt)
    }

    /// Record the seller's encrypted match threshold standalone, before or
    /// after the ask but always before a snapshot is bound.
    pub fn set_threshold(
        &self,
        deal_id: DealId,
        caller: PartyId,
        threshold: EncryptedInput,
    ) -> Result<LedgerReceipt> {
        let ((), receipt) = self
            .ledger
            .commit(deal_id, LedgerOp::SetThreshold, |deal| {
                self.guard.ensure_active(deal)?;
                self.guard.ensure_seller(deal, caller)?;
                self.guard
                    .ensure_fresh(deal, deal.has_threshold(), "threshold")?;
                self.guard.ensure_proof(deal, &threshold)?;
                if deal.revealed.is_some() {
                    return Err(SealbidError::AlreadyBound(deal_id));
                }

                deal.enc_threshold = Some(threshold.handle);
                Ok(())
            })?;

        self.ledger.append_event(DealEvent::ThresholdSet { deal_id });
        tracing::debug!(deal = %deal_id, seq = receipt.sequence, "Threshold set");
        Ok(receipt)
    }

    /// Read-only reveal: decrypt the stored ciphertexts and preview the
    /// match outcome. Callable by anyone, repeatable, no state change.
    pub fn reveal(&self, deal_id: DealId) -> Result<RevealedSnapshot> {
        let deal = self.ledger.read(deal_id, Clone::clone)?;
        reveal_deal(&deal, self.oracle.as_ref())
    }

    /// Bind the revealed snapshot into the deal record, the only step that
    /// makes the oracle's output authoritative. The engine performs its own
    /// reveal; it never accepts a caller-supplied snapshot.
    pub fn bind(&self, deal_id: DealId, caller: PartyId) -> Result<LedgerReceipt> {
        let (matched, receipt) = self.ledger.commit(deal_id, LedgerOp::Bind, |deal| {
            self.guard.ensure_active(deal)?;
            self.guard.ensure_participant(deal, caller)?;
            if !(deal.has_ask() && deal.has_bid()) {
                return Err(SealbidError::NotReady(deal_id));
            }
            if deal.revealed.is_some() {
                return Err(SealbidError::AlreadyBound(deal_id));
            }
            // Decrypt under the deal's commit lock: a threshold racing this
            // bind either lands first and is decrypted here, or arrives
            // after the snapshot is bound and fails `AlreadyBound`. The
            // working copy is current for the whole closure, so the bound
            // snapshot always reflects the committed ciphertext set.
            let snapshot = reveal_deal(deal, self.oracle.as_ref())?;
            deal.revealed = Some(snapshot);
            Ok(snapshot.matched)
        })?;

        self.ledger
            .append_event(DealEvent::SnapshotBound { deal_id, matched });
        tracing::info!(deal = %deal_id, matched, seq = receipt.sequence, "Snapshot bound");
        Ok(receipt)
    }

    /// Settle a matched deal: atomically move the escrowed asset to the
    /// buyer and the revealed ask price (in `pay_token`) from the buyer to
    /// the seller. Terminal on success.
    pub fn settle(&self, deal_id: DealId, caller: PartyId) -> Result<LedgerReceipt> {
        let (payment, receipt) = self.ledger.commit(deal_id, LedgerOp::Settle, |deal| {
            self.guard.ensure_active(deal)?;
            self.guard.ensure_participant(deal, caller)?;
            if deal.state != DealState::Ready {
                return Err(SealbidError::NotReady(deal_id));
            }
            let Some(snapshot) = deal.revealed else {
                // Ready but unbound: settlement never trusts a bare reveal.
                return Err(SealbidError::NotReady(deal_id));
            };
            if !snapshot.matched {
                return Err(SealbidError::NotMatched(deal_id));
            }

            let payment = Decimal::from(snapshot.ask_clear);
            self.custody.exchange(&ExchangeOrder {
                seller: deal.seller,
                buyer: deal.buyer,
                asset_token: deal.asset_token.clone(),
                asset_amount: deal.asset_amount,
                pay_token: deal.pay_token.clone(),
                payment,
            })?;

            deal.state = DealState::Settled;
            Ok(payment)
        })?;

        self.ledger
            .append_event(DealEvent::DealSettled { deal_id, payment });
        tracing::info!(deal = %deal_id, payment = %payment, seq = receipt.sequence, "Deal settled");
        Ok(receipt)
    }

    /// Cancel a non-terminal deal and return the escrowed asset to the
    /// seller. Callable by either participant or the admin party.
    pub fn cancel(&self, deal_id: DealId, caller: PartyId) -> Result<LedgerReceipt> {
        let ((), receipt) = self.ledger.commit(deal_id, LedgerOp::Cancel, |deal| {
            self.guard.ensure_active(deal)?;
            self.guard.ensure_participant_or_admin(deal, caller)?;

            self.custody
                .escrow_release(deal.seller, &deal.asset_token, deal.asset_amount)?;
            deal.state = DealState::Canceled;
            Ok(())
        })?;

        self.ledger.append_event(DealEvent::DealCanceled {
            deal_id,
            by: caller,
        });
        tracing::info!(deal = %deal_id, by = %caller, seq = receipt.sequence, "Deal canceled");
        Ok(receipt)
    }

    /// The full deal view (mode, parties, tokens, presence flags, bound
    /// snapshot, state) for consumption by any front end.
    pub fn deal_info(&self, deal_id: DealId) -> Result<DealView> {
        self.ledger.view(deal_id)
    }

    /// All observations recorded for a deal, in commit order.
    #[must_use]
    pub fn events(&self, deal_id: DealId) -> Vec<DealEvent> {
        self.ledger.events_for(deal_id)
    }
}
