//! Submission guard — role-based write permission and at-most-once slots.
//!
//! These checks run inside the ledger's commit closure, against the record
//! as committed, so they are authoritative. The same functions may be called
//! earlier as advisory client-side checks to avoid wasted ledger calls; an
//! advisory pass never guarantees a ledger-side success.

use sealbid_types::{Deal, DealState, EncryptedInput, EngineConfig, PartyId, Result, SealbidError};

/// Permission and freshness checks for every mutating operation.
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    config: EngineConfig,
}

impl SubmissionGuard {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Reject terminal deals with the matching stale-state error.
    pub fn ensure_active(&self, deal: &Deal) -> Result<()> {
        match deal.state {
            DealState::Settled => Err(SealbidError::AlreadySettled(deal.id)),
            DealState::Canceled => Err(SealbidError::AlreadyCanceled(deal.id)),
            _ => Ok(()),
        }
    }

    /// Caller must be the seller.
    pub fn ensure_seller(&self, deal: &Deal, caller: PartyId) -> Result<()> {
        if caller == deal.seller {
            Ok(())
        } else {
            Err(SealbidError::Unauthorized {
                reason: format!("{caller} is not the seller of {}", deal.id),
            })
        }
    }

    /// Caller must be allowed to bid. In open mode with no buyer yet, any
    /// party except the seller may bid and becomes the locked buyer;
    /// returns `true` in that lock-in case.
    pub fn ensure_bidder(&self, deal: &Deal, caller: PartyId) -> Result<bool> {
        if deal.buyer.is_nil() {
            // Only reachable in open mode before the first bid.
            if caller == deal.seller {
                return Err(SealbidError::Unauthorized {
                    reason: format!("seller cannot bid on own deal {}", deal.id),
                });
            }
            return Ok(true);
        }
        if caller == deal.buyer {
            Ok(false)
        } else {
            Err(SealbidError::Unauthorized {
                reason: format!("{caller} is not the buyer of {}", deal.id),
            })
        }
    }

    /// Caller must be the seller or the assigned buyer.
    pub fn ensure_participant(&self, deal: &Deal, caller: PartyId) -> Result<()> {
        if deal.is_participant(caller) {
            Ok(())
        } else {
            Err(SealbidError::Unauthorized {
                reason: format!("{caller} is not a participant of {}", deal.id),
            })
        }
    }

    /// Caller must be a participant or the configured admin party.
    pub fn ensure_participant_or_admin(&self, deal: &Deal, caller: PartyId) -> Result<()> {
        if self.config.is_admin(caller) {
            return Ok(());
        }
        self.ensure_participant(deal, caller)
    }

    /// A ciphertext slot may be written exactly once.
    pub fn ensure_fresh(&self, deal: &Deal, present: bool, what: &str) -> Result<()> {
        if present {
            Err(SealbidError::DuplicateSubmission {
                deal_id: deal.id,
                what: what.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Every submission must carry a binding proof (when configured).
    pub fn ensure_proof(&self, deal: &Deal, input: &EncryptedInput) -> Result<()> {
        if self.config.require_proofs && input.proof.is_empty() {
            return Err(SealbidError::LedgerRejected {
                reason: format!("missing binding proof on {}", deal.id),
            });
        }
        Ok(())
    }
}
