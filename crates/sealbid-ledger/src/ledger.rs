//! The deal record store — append-only, transactionally atomic.
//!
//! Deals live behind one lock each; a mutating operation clones the record,
//! runs the caller's closure on the working copy, and writes the copy back
//! only when the closure succeeds. Any mutating operation the ledger accepts
//! is final and irreversible; a rejected one leaves no trace beyond the
//! error. Each deal is an independent unit of serialization — there is no
//! cross-deal locking.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use sealbid_types::{Deal, DealEvent, DealId, DealView, LedgerOp, LedgerReceipt, Result, SealbidError};

/// Reference ledger implementation.
#[derive(Default)]
pub struct Ledger {
    deals: RwLock<HashMap<DealId, Arc<Mutex<Deal>>>>,
    /// Last assigned deal ID; IDs start at 1.
    next_id: AtomicU64,
    /// Global commit sequence across all deals.
    sequence: AtomicU64,
    /// Append-only observation log.
    events: Mutex<Vec<DealEvent>>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next monotonic [`DealId`] and insert the record built
    /// for it. The builder receives the assigned ID so the stored record
    /// always carries it. Creation commits like any other mutation and
    /// returns a receipt alongside the new ID.
    pub fn create(&self, build: impl FnOnce(DealId) -> Deal) -> (DealId, LedgerReceipt) {
        let id = DealId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut deal = build(id);
        deal.id = id;
        self.deals.write().insert(id, Arc::new(Mutex::new(deal)));
        let receipt = LedgerReceipt {
            deal_id: id,
            op: LedgerOp::Create,
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            committed_at: Utc::now(),
        };
        (id, receipt)
    }

    /// Run a read-only closure against the committed record.
    ///
    /// # Errors
    /// Returns `DealNotFound` for unknown IDs.
    pub fn read<R>(&self, deal_id: DealId, f: impl FnOnce(&Deal) -> R) -> Result<R> {
        let slot = self.slot(deal_id)?;
        let deal = slot.lock();
        Ok(f(&deal))
    }

    /// The full deal view for front-end consumption.
    pub fn view(&self, deal_id: DealId) -> Result<DealView> {
        self.read(deal_id, Deal::view)
    }

    /// Run a mutating closure with commit-or-discard semantics.
    ///
    /// The closure mutates a working copy under the deal's lock. On `Ok`
    /// the copy is committed, `updated_at` is bumped, and a receipt with
    /// the global commit sequence is returned. On `Err` the committed
    /// record is untouched.
    ///
    /// Holding the deal lock across the closure is what gives "at most one
    /// successful mutating call per deal at a time": a racing caller blocks
    /// here and then observes the winner's committed state.
    pub fn commit<R>(
        &self,
        deal_id: DealId,
        op: LedgerOp,
        f: impl FnOnce(&mut Deal) -> Result<R>,
    ) -> Result<(R, LedgerReceipt)> {
        let slot = self.slot(deal_id)?;
        let mut committed = slot.lock();

        let mut working = committed.clone();
        let out = f(&mut working)?;
        working.updated_at = Utc::now();

        let receipt = LedgerReceipt {
            deal_id,
            op,
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            committed_at: working.updated_at,
        };
        *committed = working;

        tracing::debug!(deal = %deal_id, op = %op, seq = receipt.sequence, "Ledger commit");
        Ok((out, receipt))
    }

    /// Append an observation to the event log.
    pub fn append_event(&self, event: DealEvent) {
        self.events.lock().push(event);
    }

    /// All observations for one deal, in append order.
    #[must_use]
    pub fn events_for(&self, deal_id: DealId) -> Vec<DealEvent> {
        self.events
            .lock()
            .iter()
            .filter(|ev| ev.deal_id() == deal_id)
            .cloned()
            .collect()
    }

    /// Number of deals ever created.
    #[must_use]
    pub fn deal_count(&self) -> usize {
        self.deals.read().len()
    }

    fn slot(&self, deal_id: DealId) -> Result<Arc<Mutex<Deal>>> {
        self.deals
            .read()
            .get(&deal_id)
            .cloned()
            .ok_or(SealbidError::DealNotFound(deal_id))
    }
}
