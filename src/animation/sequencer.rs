//! Cooperative scheduler for in-flight transfers.
//!
//! Transfers do not exclude each other: two cards may fly to two slots at
//! the same time. Bookkeeping for a transfer is committed before it is
//! started, so the sequencer only drives visuals and reports completions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::transfer::{StepContext, Transfer, TransferKind, TransferPhase};
use crate::core::{CardValue, SlotIndex};
use crate::surface::Surface;

/// A transfer that reached its terminal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub card: CardValue,
    pub slot: SlotIndex,
    pub kind: TransferKind,
}

impl TransferOutcome {
    fn of(transfer: &Transfer) -> Self {
        Self {
            card: transfer.card(),
            slot: transfer.slot(),
            kind: transfer.kind(),
        }
    }
}

/// Drives every in-flight transfer one step at a time.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    in_flight: Vec<Transfer>,
    completed: Vec<TransferOutcome>,
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transfer. Runs until its first suspension point.
    pub fn start<S: Surface>(&mut self, mut transfer: Transfer, cx: &mut StepContext<'_, S>) {
        debug!(card = %transfer.card(), slot = %transfer.slot(), kind = ?transfer.kind(), "transfer started");
        if transfer.advance(cx) {
            self.completed.push(TransferOutcome::of(&transfer));
        } else {
            self.in_flight.push(transfer);
        }
    }

    /// Resume every transfer whose pending effect finished.
    ///
    /// Returns the transfers that completed since the last poll, in
    /// completion order.
    pub fn poll<S: Surface>(&mut self, cx: &mut StepContext<'_, S>) -> Vec<TransferOutcome> {
        let mut completed = std::mem::take(&mut self.completed);

        self.in_flight.retain_mut(|transfer| {
            if transfer.advance(cx) {
                completed.push(TransferOutcome::of(transfer));
                false
            } else {
                true
            }
        });

        completed
    }

    /// Number of transfers not yet complete.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// No transfers running and no unreported completions.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.completed.is_empty()
    }

    /// Any deck-to-slot transfer still running?
    #[must_use]
    pub fn has_forward_in_flight(&self) -> bool {
        self.in_flight
            .iter()
            .any(|transfer| matches!(transfer.kind(), TransferKind::Forward(_)))
    }

    /// Phase of the running transfer for `card`, if any.
    #[must_use]
    pub fn phase(&self, card: CardValue) -> Option<TransferPhase> {
        self.in_flight
            .iter()
            .find(|transfer| transfer.card() == card)
            .map(Transfer::phase)
    }
}
