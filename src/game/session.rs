//! Per-page game state.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::CardValue;

/// State shared by every operation of one game.
///
/// Created once per page; `reset` clears it in place for the next round.
/// `chosen_cards` is persistent so snapshots handed to the page are O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Revealed values in the order they were committed.
    pub chosen_cards: Vector<CardValue>,
    /// Latch held while a bulk layout pass animates.
    pub animation_in_progress: bool,
    /// Slots left to fill this round.
    pub remaining_slots: usize,
    /// Submit / new-game controls are shown.
    pub controls_visible: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            remaining_slots: slots,
            ..Self::default()
        }
    }

    /// Record a committed transfer.
    pub fn commit(&mut self, card: CardValue) {
        self.chosen_cards.push_back(card);
        self.remaining_slots = self.remaining_slots.saturating_sub(1);
    }

    /// Drop the most recently committed value.
    pub fn pop_chosen(&mut self) -> Option<CardValue> {
        self.chosen_cards.pop_back()
    }

    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.remaining_slots == 0
    }

    /// Start a fresh round with `slots` empty slots.
    pub fn reset(&mut self, slots: usize) {
        self.chosen_cards.clear();
        self.remaining_slots = slots;
        self.controls_visible = false;
    }
}
