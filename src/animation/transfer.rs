//! A single card transfer as an explicit step list.
//!
//! ## Step lists
//!
//! | kind | steps |
//! |---|---|
//! | direct-flip | move to slot, flip out, show face, flip in, settle |
//! | center-flip | move to center, flip out, show face, flip in, move to slot, settle |
//! | deck-return | move to slot, settle (card stays face-down) |
//! | back to deck | move to deck, flip out, show back, flip in, restore |
//!
//! Animated steps are suspension points: the transfer waits until the
//! surface reports the effect finished before taking the next step. Instant
//! steps (face swaps, settle, restore) run back to back.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace, warn};

use super::effect::{AnimationEffect, Keyframe, Timing};
use crate::assets::ArtSet;
use crate::core::{AnimationTimings, CardAnimation, CardValue, ElementId, SlotIndex};
use crate::deck::Card;
use crate::surface::{AnimationId, StyleProp, Surface};

/// Observable state of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPhase {
    Idle,
    MovingToCenter,
    MovingToTarget,
    Flipping,
    Settled,
    MovingToDeck,
    FlippingBack,
    ReturnedToDeck,
}

impl TransferPhase {
    /// Settled or returned.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TransferPhase::Settled | TransferPhase::ReturnedToDeck)
    }
}

/// Direction of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    /// Deck to slot, animated as configured.
    Forward(CardAnimation),
    /// Slot back to the deck during a reset.
    Return,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    MoveToSlot,
    MoveToCenter,
    MoveToDeck,
    FlipOut,
    ShowFace,
    ShowBack,
    FlipIn,
    Settle,
    Restore,
}

/// What a step needs from the game.
pub struct StepContext<'a, S: Surface> {
    pub surface: &'a mut S,
    pub art: &'a ArtSet,
    /// Reference box for center moves.
    pub game_root: ElementId,
    pub timings: &'a AnimationTimings,
}

/// One card travelling between the deck and a slot.
#[derive(Clone, Debug)]
pub struct Transfer {
    card: CardValue,
    card_element: ElementId,
    image_element: ElementId,
    /// Slot element for forward transfers, cards row for returns.
    destination: ElementId,
    slot: SlotIndex,
    kind: TransferKind,
    steps: SmallVec<[Step; 6]>,
    cursor: usize,
    phase: TransferPhase,
    running: Option<AnimationId>,
}

impl Transfer {
    /// Deck to `slot`.
    #[must_use]
    pub fn forward(card: &Card, slot: SlotIndex, slot_element: ElementId, animation: CardAnimation) -> Self {
        let steps: SmallVec<[Step; 6]> = match animation {
            CardAnimation::DirectFlip => smallvec![
                Step::MoveToSlot,
                Step::FlipOut,
                Step::ShowFace,
                Step::FlipIn,
                Step::Settle,
            ],
            CardAnimation::CenterFlip => smallvec![
                Step::MoveToCenter,
                Step::FlipOut,
                Step::ShowFace,
                Step::FlipIn,
                Step::MoveToSlot,
                Step::Settle,
            ],
            CardAnimation::DeckReturn => smallvec![Step::MoveToSlot, Step::Settle],
        };
        Self::with_steps(card, slot, slot_element, TransferKind::Forward(animation), steps)
    }

    /// From `slot` back into the cards row.
    #[must_use]
    pub fn back_to_deck(card: &Card, slot: SlotIndex, cards_row: ElementId) -> Self {
        let steps = smallvec![
            Step::MoveToDeck,
            Step::FlipOut,
            Step::ShowBack,
            Step::FlipIn,
            Step::Restore,
        ];
        Self::with_steps(card, slot, cards_row, TransferKind::Return, steps)
    }

    fn with_steps(
        card: &Card,
        slot: SlotIndex,
        destination: ElementId,
        kind: TransferKind,
        steps: SmallVec<[Step; 6]>,
    ) -> Self {
        Self {
            card: card.value,
            card_element: card.element,
            image_element: card.image,
            destination,
            slot,
            kind,
            steps,
            cursor: 0,
            phase: TransferPhase::Idle,
            running: None,
        }
    }

    #[must_use]
    pub fn card(&self) -> CardValue {
        self.card
    }

    #[must_use]
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    #[must_use]
    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    /// Run steps until one suspends or the list is exhausted.
    ///
    /// Returns true once the transfer reached its terminal phase.
    pub fn advance<S: Surface>(&mut self, cx: &mut StepContext<'_, S>) -> bool {
        loop {
            if let Some(animation) = self.running {
                if !cx.surface.animation_finished(animation) {
                    return false;
                }
                self.running = None;
            }

            let Some(&step) = self.steps.get(self.cursor) else {
                self.phase = match self.kind {
                    TransferKind::Forward(_) => TransferPhase::Settled,
                    TransferKind::Return => TransferPhase::ReturnedToDeck,
                };
                trace!(card = %self.card, phase = ?self.phase, "transfer finished");
                return true;
            };
            self.cursor += 1;
            self.running = self.run(step, cx);
        }
    }

    fn run<S: Surface>(&mut self, step: Step, cx: &mut StepContext<'_, S>) -> Option<AnimationId> {
        trace!(card = %self.card, ?step, "transfer step");
        match step {
            Step::MoveToSlot | Step::MoveToCenter | Step::MoveToDeck => self.move_card(step, cx),
            Step::FlipOut => {
                self.phase = self.flip_phase();
                Some(self.rotate(cx, 0.0, 90.0))
            }
            Step::FlipIn => {
                self.phase = self.flip_phase();
                Some(self.rotate(cx, 90.0, 0.0))
            }
            Step::ShowFace => {
                match cx.art.face(self.card) {
                    Some(face) => cx.surface.set_image(self.image_element, face),
                    None => warn!(card = %self.card, "no face art for card, leaving it face-down"),
                }
                None
            }
            Step::ShowBack => {
                cx.surface.set_image(self.image_element, cx.art.back());
                None
            }
            Step::Settle => {
                cx.surface.set_style(self.destination, StyleProp::ZIndex(0));
                None
            }
            Step::Restore => {
                cx.surface.set_class(self.card_element, "card");
                None
            }
        }
    }

    fn flip_phase(&self) -> TransferPhase {
        match self.kind {
            TransferKind::Forward(_) => TransferPhase::Flipping,
            TransferKind::Return => TransferPhase::FlippingBack,
        }
    }

    fn rotate<S: Surface>(&self, cx: &mut StepContext<'_, S>, from: f64, to: f64) -> AnimationId {
        let effect = AnimationEffect::between(
            Keyframe::rotate_y(from),
            Keyframe::rotate_y(to),
            Timing::snap(cx.timings.flip_ms),
        );
        cx.surface.animate(self.card_element, effect)
    }

    fn move_card<S: Surface>(&mut self, step: Step, cx: &mut StepContext<'_, S>) -> Option<AnimationId> {
        let (reference, phase) = match step {
            Step::MoveToCenter => (cx.game_root, TransferPhase::MovingToCenter),
            Step::MoveToDeck => (self.destination, TransferPhase::MovingToDeck),
            _ => (self.destination, TransferPhase::MovingToTarget),
        };
        self.phase = phase;

        if !cx.surface.contains(reference) {
            debug!(card = %self.card, %reference, "move reference left the document, skipping move");
            return None;
        }

        let card_rect = cx.surface.bounding_rect(self.card_element);
        let reference_rect = cx.surface.bounding_rect(reference);
        let border = cx.surface.border(reference);

        // Start where the card is now, expressed in the reference's padding box.
        let (dx, dy) = card_rect.offset_from(&reference_rect);
        let from = (dx - border.left, dy - border.top);

        let to = match step {
            Step::MoveToCenter => {
                let (left, top) = reference_rect.centered_origin(card_rect.width, card_rect.height);
                (left - border.left, top - border.top)
            }
            Step::MoveToDeck => (from.0, -border.top),
            _ => (-border.left, -border.top),
        };

        if step == Step::MoveToDeck {
            cx.surface.set_style(reference, StyleProp::ZIndex(1));
        }
        cx.surface.append_child(reference, self.card_element);

        let effect = AnimationEffect::between(
            Keyframe::position(from.0, from.1),
            Keyframe::position(to.0, to.1),
            Timing::snap(cx.timings.move_ms),
        );
        Some(cx.surface.animate(self.card_element, effect))
    }
}
