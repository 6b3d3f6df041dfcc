//! Interaction resolution.
//!
//! Maps a raw pointer event to the transfer it asks for, without touching
//! any state. Two intents are recognized:
//!
//! - **Card first**: the target is a face-down card (or its image). The card
//!   goes to the lowest-ordinal empty slot.
//! - **Slot first**: the target is an empty slot. A face-down card is drawn
//!   uniformly at random from the available set.
//!
//! Everything else resolves to [`Resolution::Noop`] with the reason it was
//! rejected. Occupancy is re-checked here on every dispatch, so the second
//! half of a click + double-click pair finds its slot already committed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CardValue, ElementId, GameRng, SlotIndex};
use crate::deck::{CardState, Deck};
use crate::slots::{SlotRow, SlotTracker};

/// Pointer events the game listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Click,
    DoubleClick,
}

/// A pointer event as dispatched by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Innermost element under the pointer.
    pub target: ElementId,
}

impl PointerEvent {
    #[must_use]
    pub fn click(target: ElementId) -> Self {
        Self {
            kind: PointerKind::Click,
            target,
        }
    }

    #[must_use]
    pub fn double_click(target: ElementId) -> Self {
        Self {
            kind: PointerKind::DoubleClick,
            target,
        }
    }
}

/// Why an event maps to no action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoopReason {
    /// A bulk layout pass holds the latch.
    AnimationInProgress,
    /// Not a face-down card, its image, or a slot.
    UnrecognizedTarget,
    /// Every slot is filled.
    RoundComplete,
    NoEmptySlot,
    /// The slot was committed earlier, possibly by the same gesture.
    SlotTaken,
    /// No face-down card is left to draw.
    DeckExhausted,
}

/// Outcome of resolving one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Transfer { card: CardValue, slot: SlotIndex },
    Noop(NoopReason),
}

impl Resolution {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Resolution::Noop(_))
    }
}

/// Read-only view of the state a resolution depends on.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub deck: &'a Deck,
    pub slots: &'a SlotRow,
    pub tracker: &'a SlotTracker,
    pub animation_in_progress: bool,
    /// Slots still to fill this round.
    pub remaining: usize,
}

enum Target {
    Card(CardValue),
    Slot(SlotIndex),
}

/// Resolve `event` against the current state.
///
/// Slot-first picks draw from `rng`; nothing else is mutated.
pub fn resolve(event: &PointerEvent, cx: &ResolveContext<'_>, rng: &mut GameRng) -> Resolution {
    let resolution = resolve_inner(event, cx, rng);
    if let Resolution::Noop(reason) = resolution {
        debug!(target_element = %event.target, kind = ?event.kind, ?reason, "interaction ignored");
    }
    resolution
}

fn resolve_inner(event: &PointerEvent, cx: &ResolveContext<'_>, rng: &mut GameRng) -> Resolution {
    if cx.animation_in_progress {
        return Resolution::Noop(NoopReason::AnimationInProgress);
    }

    let Some(target) = classify(event.target, cx) else {
        return Resolution::Noop(NoopReason::UnrecognizedTarget);
    };

    if cx.remaining == 0 {
        return Resolution::Noop(NoopReason::RoundComplete);
    }

    match target {
        Target::Card(card) => match cx.tracker.find_first_empty() {
            Some(slot) => Resolution::Transfer { card, slot },
            None => Resolution::Noop(NoopReason::NoEmptySlot),
        },
        Target::Slot(slot) => {
            if !cx.tracker.is_available(slot) {
                return Resolution::Noop(NoopReason::SlotTaken);
            }
            match rng.choose(cx.deck.available()) {
                Some(&card) => Resolution::Transfer { card, slot },
                None => Resolution::Noop(NoopReason::DeckExhausted),
            }
        }
    }
}

fn classify(element: ElementId, cx: &ResolveContext<'_>) -> Option<Target> {
    if let Some(card) = cx.deck.card_for_element(element) {
        // Chosen cards sit in slots and are no longer pickable.
        return (card.state == CardState::FaceDown).then_some(Target::Card(card.value));
    }
    cx.slots.slot_for_element(element).map(Target::Slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageRef;
    use crate::deck::build_deck;
    use crate::surface::{ElementKind, MemorySurface, Surface};

    struct Table {
        deck: Deck,
        slots: SlotRow,
        tracker: SlotTracker,
        rng: GameRng,
    }

    impl Table {
        fn new(cards: usize, slots: usize) -> Self {
            let mut surface = MemorySurface::default();
            let doc = surface.document();
            let cards_row = surface.create_element(ElementKind::CardsRow);
            surface.append_child(doc, cards_row);
            let slot_row = surface.create_element(ElementKind::SlotRow);
            surface.append_child(doc, slot_row);

            let mut rng = GameRng::new(7);
            let deck = build_deck(&mut surface, cards_row, cards, ImageRef(0), &mut rng);
            Self {
                deck,
                slots: SlotRow::build(&mut surface, slot_row, slots),
                tracker: SlotTracker::new(slots),
                rng: GameRng::new(11),
            }
        }

        fn resolve(&mut self, event: PointerEvent) -> Resolution {
            let cx = ResolveContext {
                deck: &self.deck,
                slots: &self.slots,
                tracker: &self.tracker,
                animation_in_progress: false,
                remaining: self.tracker.len() - self.tracker.occupied_count(),
            };
            resolve(&event, &cx, &mut self.rng)
        }

        fn commit(&mut self, resolution: Resolution) {
            if let Resolution::Transfer { card, slot } = resolution {
                self.tracker.mark_occupied(slot).unwrap();
                self.deck.mark_chosen(card);
                self.slots.occupy(slot, card);
            }
        }

        fn card_element(&self, value: u32) -> ElementId {
            self.deck.card(CardValue(value)).unwrap().element
        }
    }

    #[test]
    fn test_card_goes_to_lowest_empty_slot() {
        let mut table = Table::new(22, 5);
        table.tracker.mark_occupied(SlotIndex(0)).unwrap();

        let resolution = table.resolve(PointerEvent::click(table.card_element(7)));
        assert_eq!(resolution, Resolution::Transfer { card: CardValue(7), slot: SlotIndex(1) });
    }

    #[test]
    fn test_image_resolves_to_card() {
        let mut table = Table::new(22, 5);
        let image = table.deck.card(CardValue(3)).unwrap().image;

        let resolution = table.resolve(PointerEvent::click(image));
        assert_eq!(resolution, Resolution::Transfer { card: CardValue(3), slot: SlotIndex(0) });
    }

    #[test]
    fn test_slot_draws_available_card() {
        let mut table = Table::new(22, 5);
        table.deck.mark_chosen(CardValue(4));
        let slot = table.slots.element(SlotIndex(2)).unwrap();

        for _ in 0..50 {
            match table.resolve(PointerEvent::click(slot)) {
                Resolution::Transfer { card, slot } => {
                    assert_eq!(slot, SlotIndex(2));
                    assert_ne!(card, CardValue(4));
                    assert!(card.index() < 22);
                }
                other => panic!("expected transfer, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_slot_draw_is_uniform() {
        let mut table = Table::new(22, 5);
        let slot = table.slots.element(SlotIndex(0)).unwrap();

        let mut counts = [0usize; 22];
        for _ in 0..22_000 {
            match table.resolve(PointerEvent::click(slot)) {
                Resolution::Transfer { card, .. } => counts[card.index()] += 1,
                other => panic!("expected transfer, got {other:?}"),
            }
        }

        for (value, &count) in counts.iter().enumerate() {
            assert!((850..=1150).contains(&count), "card {value} drawn {count} times");
        }
    }

    #[test]
    fn test_double_fire_on_slot() {
        let mut table = Table::new(22, 5);
        let slot = table.slots.element(SlotIndex(2)).unwrap();

        let first = table.resolve(PointerEvent::click(slot));
        assert!(!first.is_noop());
        table.commit(first);

        assert_eq!(
            table.resolve(PointerEvent::double_click(slot)),
            Resolution::Noop(NoopReason::SlotTaken)
        );
    }

    #[test]
    fn test_double_fire_on_card() {
        let mut table = Table::new(22, 5);
        let element = table.card_element(7);

        let first = table.resolve(PointerEvent::click(element));
        table.commit(first);

        assert_eq!(
            table.resolve(PointerEvent::double_click(element)),
            Resolution::Noop(NoopReason::UnrecognizedTarget)
        );
        assert_eq!(table.tracker.occupied_count(), 1);
    }

    #[test]
    fn test_latch_rejects_everything() {
        let mut table = Table::new(5, 2);
        let cx = ResolveContext {
            deck: &table.deck,
            slots: &table.slots,
            tracker: &table.tracker,
            animation_in_progress: true,
            remaining: 2,
        };
        let event = PointerEvent::click(table.deck.cards()[0].element);

        assert_eq!(resolve(&event, &cx, &mut table.rng), Resolution::Noop(NoopReason::AnimationInProgress));
    }

    #[test]
    fn test_unknown_target() {
        let mut table = Table::new(5, 2);
        assert_eq!(
            table.resolve(PointerEvent::click(ElementId(9_999))),
            Resolution::Noop(NoopReason::UnrecognizedTarget)
        );
    }

    #[test]
    fn test_round_complete() {
        let mut table = Table::new(5, 2);
        for value in [0, 1] {
            let resolution = table.resolve(PointerEvent::click(table.card_element(value)));
            table.commit(resolution);
        }

        assert_eq!(
            table.resolve(PointerEvent::click(table.card_element(2))),
            Resolution::Noop(NoopReason::RoundComplete)
        );
    }

    #[test]
    fn test_no_empty_slot_when_counts_disagree() {
        let mut table = Table::new(5, 1);
        table.tracker.mark_occupied(SlotIndex(0)).unwrap();
        let cx = ResolveContext {
            deck: &table.deck,
            slots: &table.slots,
            tracker: &table.tracker,
            animation_in_progress: false,
            remaining: 1,
        };
        let event = PointerEvent::click(table.deck.cards()[0].element);

        assert_eq!(resolve(&event, &cx, &mut table.rng), Resolution::Noop(NoopReason::NoEmptySlot));
    }

    #[test]
    fn test_deck_exhausted() {
        let mut table = Table::new(1, 1);
        table.deck.mark_chosen(CardValue(0));
        let slot = table.slots.element(SlotIndex(0)).unwrap();

        assert_eq!(table.resolve(PointerEvent::click(slot)), Resolution::Noop(NoopReason::DeckExhausted));
    }
}
