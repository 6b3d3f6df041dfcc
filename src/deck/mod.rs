//! Deck building and card lookup.
//!
//! A deal lays `count` face-down placeholders into the cards row, each
//! tagged with a unique value from a uniform random permutation. The `Deck`
//! keeps an explicit index from value and from element (card root or its
//! image) to the card, plus the set of cards still available for picking,
//! so no decision ever depends on re-querying the surface.

mod builder;

pub use builder::build_deck;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CardValue, ElementId};

/// Visual state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    Chosen,
}

/// A dealt card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub value: CardValue,
    /// Position in the deal, left to right.
    pub order: usize,
    pub element: ElementId,
    /// The image child showing either the back or the face.
    pub image: ElementId,
    pub state: CardState,
}

/// All cards of one deal.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
    by_value: FxHashMap<CardValue, usize>,
    by_element: FxHashMap<ElementId, usize>,
    /// Face-down cards not yet assigned to a slot.
    available: Vec<CardValue>,
}

impl Deck {
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        let mut by_value = FxHashMap::default();
        let mut by_element = FxHashMap::default();
        let mut available = Vec::with_capacity(cards.len());

        for (i, card) in cards.iter().enumerate() {
            by_value.insert(card.value, i);
            by_element.insert(card.element, i);
            by_element.insert(card.image, i);
            if card.state == CardState::FaceDown {
                available.push(card.value);
            }
        }

        Self {
            cards,
            by_value,
            by_element,
            available,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Values in deal order.
    pub fn values(&self) -> impl Iterator<Item = CardValue> + '_ {
        self.cards.iter().map(|card| card.value)
    }

    #[must_use]
    pub fn card(&self, value: CardValue) -> Option<&Card> {
        self.by_value.get(&value).map(|&i| &self.cards[i])
    }

    /// Card owning `element`, which may be the card root or its image.
    #[must_use]
    pub fn card_for_element(&self, element: ElementId) -> Option<&Card> {
        self.by_element.get(&element).map(|&i| &self.cards[i])
    }

    /// Face-down cards that can still be picked, in deal order.
    #[must_use]
    pub fn available(&self) -> &[CardValue] {
        &self.available
    }

    /// Elements of face-down cards, in deal order.
    #[must_use]
    pub fn face_down_elements(&self) -> Vec<ElementId> {
        self.cards
            .iter()
            .filter(|card| card.state == CardState::FaceDown)
            .map(|card| card.element)
            .collect()
    }

    /// Mark a card chosen and drop it from the available set.
    ///
    /// Returns false if the card is unknown or already chosen.
    pub fn mark_chosen(&mut self, value: CardValue) -> bool {
        let Some(&i) = self.by_value.get(&value) else {
            return false;
        };
        if self.cards[i].state == CardState::Chosen {
            return false;
        }
        self.cards[i].state = CardState::Chosen;
        self.available.retain(|&v| v != value);
        true
    }

    /// Put a chosen card back face-down.
    pub fn mark_face_down(&mut self, value: CardValue) -> bool {
        let Some(&i) = self.by_value.get(&value) else {
            return false;
        };
        if self.cards[i].state == CardState::FaceDown {
            return false;
        }
        self.cards[i].state = CardState::FaceDown;
        self.available = self
            .cards
            .iter()
            .filter(|card| card.state == CardState::FaceDown)
            .map(|card| card.value)
            .collect();
        true
    }
}
