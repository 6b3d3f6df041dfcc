//! Slot elements and their occupants.

use rustc_hash::FxHashMap;

use crate::core::{CardValue, ElementId, SlotIndex};
use crate::surface::{ElementKind, Surface};

/// Direct index from slot ordinal to element and back, with the card
/// committed to each slot.
#[derive(Clone, Debug, Default)]
pub struct SlotRow {
    elements: Vec<ElementId>,
    by_element: FxHashMap<ElementId, SlotIndex>,
    occupants: Vec<Option<CardValue>>,
}

impl SlotRow {
    /// Render `count` empty slots into `container`.
    pub fn build<S: Surface>(surface: &mut S, container: ElementId, count: usize) -> Self {
        let elements: Vec<ElementId> = (0..count)
            .map(|i| {
                let slot = surface.create_element(ElementKind::Slot);
                surface.set_class(slot, "empty-slot");
                surface.set_attribute(slot, "data-order", &i.to_string());
                surface.append_child(container, slot);
                slot
            })
            .collect();

        let by_element = elements
            .iter()
            .enumerate()
            .map(|(i, &element)| (element, SlotIndex(i)))
            .collect();

        Self {
            occupants: vec![None; elements.len()],
            elements,
            by_element,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Slot elements by ordinal.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, slot: SlotIndex) -> Option<ElementId> {
        self.elements.get(slot.raw()).copied()
    }

    #[must_use]
    pub fn slot_for_element(&self, element: ElementId) -> Option<SlotIndex> {
        self.by_element.get(&element).copied()
    }

    /// Record the card committed to `slot`.
    pub fn occupy(&mut self, slot: SlotIndex, card: CardValue) {
        if let Some(occupant) = self.occupants.get_mut(slot.raw()) {
            *occupant = Some(card);
        }
    }

    #[must_use]
    pub fn occupant(&self, slot: SlotIndex) -> Option<CardValue> {
        self.occupants.get(slot.raw()).copied().flatten()
    }

    /// Occupied slots with their cards, by ordinal.
    pub fn occupants(&self) -> impl Iterator<Item = (SlotIndex, CardValue)> + '_ {
        self.occupants
            .iter()
            .enumerate()
            .filter_map(|(i, card)| card.map(|card| (SlotIndex(i), card)))
    }

    pub fn clear_occupants(&mut self) {
        self.occupants.iter_mut().for_each(|occupant| *occupant = None);
    }
}
