//! Identifier types.
//!
//! Three kinds of identity flow through the engine:
//!
//! - `CardValue`: which card face a placeholder hides, drawn from a
//!   permutation of `0..number_of_cards`
//! - `SlotIndex`: ordinal of a result slot, `0..number_of_empty_slots`
//! - `ElementId`: opaque handle to a rendered element, issued by the `Surface`
//!
//! ## Usage
//!
//! ```
//! use tarot_spread::core::{CardValue, SlotIndex};
//!
//! let card = CardValue::new(7);
//! assert_eq!(card.index(), 7);
//! assert_eq!(card.to_string(), "Card(7)");
//!
//! let slot = SlotIndex::new(0);
//! assert_eq!(slot.to_string(), "Slot(0)");
//! ```

use serde::{Deserialize, Serialize};

/// The face value of a card.
///
/// Values are unique within a deal. The value doubles as the index of the
/// card's face art in the `ArtSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardValue(pub u32);

impl CardValue {
    /// Create a card value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the value as an index into face art.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Ordinal position of a result slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    /// Create a slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw ordinal.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Handle to a rendered element.
///
/// Issued by a `Surface`; the engine never interprets the number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_value_ordering() {
        let mut values = vec![CardValue(3), CardValue(0), CardValue(2)];
        values.sort();
        assert_eq!(values, vec![CardValue(0), CardValue(2), CardValue(3)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardValue(21)), "Card(21)");
        assert_eq!(format!("{}", SlotIndex(4)), "Slot(4)");
        assert_eq!(format!("{}", ElementId(9)), "Element(9)");
    }

    #[test]
    fn test_serialization() {
        let value = CardValue(13);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "13");
        let back: CardValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
