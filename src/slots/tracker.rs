//! Fill state of result slots.

use serde::{Deserialize, Serialize};

use crate::core::{SlotError, SlotIndex};

/// One flag per slot ordinal: true once a card was committed to it.
///
/// A slot goes empty to occupied exactly once per round; slots only empty
/// again through `reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTracker {
    occupied: Vec<bool>,
}

impl SlotTracker {
    /// Tracker with `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            occupied: vec![false; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Commit a card to `index`.
    pub fn mark_occupied(&mut self, index: SlotIndex) -> Result<(), SlotError> {
        let len = self.occupied.len();
        let slot = self
            .occupied
            .get_mut(index.raw())
            .ok_or(SlotError::OutOfRange { index: index.raw(), len })?;
        if *slot {
            return Err(SlotError::Occupied { index });
        }
        *slot = true;
        Ok(())
    }

    /// Lowest-ordinal empty slot: where a card-first pick lands.
    #[must_use]
    pub fn find_first_empty(&self) -> Option<SlotIndex> {
        self.occupied.iter().position(|&taken| !taken).map(SlotIndex)
    }

    /// Is `index` a valid, empty slot?
    #[must_use]
    pub fn is_available(&self, index: SlotIndex) -> bool {
        matches!(self.occupied.get(index.raw()), Some(false))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&taken| taken).count()
    }

    /// Ordinals of occupied slots, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, &taken)| taken)
            .map(|(i, _)| SlotIndex(i))
    }

    /// Empty every slot and resize to `len`.
    pub fn reset(&mut self, len: usize) {
        self.occupied.clear();
        self.occupied.resize(len, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let tracker = SlotTracker::new(5);
        assert_eq!(tracker.len(), 5);
        assert_eq!(tracker.occupied_count(), 0);
        assert_eq!(tracker.find_first_empty(), Some(SlotIndex(0)));
        assert!(SlotTracker::new(0).is_empty());
    }

    #[test]
    fn test_first_empty_is_lowest() {
        let mut tracker = SlotTracker::new(5);
        tracker.mark_occupied(SlotIndex(0)).unwrap();
        tracker.mark_occupied(SlotIndex(2)).unwrap();

        assert_eq!(tracker.find_first_empty(), Some(SlotIndex(1)));
        assert_eq!(tracker.occupied().collect::<Vec<_>>(), vec![SlotIndex(0), SlotIndex(2)]);
    }

    #[test]
    fn test_mark_occupied_errors() {
        let mut tracker = SlotTracker::new(2);

        assert_eq!(
            tracker.mark_occupied(SlotIndex(2)),
            Err(SlotError::OutOfRange { index: 2, len: 2 })
        );

        tracker.mark_occupied(SlotIndex(1)).unwrap();
        assert_eq!(
            tracker.mark_occupied(SlotIndex(1)),
            Err(SlotError::Occupied { index: SlotIndex(1) })
        );
        assert_eq!(tracker.occupied_count(), 1);
    }

    #[test]
    fn test_is_available() {
        let mut tracker = SlotTracker::new(2);
        tracker.mark_occupied(SlotIndex(0)).unwrap();

        assert!(!tracker.is_available(SlotIndex(0)));
        assert!(tracker.is_available(SlotIndex(1)));
        assert!(!tracker.is_available(SlotIndex(5)));
    }

    #[test]
    fn test_full_returns_none() {
        let mut tracker = SlotTracker::new(2);
        tracker.mark_occupied(SlotIndex(0)).unwrap();
        tracker.mark_occupied(SlotIndex(1)).unwrap();
        assert_eq!(tracker.find_first_empty(), None);
    }

    #[test]
    fn test_reset_resizes() {
        let mut tracker = SlotTracker::new(2);
        tracker.mark_occupied(SlotIndex(0)).unwrap();

        tracker.reset(4);
        assert_eq!(tracker.len(), 4);
        assert_eq!(tracker.occupied_count(), 0);
    }
}
