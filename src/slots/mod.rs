//! Result slots.
//!
//! - `SlotTracker`: authoritative fill state, one flag per ordinal
//! - `SlotRow`: slot elements and the card committed to each

pub mod tracker;
pub mod row;

pub use tracker::SlotTracker;
pub use row::SlotRow;
