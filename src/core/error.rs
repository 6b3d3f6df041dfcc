//! Error types.
//!
//! Pointer events that map to no action are not errors: they resolve to
//! `Resolution::Noop`. The types here cover programmer faults (slot indexes
//! the resolver should have rejected), bad configuration, and asset problems.

use thiserror::Error;

use super::ids::{CardValue, ElementId, SlotIndex};

/// Slot bookkeeping fault.
///
/// Callers pre-check with `SlotTracker::find_first_empty` or
/// `SlotTracker::is_available`, so this indicates a logic bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("slot index {index} out of range for {len} slots")]
    OutOfRange { index: usize, len: usize },

    #[error("{index} is already occupied")]
    Occupied { index: SlotIndex },
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("number of cards must be at least 1")]
    NoCards,

    #[error("number of empty slots must be at least 1")]
    NoSlots,

    #[error("{slots} slots cannot be filled from {cards} cards")]
    MoreSlotsThanCards { slots: usize, cards: usize },

    #[error("Configuration error: {message}")]
    Parse { message: String },
}

/// A single image that failed to load.
///
/// Logged and skipped; the remaining art is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("image {index} failed to load: {reason}")]
pub struct AssetLoadFailure {
    pub index: i32,
    pub reason: String,
}

/// The loaded art cannot support a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("no face-down art (index -1) was loaded")]
    MissingFaceDownArt,

    #[error("no card faces were loaded")]
    NoFaces,
}

/// Top-level engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Assets(#[from] AssetError),

    #[error("container {0} is not attached to the surface")]
    ContainerNotFound(ElementId),

    #[error("card {0} is not in the deck")]
    UnknownCard(CardValue),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
