//! # tarot-spread
//!
//! Headless engine for a card-spread picking game: a row of face-down cards,
//! a fixed number of result slots, and animated transfers between them.
//!
//! ## Design Principles
//!
//! 1. **Rendering behind a trait**: The engine talks to the page only through
//!    `Surface`. `MemorySurface` implements it in memory with a virtual clock.
//!
//! 2. **Explicit indexes**: Slots and cards are looked up through maps built
//!    at deal time, never by querying the rendered document.
//!
//! 3. **Commit before animate**: Slot occupancy and chosen values are
//!    recorded synchronously; animations only drive visuals.
//!
//! ## Architecture
//!
//! - **Transfers as step lists**: Each card transfer is a list of
//!   move/flip/settle steps. Animated steps suspend until the surface
//!   reports the effect finished; `CardGame::pump` resumes them.
//!
//! - **Bulk-pass latch**: Animated deals hold `animation_in_progress`, which
//!   the resolver honours by ignoring input.
//!
//! ## Modules
//!
//! - `core`: IDs, RNG, configuration, errors
//! - `surface`: Surface trait, geometry, in-memory surface
//! - `assets`: Preloaded card art
//! - `deck`: Deck building and card lookup
//! - `layout`: Horizontal row layout
//! - `slots`: Slot fill state and slot elements
//! - `interaction`: Pointer event resolution
//! - `animation`: Effects, transfers, sequencer
//! - `game`: Game controller and session

pub mod core;
pub mod surface;
pub mod assets;
pub mod deck;
pub mod layout;
pub mod slots;
pub mod interaction;
pub mod animation;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardValue, SlotIndex, ElementId,
    GameRng, GameRngState,
    GameConfig, AnimationTimings, CardAnimation,
    GameError, SlotError, ConfigError, AssetError, AssetLoadFailure, Result,
};

pub use crate::surface::{Surface, MemorySurface, ElementKind, StyleProp, Rect};

pub use crate::assets::{ArtSet, ImageRef, LoadedImage};

pub use crate::deck::{Card, CardState, Deck};

pub use crate::layout::{compute_layout, LayoutPlan, LayoutMode};

pub use crate::slots::{SlotTracker, SlotRow};

pub use crate::interaction::{PointerEvent, PointerKind, Resolution, NoopReason};

pub use crate::animation::{Sequencer, Transfer, TransferKind, TransferPhase, CubicBezier};

pub use crate::game::{CardGame, GameSession, RoundStatus};
