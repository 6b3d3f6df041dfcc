//! Core engine types: identifiers, RNG, configuration, errors.
//!
//! Everything here is independent of rendering. The higher modules
//! (`deck`, `slots`, `interaction`, `animation`, `game`) build on it.

pub mod ids;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{CardValue, ElementId, SlotIndex};
pub use rng::{GameRng, GameRngState};
pub use config::{AnimationTimings, CardAnimation, GameConfig};
pub use error::{AssetError, AssetLoadFailure, ConfigError, GameError, Result, SlotError};
