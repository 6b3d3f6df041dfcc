//! Game configuration.
//!
//! The page shell passes an options object; `GameConfig` mirrors it field
//! for field and deserializes from the same JSON shape:
//!
//! ```
//! use tarot_spread::core::{CardAnimation, GameConfig};
//!
//! let config = GameConfig::from_json(r#"{
//!     "numberOfCards": 10,
//!     "numberOfEmptySlots": 3,
//!     "cardAnimationType": "center-flip"
//! }"#).unwrap();
//!
//! assert_eq!(config.number_of_cards, 10);
//! assert_eq!(config.card_animation, CardAnimation::CenterFlip);
//! assert!(config.show_new_game_button);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How a picked card travels to its slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardAnimation {
    /// Fly straight into the slot, then flip face-up there.
    #[default]
    DirectFlip,
    /// Fly to the middle of the game area, flip, then fly into the slot.
    CenterFlip,
    /// Drop vertically into the slot keeping the card face-down.
    DeckReturn,
}

impl std::fmt::Display for CardAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardAnimation::DirectFlip => "direct-flip",
            CardAnimation::CenterFlip => "center-flip",
            CardAnimation::DeckReturn => "deck-return",
        };
        f.write_str(name)
    }
}

/// Durations and spacing used by the animation and layout passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationTimings {
    /// Move steps (to slot, to center, back to deck).
    pub move_ms: f64,
    /// Each half of a flip.
    pub flip_ms: f64,
    /// Per-element duration of an animated deal.
    pub deal_ms: f64,
    /// Start delay added per element index during a deal.
    pub deal_stagger_ms: f64,
    /// Natural gap between neighbouring cards or slots.
    pub gap_px: f64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            move_ms: 500.0,
            flip_ms: 300.0,
            deal_ms: 400.0,
            deal_stagger_ms: 50.0,
            gap_px: 15.0,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Cards dealt per round.
    pub number_of_cards: usize,

    /// Result slots to fill per round.
    pub number_of_empty_slots: usize,

    /// Forward transfer animation.
    #[serde(rename = "cardAnimationType")]
    pub card_animation: CardAnimation,

    /// Reveal the "new game" control at the end of a round.
    pub show_new_game_button: bool,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    pub timings: AnimationTimings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_cards: 22,
            number_of_empty_slots: 5,
            card_animation: CardAnimation::default(),
            show_new_game_button: true,
            seed: None,
            timings: AnimationTimings::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the page shell's JSON options. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of cards.
    #[must_use]
    pub fn with_cards(mut self, count: usize) -> Self {
        self.number_of_cards = count;
        self
    }

    /// Set the number of result slots.
    #[must_use]
    pub fn with_slots(mut self, count: usize) -> Self {
        self.number_of_empty_slots = count;
        self
    }

    /// Set the forward transfer animation.
    #[must_use]
    pub fn with_animation(mut self, animation: CardAnimation) -> Self {
        self.card_animation = animation;
        self
    }

    /// Show or hide the "new game" control at round end.
    #[must_use]
    pub fn with_new_game_button(mut self, show: bool) -> Self {
        self.show_new_game_button = show;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace animation timings.
    #[must_use]
    pub fn with_timings(mut self, timings: AnimationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Check that a round can be played to completion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_cards == 0 {
            return Err(ConfigError::NoCards);
        }
        if self.number_of_empty_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.number_of_empty_slots > self.number_of_cards {
            return Err(ConfigError::MoreSlotsThanCards {
                slots: self.number_of_empty_slots,
                cards: self.number_of_cards,
            });
        }
        Ok(())
    }
}
