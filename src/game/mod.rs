//! Game controller and session state.
//!
//! `CardGame` composes the deck, slots, resolver and sequencer:
//!
//! ```
//! use tarot_spread::assets::{ArtSet, ImageRef};
//! use tarot_spread::core::GameConfig;
//! use tarot_spread::game::CardGame;
//! use tarot_spread::interaction::PointerEvent;
//! use tarot_spread::surface::{MemorySurface, Surface};
//!
//! let surface = MemorySurface::default();
//! let page = surface.document();
//! let art = ArtSet::new(ImageRef(0), (1..=22).map(ImageRef).collect()).unwrap();
//! let mut game = CardGame::new(surface, art, page, GameConfig::new().with_seed(42)).unwrap();
//!
//! while !game.is_idle() {
//!     game.surface_mut().advance(16.0);
//!     game.pump();
//! }
//!
//! let card = game.deck().cards()[0].element;
//! game.handle_interaction(PointerEvent::click(card));
//! assert_eq!(game.remaining_slots(), 4);
//! ```

mod controller;
mod session;
mod template;

pub use controller::{CardGame, RoundStatus};
pub use session::GameSession;
pub use template::{build_template, GameElements};
