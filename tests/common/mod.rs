//! Shared helpers for scenario tests.

#![allow(dead_code)]

use std::sync::Once;

use tarot_spread::assets::{ArtSet, ImageRef};
use tarot_spread::core::{CardValue, GameConfig};
use tarot_spread::game::CardGame;
use tarot_spread::surface::{ElementKind, MemorySurface, Surface};

static INIT: Once = Once::new();

/// Install a test log subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(tracing_subscriber::EnvFilter::new)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Art with a back at `ImageRef(0)` and face `v` at `ImageRef(v + 1)`.
pub fn art(faces: u32) -> ArtSet {
    ArtSet::new(ImageRef(0), (1..=faces).map(ImageRef).collect()).unwrap()
}

/// A page with submit and new-game controls and a game mounted on it.
pub fn mount(config: GameConfig) -> CardGame<MemorySurface> {
    init_logging();
    let mut surface = MemorySurface::default();
    let page = surface.document();
    for kind in [ElementKind::SubmitControl, ElementKind::NewGameControl] {
        let control = surface.create_element(kind);
        surface.append_child(page, control);
    }
    CardGame::new(surface, art(22), page, config).unwrap()
}

/// Advance the clock one frame at a time until nothing is animating.
pub fn run_until_idle(game: &mut CardGame<MemorySurface>) {
    for _ in 0..2_000 {
        game.surface_mut().advance(16.0);
        game.pump();
        if game.is_idle() {
            return;
        }
    }
    panic!("game did not become idle");
}

/// A mounted game with the initial deal finished.
pub fn ready(config: GameConfig) -> CardGame<MemorySurface> {
    let mut game = mount(config);
    run_until_idle(&mut game);
    game
}

pub fn chosen(game: &CardGame<MemorySurface>) -> Vec<CardValue> {
    game.chosen_cards().iter().copied().collect()
}

/// Offsets of the face-down cards and the slots, in order.
pub fn offsets(game: &CardGame<MemorySurface>) -> (Vec<f64>, Vec<f64>) {
    let surface = game.surface();
    let left = |el| surface.style(el).map_or(0.0, |style| style.left);
    let cards = game.deck().face_down_elements().into_iter().map(left).collect();
    let slots = game.slots().elements().iter().copied().map(left).collect();
    (cards, slots)
}
