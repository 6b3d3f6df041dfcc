//! Resetting a round: cards return to the deck and a fresh permutation is dealt.

mod common;

use common::{chosen, ready, run_until_idle};
use tarot_spread::animation::TransferPhase;
use tarot_spread::core::{CardAnimation, GameConfig, SlotIndex};
use tarot_spread::game::RoundStatus;
use tarot_spread::interaction::{NoopReason, PointerEvent, Resolution};
use tarot_spread::surface::{Cursor, Surface};
use tarot_spread::MemorySurface;
use tarot_spread::CardGame;

fn fill_all(game: &mut CardGame<MemorySurface>) {
    while game.remaining_slots() > 0 {
        let value = game.deck().available()[0];
        let element = game.deck().card(value).unwrap().element;
        assert!(!game.handle_interaction(PointerEvent::click(element)).is_noop());
    }
}

// =============================================================================
// Reset
// =============================================================================

/// New game after a full round leaves every slot empty.
#[test]
fn test_round_trip_restores_empty_round() {
    let mut game = ready(GameConfig::new().with_seed(31));

    game.new_game();
    run_until_idle(&mut game);
    assert!(chosen(&game).is_empty());
    assert_eq!(game.remaining_slots(), 5);

    fill_all(&mut game);
    run_until_idle(&mut game);
    assert_eq!(game.status(), RoundStatus::Complete);

    game.new_game();
    run_until_idle(&mut game);

    assert!(chosen(&game).is_empty());
    assert_eq!(game.remaining_slots(), 5);
    assert_eq!(game.tracker().occupied_count(), 0);
    assert_eq!(game.slots().occupants().count(), 0);
    assert_eq!(game.status(), RoundStatus::Picking);
    assert_eq!(game.surface().running_count(), 0);
    assert!(game.surface().animation_log().is_empty());
}

/// Reset hides the controls and restores the pickable look of cards and slots.
#[test]
fn test_reset_hides_controls_and_restores_cursors() {
    let mut game = ready(GameConfig::new().with_seed(12).with_slots(2));
    fill_all(&mut game);
    run_until_idle(&mut game);

    let elements = *game.elements();
    assert!(game.surface().style(elements.submit.unwrap()).unwrap().displayed);

    game.new_game();
    assert!(!game.surface().style(elements.submit.unwrap()).unwrap().displayed);
    assert!(!game.surface().style(elements.new_game.unwrap()).unwrap().displayed);
    assert_eq!(game.status(), RoundStatus::Resetting);

    run_until_idle(&mut game);
    let surface = game.surface();
    for &slot in game.slots().elements() {
        assert_eq!(surface.style(slot).unwrap().cursor, Cursor::Pointer);
        assert!(surface.children(slot).is_empty());
    }
    for card in game.deck().cards() {
        assert_eq!(surface.style(card.element).unwrap().cursor, Cursor::Pointer);
        assert_eq!(surface.class(card.element), Some("card"));
        assert_eq!(surface.parent(card.element), Some(elements.cards_row));
    }
    assert_eq!(surface.style(elements.cards_row).unwrap().z_index, 0);
}

/// Chosen cards fly back to the deck and flip face down on the way.
#[test]
fn test_returning_cards_follow_reverse_path() {
    let mut game = ready(GameConfig::new().with_seed(3).with_slots(2));
    fill_all(&mut game);
    run_until_idle(&mut game);

    let returning = game.slots().occupant(SlotIndex(0)).unwrap();
    game.new_game();

    assert_eq!(game.transfer_phase(returning), Some(TransferPhase::MovingToDeck));
    assert_eq!(game.surface().style(game.elements().cards_row).unwrap().z_index, 1);

    let mut seen_flip_back = false;
    while game.transfer_phase(returning).is_some() {
        game.surface_mut().advance(16.0);
        game.pump();
        seen_flip_back |= game.transfer_phase(returning) == Some(TransferPhase::FlippingBack);
    }
    assert!(seen_flip_back);
}

// =============================================================================
// Latching and redeal
// =============================================================================

/// Picks are refused while cards are returning.
#[test]
fn test_input_latched_during_reset() {
    let mut game = ready(GameConfig::new().with_seed(3));
    fill_all(&mut game);
    run_until_idle(&mut game);

    game.new_game();
    let slot = game.slots().element(SlotIndex(0)).unwrap();
    assert_eq!(
        game.handle_interaction(PointerEvent::click(slot)),
        Resolution::Noop(NoopReason::AnimationInProgress)
    );
}

/// A reset requested mid-transfer runs once the pick lands.
#[test]
fn test_new_game_waits_for_picks_in_flight() {
    let mut game = ready(GameConfig::new().with_seed(10).with_animation(CardAnimation::CenterFlip));
    let card = game.deck().cards()[4].element;
    game.handle_interaction(PointerEvent::click(card));

    // The pick is still flying; the reset queues behind it.
    game.new_game();
    game.new_game();
    assert_eq!(game.status(), RoundStatus::Resetting);
    assert_eq!(chosen(&game).len(), 1);

    run_until_idle(&mut game);
    assert!(chosen(&game).is_empty());
    assert_eq!(game.remaining_slots(), 5);
    assert_eq!(game.tracker().occupied_count(), 0);
}

/// The redeal draws a new permutation of the same values.
#[test]
fn test_redeal_uses_fresh_permutation() {
    let mut game = ready(GameConfig::new().with_seed(99));
    let first: Vec<_> = game.deck().values().collect();

    game.new_game();
    run_until_idle(&mut game);
    let second: Vec<_> = game.deck().values().collect();

    let mut sorted = second.clone();
    sorted.sort();
    assert_eq!(sorted.len(), 22);
    assert!(sorted.windows(2).all(|w| w[0] != w[1]));
    assert_ne!(first, second);
}
