//! Dealing card placeholders into the cards row.

use tracing::debug;

use super::{Card, CardState, Deck};
use crate::assets::ImageRef;
use crate::core::{CardValue, ElementId, GameRng};
use crate::surface::{ElementKind, Surface};

/// Deal `count` face-down cards into `container`.
///
/// Values are a uniform random permutation of `0..count`; every card shows
/// `back` until revealed. Only `container`'s children are touched.
pub fn build_deck<S: Surface>(
    surface: &mut S,
    container: ElementId,
    count: usize,
    back: ImageRef,
    rng: &mut GameRng,
) -> Deck {
    let values = rng.permutation(count);

    let cards = values
        .into_iter()
        .enumerate()
        .map(|(order, value)| {
            let element = surface.create_element(ElementKind::Card);
            surface.set_class(element, "card");
            surface.set_attribute(element, "data-order", &order.to_string());
            surface.set_attribute(element, "data-value", &value.to_string());
            surface.append_child(container, element);

            let image = surface.create_element(ElementKind::CardImage);
            surface.set_class(image, "image-responsive");
            surface.set_image(image, back);
            surface.append_child(element, image);

            Card {
                value: CardValue(value),
                order,
                element,
                image,
                state: CardState::FaceDown,
            }
        })
        .collect();

    debug!(count, %container, "deck dealt");
    Deck::from_cards(cards)
}
