//! The game's page template.

use serde::{Deserialize, Serialize};

use crate::core::ElementId;
use crate::surface::{ElementKind, StyleProp, Surface};

/// Handles to the template elements, resolved once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameElements {
    /// Page element the game was mounted into.
    pub container: ElementId,
    pub root: ElementId,
    pub heading: ElementId,
    pub cards_row: ElementId,
    pub results_heading: ElementId,
    pub slot_row: ElementId,
    /// Page-provided controls; absent when the page has none.
    pub submit: Option<ElementId>,
    pub new_game: Option<ElementId>,
}

/// Build the root, headings and both rows, and prepend them into `container`.
///
/// Controls are looked up under `container` and hidden.
pub fn build_template<S: Surface>(surface: &mut S, container: ElementId, slots: usize) -> GameElements {
    let root = surface.create_element(ElementKind::GameRoot);
    surface.set_class(root, "tarot-game-container");

    let heading = surface.create_element(ElementKind::Heading);
    surface.set_text(heading, &format!("Choose {slots} cards"));
    surface.append_child(root, heading);

    let cards_row = surface.create_element(ElementKind::CardsRow);
    surface.set_attribute(cards_row, "id", "cards-container");
    surface.append_child(root, cards_row);

    let results_heading = surface.create_element(ElementKind::ResultsHeading);
    surface.set_text(results_heading, "Your result");
    surface.append_child(root, results_heading);

    let slot_row = surface.create_element(ElementKind::SlotRow);
    surface.set_attribute(slot_row, "id", "chosen-cards-container");
    surface.append_child(root, slot_row);

    surface.prepend_child(container, root);

    let submit = surface.find_descendant(container, ElementKind::SubmitControl);
    let new_game = surface.find_descendant(container, ElementKind::NewGameControl);
    for control in submit.iter().chain(new_game.iter()) {
        surface.set_style(*control, StyleProp::Display(false));
    }

    GameElements {
        container,
        root,
        heading,
        cards_row,
        results_heading,
        slot_row,
        submit,
        new_game,
    }
}
