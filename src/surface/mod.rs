//! Rendering surface abstraction.
//!
//! The engine never touches a document directly. Everything it needs from
//! the page (creating and re-parenting elements, measuring boxes, setting
//! inline styles, playing keyframe effects and learning when they finish)
//! goes through the `Surface` trait.
//!
//! ## Implementations
//!
//! - [`MemorySurface`]: complete in-memory document with a virtual clock.
//!   Deterministic; used by the test-suite and for headless simulation.
//! - A DOM adapter in the page shell maps each call onto `web-sys`
//!   (`Element::animate`, `getBoundingClientRect`, `Animation.finished`).
//!
//! ## Element kinds
//!
//! The game template is built from a fixed set of element kinds
//! ([`ElementKind`]). A surface uses the kind to pick tag, class and
//! intrinsic size; the engine uses it to find the page's controls.

pub mod geometry;
pub mod memory;

pub use geometry::{Edges, Rect};
pub use memory::{MemorySurface, Metrics};

use serde::{Deserialize, Serialize};

use crate::animation::AnimationEffect;
use crate::assets::ImageRef;
use crate::core::ElementId;

/// Role of an element in the game template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Page element the game is mounted into.
    Container,
    /// `.tarot-game-container`
    GameRoot,
    /// "Choose N cards"
    Heading,
    /// `#cards-container`
    CardsRow,
    /// "Your result"
    ResultsHeading,
    /// `#chosen-cards-container`
    SlotRow,
    /// `.card` / `.chosen-card`
    Card,
    /// `img.image-responsive` inside a card.
    CardImage,
    /// `.empty-slot`
    Slot,
    /// `.end-game` control, provided by the page.
    SubmitControl,
    /// `.begin-new-game` control, provided by the page.
    NewGameControl,
}

/// Width rule for a flow element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Width {
    /// `width: 100%`
    Full,
    /// `width: Npx`
    Px(f64),
}

/// Mouse cursor shown over an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Inline style assignment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StyleProp {
    Left(f64),
    Top(f64),
    Width(Width),
    /// `margin-left: auto; margin-right: auto`
    AutoMargins,
    ZIndex(i32),
    Cursor(Cursor),
    /// `display: block` when true, `display: none` when false.
    Display(bool),
}

/// Handle to a playing or finished keyframe effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

/// The page, as seen by the engine.
pub trait Surface {
    /// Create a detached element.
    fn create_element(&mut self, kind: ElementKind) -> ElementId;

    /// Append `child` as last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Insert `child` as first child of `parent`.
    fn prepend_child(&mut self, parent: ElementId, child: ElementId);

    /// Remove every child of `parent` from the document.
    fn remove_children(&mut self, parent: ElementId);

    /// Is the element attached to the document?
    fn contains(&self, element: ElementId) -> bool;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn kind(&self, element: ElementId) -> Option<ElementKind>;

    /// First descendant of `root` with the given kind, depth-first.
    fn find_descendant(&self, root: ElementId, kind: ElementKind) -> Option<ElementId>;

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_class(&mut self, element: ElementId, class: &str);

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn set_style(&mut self, element: ElementId, prop: StyleProp);

    /// Show `image` in an image element.
    fn set_image(&mut self, element: ElementId, image: ImageRef);

    /// Border box in page coordinates.
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Layout width of the element.
    fn offset_width(&self, element: ElementId) -> f64 {
        self.bounding_rect(element).width
    }

    fn border(&self, element: ElementId) -> Edges;

    /// Start playing an effect on an element.
    fn animate(&mut self, element: ElementId, effect: AnimationEffect) -> AnimationId;

    /// Has the effect finished?
    ///
    /// Effects whose element left the document count as finished.
    fn animation_finished(&self, animation: AnimationId) -> bool;
}
