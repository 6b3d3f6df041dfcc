//! Page geometry.

use serde::{Deserialize, Serialize};

/// Border box of an element in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Offset of this rect's origin from `other`'s origin.
    #[must_use]
    pub fn offset_from(&self, other: &Rect) -> (f64, f64) {
        (self.left - other.left, self.top - other.top)
    }

    /// Origin that centers a `width` x `height` box inside this rect,
    /// relative to this rect's origin.
    #[must_use]
    pub fn centered_origin(&self, width: f64, height: f64) -> (f64, f64) {
        (self.width / 2.0 - width / 2.0, self.height / 2.0 - height / 2.0)
    }
}

/// Left and top border widths. Positioned children are offset by these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub left: f64,
    pub top: f64,
}

impl Edges {
    #[must_use]
    pub const fn uniform(width: f64) -> Self {
        Self { left: width, top: width }
    }
}
