//! Horizontal layout of a row of same-sized elements.
//!
//! A row either fits at its natural width (elements plus gaps) and is
//! centered, or it takes the full parent width and elements overlap evenly
//! from edge to edge. Offsets are `i * (row_width - element_width) / (n - 1)`;
//! a single element sits at 0.
//!
//! ```
//! use tarot_spread::layout::compute_layout;
//!
//! // 5 slots of 84px with 15px gaps fit in 1200px: centered, natural spacing.
//! let plan = compute_layout(84.0, 1200.0, 5, 15.0);
//! assert!(plan.centered);
//! assert_eq!(plan.row_width, 480.0);
//! assert_eq!(plan.offsets, vec![0.0, 99.0, 198.0, 297.0, 396.0]);
//! ```

mod pass;

pub use pass::{layout_row, LayoutMode, LayoutPass};

use serde::{Deserialize, Serialize};

/// Computed row geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Width the row container should take.
    pub row_width: f64,
    /// Row is narrower than its parent and centered with auto margins.
    pub centered: bool,
    /// Left offset of each element inside the row.
    pub offsets: Vec<f64>,
}

/// Plan a row of `count` elements inside `available_width`.
#[must_use]
pub fn compute_layout(element_width: f64, available_width: f64, count: usize, gap: f64) -> LayoutPlan {
    if count == 0 {
        return LayoutPlan {
            row_width: available_width,
            centered: false,
            offsets: Vec::new(),
        };
    }

    let natural = element_width * count as f64 + gap * (count - 1) as f64;
    let (row_width, centered) = if natural <= available_width {
        (natural, true)
    } else {
        (available_width, false)
    };

    let offsets = if count == 1 {
        vec![0.0]
    } else {
        let step = (row_width - element_width) / (count - 1) as f64;
        (0..count).map(|i| step * i as f64).collect()
    };

    LayoutPlan {
        row_width,
        centered,
        offsets,
    }
}
