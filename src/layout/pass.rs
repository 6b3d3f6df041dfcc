//! Applying a layout plan to a surface.

use tracing::debug;

use super::compute_layout;
use crate::animation::{AnimationEffect, Fill, Keyframe, Timing};
use crate::core::ElementId;
use crate::surface::{AnimationId, StyleProp, Surface, Width};

/// How offsets reach the elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutMode {
    /// Set `left` directly.
    Instant,
    /// Slide each element from 0 to its offset, element `i` starting
    /// `i * stagger_ms` later.
    Animated { duration_ms: f64, stagger_ms: f64 },
}

/// An animated bulk layout in flight.
#[derive(Clone, Debug, Default)]
pub struct LayoutPass {
    animations: Vec<AnimationId>,
}

impl LayoutPass {
    /// Every element reached its offset.
    #[must_use]
    pub fn is_finished<S: Surface>(&self, surface: &S) -> bool {
        self.animations.iter().all(|&id| surface.animation_finished(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// Lay out `elements` inside `row`.
///
/// Returns the pass to wait on for animated layouts. Instant layouts and
/// empty collections return `None`.
pub fn layout_row<S: Surface>(
    surface: &mut S,
    row: ElementId,
    elements: &[ElementId],
    mode: LayoutMode,
    gap: f64,
) -> Option<LayoutPass> {
    let &first = elements.first()?;

    surface.set_style(row, StyleProp::Width(Width::Full));
    let available = surface.offset_width(row);
    let element_width = surface.offset_width(first);

    let plan = compute_layout(element_width, available, elements.len(), gap);
    surface.set_style(row, StyleProp::Width(Width::Px(plan.row_width)));
    if plan.centered {
        surface.set_style(row, StyleProp::AutoMargins);
    }
    debug!(%row, count = elements.len(), row_width = plan.row_width, centered = plan.centered, ?mode, "layout pass");

    match mode {
        LayoutMode::Instant => {
            for (&element, &offset) in elements.iter().zip(&plan.offsets) {
                surface.set_style(element, StyleProp::Left(offset));
            }
            None
        }
        LayoutMode::Animated { duration_ms, stagger_ms } => {
            let animations = elements
                .iter()
                .zip(&plan.offsets)
                .enumerate()
                .map(|(i, (&element, &offset))| {
                    let timing = Timing::snap(duration_ms)
                        .with_delay(stagger_ms * i as f64)
                        .with_fill(Fill::Both);
                    let effect = AnimationEffect::between(Keyframe::left(0.0), Keyframe::left(offset), timing);
                    surface.animate(element, effect)
                })
                .collect();
            Some(LayoutPass { animations })
        }
    }
}
