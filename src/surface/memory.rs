//! In-memory surface with a virtual clock.
//!
//! `MemorySurface` keeps a small document tree and plays keyframe effects
//! against a clock that only moves when `advance` is called. Layout is
//! deliberately simple:
//!
//! - Cards, card images and slots are absolutely positioned: their box is
//!   the parent's padding-box origin plus inline `left`/`top`.
//! - Everything else flows top to bottom inside its parent, taking the full
//!   parent width unless an explicit width is set; auto margins center it.
//!
//! ```
//! use tarot_spread::animation::{AnimationEffect, Keyframe, Timing};
//! use tarot_spread::surface::{ElementKind, MemorySurface, Surface};
//!
//! let mut surface = MemorySurface::default();
//! let card = surface.create_element(ElementKind::Card);
//! surface.append_child(surface.document(), card);
//!
//! let effect = AnimationEffect::between(Keyframe::left(0.0), Keyframe::left(300.0), Timing::snap(500.0));
//! let animation = surface.animate(card, effect);
//!
//! surface.advance(250.0);
//! assert!(!surface.animation_finished(animation));
//! surface.advance(250.0);
//! assert!(surface.animation_finished(animation));
//! assert_eq!(surface.style(card).unwrap().left, 300.0);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::geometry::{Edges, Rect};
use super::{AnimationId, Cursor, ElementKind, StyleProp, Surface, Width};
use crate::animation::{AnimationEffect, Keyframe};
use crate::assets::ImageRef;
use crate::core::ElementId;

/// Intrinsic sizes used for layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub viewport_width: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub slot_width: f64,
    pub slot_height: f64,
    pub slot_border: f64,
    pub heading_height: f64,
    pub control_width: f64,
    pub control_height: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            viewport_width: 1200.0,
            card_width: 80.0,
            card_height: 130.0,
            slot_width: 84.0,
            slot_height: 134.0,
            slot_border: 2.0,
            heading_height: 40.0,
            control_width: 120.0,
            control_height: 40.0,
        }
    }
}

/// Inline style of an element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementStyle {
    pub left: f64,
    pub top: f64,
    pub width: Option<Width>,
    pub auto_margins: bool,
    pub z_index: i32,
    pub cursor: Cursor,
    pub displayed: bool,
    /// Current `rotateY` angle in degrees.
    pub rotate_y: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: None,
            auto_margins: false,
            z_index: 0,
            cursor: Cursor::Default,
            displayed: true,
            rotate_y: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    class: String,
    text: String,
    attributes: FxHashMap<String, String>,
    style: ElementStyle,
    image: Option<ImageRef>,
}

impl Node {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            class: String::new(),
            text: String::new(),
            attributes: FxHashMap::default(),
            style: ElementStyle::default(),
            image: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Running {
    id: AnimationId,
    element: ElementId,
    effect: AnimationEffect,
    started_at: f64,
}

/// Deterministic in-memory document.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    metrics: Metrics,
    nodes: Vec<Node>,
    document: ElementId,
    now: f64,
    running: Vec<Running>,
    next_animation: u64,
    /// Started effects, kept only while recording.
    log: Option<Vec<(ElementId, AnimationEffect)>>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(Metrics::default())
    }
}

impl MemorySurface {
    /// Create a surface whose document body uses the given metrics.
    #[must_use]
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            nodes: vec![Node::new(ElementKind::Container)],
            document: ElementId(0),
            now: 0.0,
            running: Vec::new(),
            next_animation: 0,
            log: None,
        }
    }

    /// The document body. Always attached.
    #[must_use]
    pub fn document(&self) -> ElementId {
        self.document
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Simulate a viewport resize.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.metrics.viewport_width = width;
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward, sampling and retiring effects.
    pub fn advance(&mut self, ms: f64) {
        self.now += ms.max(0.0);

        let running = std::mem::take(&mut self.running);
        let mut still_running = Vec::with_capacity(running.len());

        for animation in running {
            if !self.contains(animation.element) {
                continue;
            }

            let elapsed = self.now - animation.started_at;
            if elapsed >= animation.effect.timing.end_ms() {
                if let Some(last) = animation.effect.last() {
                    self.apply(animation.element, &last);
                }
            } else {
                if let Some(frame) = animation.effect.sample(elapsed) {
                    self.apply(animation.element, &frame);
                }
                still_running.push(animation);
            }
        }

        self.running = still_running;
    }

    /// Number of effects still playing.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Start or stop recording started effects.
    ///
    /// Off by default. Turning it off drops anything recorded.
    pub fn record_animations(&mut self, enabled: bool) {
        let kept = self.log.take();
        self.log = enabled.then(|| kept.unwrap_or_default());
    }

    /// Effects started since recording began or the log was last taken.
    #[must_use]
    pub fn animation_log(&self) -> &[(ElementId, AnimationEffect)] {
        self.log.as_deref().unwrap_or_default()
    }

    /// Drain the recorded effects. Recording stays on.
    pub fn take_animation_log(&mut self) -> Vec<(ElementId, AnimationEffect)> {
        self.log.as_mut().map(std::mem::take).unwrap_or_default()
    }

    #[must_use]
    pub fn style(&self, element: ElementId) -> Option<&ElementStyle> {
        self.node(element).map(|node| &node.style)
    }

    #[must_use]
    pub fn class(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.class.as_str())
    }

    #[must_use]
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.text.as_str())
    }

    #[must_use]
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)?.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn image(&self, element: ElementId) -> Option<ImageRef> {
        self.node(element)?.image
    }

    #[must_use]
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element).map_or(&[], |node| node.children.as_slice())
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0 as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0 as usize)
    }

    fn apply(&mut self, element: ElementId, frame: &Keyframe) {
        if let Some(node) = self.node_mut(element) {
            if let Some(left) = frame.left {
                node.style.left = left;
            }
            if let Some(top) = frame.top {
                node.style.top = top;
            }
            if let Some(rotate_y) = frame.rotate_y {
                node.style.rotate_y = rotate_y;
            }
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(parent) = self.node(child).and_then(|node| node.parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    fn is_positioned(kind: ElementKind) -> bool {
        matches!(kind, ElementKind::Card | ElementKind::CardImage | ElementKind::Slot)
    }

    fn width_of(&self, element: ElementId) -> f64 {
        let Some(node) = self.node(element) else {
            return 0.0;
        };
        match node.kind {
            ElementKind::Card | ElementKind::CardImage => self.metrics.card_width,
            ElementKind::Slot => self.metrics.slot_width,
            ElementKind::SubmitControl | ElementKind::NewGameControl => self.metrics.control_width,
            _ => match node.style.width {
                Some(Width::Px(width)) => width,
                _ => self.content_width(node.parent),
            },
        }
    }

    fn content_width(&self, parent: Option<ElementId>) -> f64 {
        match parent {
            Some(parent) => self.width_of(parent) - 2.0 * self.border(parent).left,
            None => self.metrics.viewport_width,
        }
    }

    fn height_of(&self, element: ElementId) -> f64 {
        let Some(node) = self.node(element) else {
            return 0.0;
        };
        if !node.style.displayed {
            return 0.0;
        }
        match node.kind {
            ElementKind::Card | ElementKind::CardImage | ElementKind::CardsRow => self.metrics.card_height,
            ElementKind::Slot | ElementKind::SlotRow => self.metrics.slot_height,
            ElementKind::Heading | ElementKind::ResultsHeading => self.metrics.heading_height,
            ElementKind::SubmitControl | ElementKind::NewGameControl => self.metrics.control_height,
            ElementKind::Container | ElementKind::GameRoot => node
                .children
                .iter()
                .filter(|&&child| self.node(child).is_some_and(|c| !Self::is_positioned(c.kind)))
                .map(|&child| self.height_of(child))
                .sum(),
        }
    }

    fn rect_of(&self, element: ElementId) -> Rect {
        let Some(node) = self.node(element) else {
            return Rect::default();
        };
        let width = self.width_of(element);
        let height = self.height_of(element);

        let Some(parent) = node.parent else {
            return if Self::is_positioned(node.kind) {
                Rect::new(node.style.left, node.style.top, width, height)
            } else {
                Rect::new(0.0, 0.0, width, height)
            };
        };

        let parent_rect = self.rect_of(parent);
        let border = self.border(parent);
        let origin_left = parent_rect.left + border.left;
        let origin_top = parent_rect.top + border.top;

        if Self::is_positioned(node.kind) {
            return Rect::new(origin_left + node.style.left, origin_top + node.style.top, width, height);
        }

        let siblings = self.children(parent);
        let above: f64 = siblings
            .iter()
            .take_while(|&&sibling| sibling != element)
            .filter(|&&sibling| self.node(sibling).is_some_and(|s| !Self::is_positioned(s.kind)))
            .map(|&sibling| self.height_of(sibling))
            .sum();

        let margin = if node.style.auto_margins {
            ((self.content_width(Some(parent)) - width) / 2.0).max(0.0)
        } else {
            0.0
        };

        Rect::new(origin_left + margin, origin_top + above, width, height)
    }
}

impl Surface for MemorySurface {
    fn create_element(&mut self, kind: ElementKind) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind));
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn prepend_child(&mut self, parent: ElementId, child: ElementId) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.insert(0, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn remove_children(&mut self, parent: ElementId) {
        let children = match self.node_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
        }
    }

    fn contains(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.document {
                return true;
            }
            current = self.node(id).and_then(|node| node.parent);
        }
        false
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    fn kind(&self, element: ElementId) -> Option<ElementKind> {
        self.node(element).map(|node| node.kind)
    }

    fn find_descendant(&self, root: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.kind(id) == Some(kind) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
        }
    }

    fn set_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.class = class.to_string();
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_style(&mut self, element: ElementId, prop: StyleProp) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match prop {
            StyleProp::Left(left) => node.style.left = left,
            StyleProp::Top(top) => node.style.top = top,
            StyleProp::Width(width) => node.style.width = Some(width),
            StyleProp::AutoMargins => node.style.auto_margins = true,
            StyleProp::ZIndex(z) => node.style.z_index = z,
            StyleProp::Cursor(cursor) => node.style.cursor = cursor,
            StyleProp::Display(displayed) => node.style.displayed = displayed,
        }
    }

    fn set_image(&mut self, element: ElementId, image: ImageRef) {
        if let Some(node) = self.node_mut(element) {
            node.image = Some(image);
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.rect_of(element)
    }

    fn border(&self, element: ElementId) -> Edges {
        match self.kind(element) {
            Some(ElementKind::Slot) => Edges::uniform(self.metrics.slot_border),
            _ => Edges::default(),
        }
    }

    fn animate(&mut self, element: ElementId, effect: AnimationEffect) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        if let Some(log) = self.log.as_mut() {
            log.push((element, effect.clone()));
        }

        if !self.contains(element) {
            return id;
        }

        if let Some(frame) = effect.sample(0.0) {
            self.apply(element, &frame);
        }
        self.running.push(Running {
            id,
            element,
            effect,
            started_at: self.now,
        });
        id
    }

    fn animation_finished(&self, animation: AnimationId) -> bool {
        !self
            .running
            .iter()
            .any(|running| running.id == animation && self.contains(running.element))
    }
}
