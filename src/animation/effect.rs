//! Keyframe effects, shaped after the Web Animations API.
//!
//! An `AnimationEffect` is what a `Surface` is asked to play: a short list of
//! keyframes spaced evenly over the active duration, plus timing.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::easing::CubicBezier;

/// Animated property values at one keyframe. Absent properties are untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub left: Option<f64>,
    pub top: Option<f64>,
    /// `transform: rotateY(..deg)`
    pub rotate_y: Option<f64>,
}

impl Keyframe {
    /// Keyframe setting `left` and `top`.
    #[must_use]
    pub fn position(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            rotate_y: None,
        }
    }

    /// Keyframe setting only `left`.
    #[must_use]
    pub fn left(left: f64) -> Self {
        Self {
            left: Some(left),
            ..Self::default()
        }
    }

    /// Keyframe setting only the Y rotation, in degrees.
    #[must_use]
    pub fn rotate_y(degrees: f64) -> Self {
        Self {
            rotate_y: Some(degrees),
            ..Self::default()
        }
    }

    fn lerp(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            (a, b) => b.or(a),
        }
    }

    /// Interpolate towards `other`; `t` is already eased.
    #[must_use]
    pub fn interpolate(&self, other: &Keyframe, t: f64) -> Keyframe {
        Keyframe {
            left: Self::lerp(self.left, other.left, t),
            top: Self::lerp(self.top, other.top, t),
            rotate_y: Self::lerp(self.rotate_y, other.rotate_y, t),
        }
    }
}

/// What the element shows outside the active interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    /// Final keyframe persists after the end.
    #[default]
    Forwards,
    /// First keyframe applies during the delay; final persists after the end.
    Both,
}

/// Timing of one effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: CubicBezier,
    pub fill: Fill,
}

impl Timing {
    /// Immediate start, `cubic-bezier(0, 1, 1, 1)`, fill forwards.
    #[must_use]
    pub fn snap(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing: CubicBezier::SNAP,
            fill: Fill::Forwards,
        }
    }

    /// Delay the start.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Change the fill mode.
    #[must_use]
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// Delay plus duration.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }
}

/// A keyframe effect to be played on one element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationEffect {
    pub keyframes: SmallVec<[Keyframe; 2]>,
    pub timing: Timing,
}

impl AnimationEffect {
    /// Two-keyframe effect from `from` to `to`.
    #[must_use]
    pub fn between(from: Keyframe, to: Keyframe, timing: Timing) -> Self {
        Self {
            keyframes: smallvec![from, to],
            timing,
        }
    }

    /// Final keyframe, or `None` when the effect has no keyframes.
    #[must_use]
    pub fn last(&self) -> Option<Keyframe> {
        self.keyframes.last().copied()
    }

    /// Values `elapsed_ms` after the effect was started.
    ///
    /// Returns `None` while the effect has nothing to show (inside the delay
    /// without backwards fill, or no keyframes at all).
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> Option<Keyframe> {
        let first = *self.keyframes.first()?;
        let local = elapsed_ms - self.timing.delay_ms;

        if local < 0.0 {
            return match self.timing.fill {
                Fill::Both => Some(first),
                Fill::Forwards => None,
            };
        }
        if self.timing.duration_ms <= 0.0 || local >= self.timing.duration_ms {
            return self.last();
        }

        let eased = self.timing.easing.ease(local / self.timing.duration_ms);
        let segments = self.keyframes.len() - 1;
        if segments == 0 {
            return Some(first);
        }

        let position = eased * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        let t = position - index as f64;
        Some(self.keyframes[index].interpolate(&self.keyframes[index + 1], t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration_ms: f64) -> Timing {
        Timing {
            duration_ms,
            delay_ms: 0.0,
            easing: CubicBezier::LINEAR,
            fill: Fill::Forwards,
        }
    }

    #[test]
    fn test_interpolate_keeps_missing_properties() {
        let a = Keyframe::position(0.0, 10.0);
        let b = Keyframe::left(100.0);
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.left, Some(50.0));
        assert_eq!(mid.top, Some(10.0));
        assert_eq!(mid.rotate_y, None);
    }

    #[test]
    fn test_sample_linear() {
        let effect = AnimationEffect::between(Keyframe::left(0.0), Keyframe::left(200.0), linear(100.0));

        let mid = effect.sample(50.0).unwrap();
        assert!((mid.left.unwrap() - 100.0).abs() < 1e-3);

        assert_eq!(effect.sample(100.0).unwrap().left, Some(200.0));
        assert_eq!(effect.sample(1000.0).unwrap().left, Some(200.0));
    }

    #[test]
    fn test_sample_delay_and_fill() {
        let timing = linear(100.0).with_delay(50.0);
        let forwards = AnimationEffect::between(Keyframe::left(0.0), Keyframe::left(10.0), timing);
        assert_eq!(forwards.sample(20.0), None);

        let both = AnimationEffect::between(
            Keyframe::left(0.0),
            Keyframe::left(10.0),
            timing.with_fill(Fill::Both),
        );
        assert_eq!(both.sample(20.0).unwrap().left, Some(0.0));
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let effect = AnimationEffect::between(Keyframe::rotate_y(0.0), Keyframe::rotate_y(90.0), linear(0.0));
        assert_eq!(effect.sample(0.0).unwrap().rotate_y, Some(90.0));
    }

    #[test]
    fn test_snap_timing() {
        let timing = Timing::snap(500.0).with_delay(100.0);
        assert_eq!(timing.easing, CubicBezier::SNAP);
        assert_eq!(timing.fill, Fill::Forwards);
        assert_eq!(timing.end_ms(), 600.0);
    }
}
