//! Cubic Bézier timing functions, as in CSS `cubic-bezier(x1, y1, x2, y2)`.

use serde::{Deserialize, Serialize};

/// A CSS cubic Bézier easing curve with endpoints fixed at (0,0) and (1,1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// `cubic-bezier(0, 1, 1, 1)`: jumps most of the way at once, then settles.
    /// Every move, flip and deal uses it.
    pub const SNAP: CubicBezier = CubicBezier::new(0.0, 1.0, 1.0, 1.0);

    /// `linear`
    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear progress in `[0, 1]` to eased progress.
    ///
    /// Solves `x(t) = progress` (Newton's method, falling back to bisection)
    /// and returns `y(t)`.
    #[must_use]
    pub fn ease(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let t = self.solve_t(progress);
        Self::component(t, self.y1, self.y2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let err = Self::component(t, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = Self::derivative(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = Self::component(t, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    // Bernstein form with P0 = 0, P3 = 1, expanded to a polynomial in t.
    fn component(t: f64, p1: f64, p2: f64) -> f64 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        ((a * t + b) * t + c) * t
    }

    fn derivative(t: f64, p1: f64, p2: f64) -> f64 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * t + 2.0 * b) * t + c
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::SNAP
    }
}

impl std::fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
