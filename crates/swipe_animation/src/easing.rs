//! Easing functions
//!
//! All easings map normalized time `t` in `[0, 1]` to normalized progress.
//! Inputs outside the unit interval are clamped.

use std::f32::consts::PI;

/// Cubic Bézier timing curve anchored at (0,0) and (1,1)
///
/// `(x1, y1)` and `(x2, y2)` are the two inner control points, the same
/// parameterization CSS `cubic-bezier()` uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    const NEWTON_ITERATIONS: usize = 8;
    const BISECTION_ITERATIONS: usize = 32;
    const EPSILON: f32 = 1e-6;

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Fast start, linear finish (`0.4, 0, 1, 1`)
    pub const FAST_OUT_LINEAR_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 1.0, 1.0);

    /// Evaluate the curve at time `x`
    pub fn apply(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let t = self.solve_t(x);
        Self::component(t, self.y1, self.y2)
    }

    /// Slope dy/dx of the curve at its start
    ///
    /// Returns `f32::INFINITY` for a vertical start tangent.
    pub fn initial_slope(&self) -> f32 {
        // With the first control point on the origin the start tangent
        // points at the second control point instead.
        let (dx, dy) = if self.x1 == 0.0 && self.y1 == 0.0 {
            (self.x2, self.y2)
        } else {
            (self.x1, self.y1)
        };
        if dx == 0.0 {
            f32::INFINITY
        } else {
            dy / dx
        }
    }

    fn component(t: f32, p1: f32, p2: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        ((a * t + b) * t + c) * t
    }

    fn component_derivative(t: f32, p1: f32, p2: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Find the curve parameter whose x coordinate equals `x`
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = Self::component(t, self.x1, self.x2) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = Self::component_derivative(t, self.x1, self.x2);
            if d.abs() < Self::EPSILON {
                break;
            }
            t -= err / d;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        // Newton stalled on a flat tangent; x(t) is monotonic so bisect.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..Self::BISECTION_ITERATIONS {
            let value = Self::component(t, self.x1, self.x2);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

/// Easing functions for swipe animations
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Accelerate from rest, then run at full speed into the edge
    FastOutLinearIn,
    /// Cosine ease at both ends, used for snap-back
    AccelerateDecelerate,
    /// Arbitrary cubic Bézier
    CubicBezier(CubicBezier),
}

impl Easing {
    /// Apply easing to a normalized time
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::FastOutLinearIn => CubicBezier::FAST_OUT_LINEAR_IN.apply(t),
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::CubicBezier(curve) => curve.apply(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    #[test]
    fn test_easing_endpoints() {
        let easings = [
            Easing::Linear,
            Easing::FastOutLinearIn,
            Easing::AccelerateDecelerate,
            Easing::CubicBezier(CubicBezier::new(0.0, 0.0, 0.5, 0.4)),
        ];
        for easing in easings {
            assert_close(easing.apply(0.0), 0.0);
            assert_close(easing.apply(1.0), 1.0);
            assert_close(easing.apply(-1.0), 0.0);
            assert_close(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        let easings = [
            Easing::FastOutLinearIn,
            Easing::AccelerateDecelerate,
            Easing::CubicBezier(CubicBezier::new(0.0, 0.0, 0.5, 0.5)),
        ];
        for easing in easings {
            let mut last = 0.0;
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= last - 1e-5, "{easing:?} not monotonic at {i}");
                last = value;
            }
        }
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        assert_close(Easing::AccelerateDecelerate.apply(0.5), 0.5);
        assert!(Easing::AccelerateDecelerate.apply(0.1) < 0.1);
        assert!(Easing::AccelerateDecelerate.apply(0.9) > 0.9);
    }

    #[test]
    fn test_fast_out_linear_in_starts_slow() {
        // Zero start slope means the curve lags linear progress early on
        assert!(Easing::FastOutLinearIn.apply(0.2) < 0.2);
        assert!(Easing::FastOutLinearIn.apply(0.8) < 0.8);
    }

    #[test]
    fn test_bezier_solver_matches_linear_diagonal() {
        // Control points on the diagonal degenerate to the identity
        let curve = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            assert_close(curve.apply(x), x);
        }
    }

    #[test]
    fn test_bezier_initial_slope() {
        // Ease-out with coincident first control point: slope = y2 / x2
        let curve = CubicBezier::new(0.0, 0.0, 0.5, 0.4);
        assert_close(curve.initial_slope(), 0.8);
        assert_close(CubicBezier::FAST_OUT_LINEAR_IN.initial_slope(), 0.0);

        // Finite difference agrees with the analytic start slope
        let h = 1e-3;
        let numeric = curve.apply(h) / h;
        assert!((numeric - 0.8).abs() < 0.05, "numeric slope {numeric}");
    }
}
