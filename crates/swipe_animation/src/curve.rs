//! Composite animation curves
//!
//! A [`Curve`] maps the normalized animation clock to normalized progress
//! between the start and end values. Unlike [`Easing`], composite curves are
//! not required to stay inside `[0, 1]` in the middle of the animation, only
//! to start at 0 and end at 1.

use crate::easing::Easing;

/// Constant-velocity segment expressed in normalized progress
///
/// Moving `distance` at `velocity` for `duration_secs` covers
/// `t * duration_secs * velocity / distance` of the travel at clock `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityCurve {
    pub duration_secs: f32,
    pub velocity: f32,
    pub distance: f32,
}

impl VelocityCurve {
    pub fn new(duration_secs: f32, velocity: f32, distance: f32) -> Self {
        Self {
            duration_secs,
            velocity: velocity.abs(),
            distance: distance.abs(),
        }
    }

    pub fn apply(&self, t: f32) -> f32 {
        if self.distance == 0.0 {
            return t;
        }
        t * self.duration_secs * self.velocity / self.distance
    }
}

/// An animation curve
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    /// A plain easing function
    Eased(Easing),
    /// Linear motion at a fixed real-world velocity
    Velocity(VelocityCurve),
    /// Mix of two curves, weighted by a third
    ///
    /// `value(t) = (1 - w) * from(t) + w * to(t)` where `w = weight(t)`.
    /// The weight curve may be the same curve as `to`.
    Crossfade {
        from: Box<Curve>,
        to: Box<Curve>,
        weight: Box<Curve>,
    },
}

impl Curve {
    pub fn linear() -> Self {
        Curve::Eased(Easing::Linear)
    }

    /// Build a crossfade between `from` and `to`, blended by `weight`
    pub fn crossfade(from: Curve, to: Curve, weight: Curve) -> Self {
        Curve::Crossfade {
            from: Box::new(from),
            to: Box::new(to),
            weight: Box::new(weight),
        }
    }

    /// Evaluate the curve at normalized time `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Eased(easing) => easing.apply(t),
            Curve::Velocity(velocity) => velocity.apply(t),
            Curve::Crossfade { from, to, weight } => {
                let w = weight.apply(t);
                (1.0 - w) * from.apply(t) + w * to.apply(t)
            }
        }
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        Curve::Eased(easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::CubicBezier;

    #[test]
    fn test_velocity_curve_progress() {
        // 0.2s at 500px/s over 200px reaches half the travel at the end
        let curve = VelocityCurve::new(0.2, -500.0, 200.0);
        assert!((curve.apply(1.0) - 0.5).abs() < 1e-6);
        assert!((curve.apply(0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_curve_zero_distance() {
        let curve = VelocityCurve::new(0.2, 500.0, 0.0);
        assert_eq!(curve.apply(0.3), 0.3);
    }

    #[test]
    fn test_crossfade_weights() {
        // A zero weight yields `from` unchanged
        let zero = Curve::Velocity(VelocityCurve::new(0.0, 0.0, 1.0));
        let only_from =
            Curve::crossfade(Curve::linear(), Curve::Eased(Easing::FastOutLinearIn), zero);
        assert!((only_from.apply(0.3) - 0.3).abs() < 1e-6);

        // A linear weight mixes proportionally to the clock
        let mixed = Curve::crossfade(
            Curve::linear(),
            Curve::Eased(Easing::FastOutLinearIn),
            Curve::linear(),
        );
        let expected = 0.7 * 0.3 + 0.3 * Easing::FastOutLinearIn.apply(0.3);
        assert!((mixed.apply(0.3) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_self_weighted_crossfade() {
        let ease = Curve::Eased(Easing::CubicBezier(CubicBezier::new(0.0, 0.0, 0.5, 0.45)));
        let lin = Curve::Velocity(VelocityCurve::new(0.4, 800.0, 400.0));
        let blended = Curve::crossfade(lin.clone(), ease.clone(), ease.clone());

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let w = ease.apply(t);
            let expected = (1.0 - w) * lin.apply(t) + w * w;
            assert!((blended.apply(t) - expected).abs() < 1e-5);
        }
        assert_eq!(blended.apply(0.0), 0.0);
        assert!((blended.apply(1.0) - 1.0).abs() < 1e-6);
    }
}
