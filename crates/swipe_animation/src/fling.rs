//! Fling curve planning
//!
//! Given where an item is, where it has to go and how fast the finger was
//! moving when it let go, the planner picks a duration and curve so the
//! item leaves the screen without a visible jump in speed.
//!
//! Three modes:
//!
//! - **Direct**: an ease-out Bézier whose start slope can match the release
//!   velocity within the time budget.
//! - **Blended**: the release is fast but the ease-out would need longer
//!   than the budget; a constant-velocity segment is crossfaded into the
//!   ease-out, using the ease-out itself as the blend weight.
//! - **Low velocity**: the release is too slow to be worth matching; a
//!   fixed fast-out/linear-in curve carries the item off.
//!
//! Fast flings feel snappy and linear; slow releases feel like an assisted
//! glide.

use crate::curve::{Curve, VelocityCurve};
use crate::easing::{CubicBezier, Easing};

/// Minimum release velocity the planner tries to match (dp/s)
pub const MIN_VELOCITY_DP_PER_SECOND: f32 = 250.0;

/// Release velocity at which the ease-out reaches its steepest shape (dp/s)
pub const HIGH_VELOCITY_DP_PER_SECOND: f32 = 3000.0;

/// x coordinate of the ease-out's second control point
const LINEAR_OUT_FASTER_IN_X2: f32 = 0.5;
const LINEAR_OUT_FASTER_IN_Y2_MIN: f32 = 0.4;
const LINEAR_OUT_FASTER_IN_Y2_MAX: f32 = 0.5;

/// Which planner branch produced a plan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlingMode {
    /// Ease-out curve alone
    Direct,
    /// Velocity-matched linear segment crossfaded into the ease-out
    Blended,
    /// Fixed fast-out/linear-in curve for slow releases
    LowVelocity,
}

/// A planned animation: how long it runs and how progress evolves
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlan {
    /// Duration in milliseconds, always greater than zero
    pub duration_ms: u32,
    /// Normalized progress curve
    pub curve: Curve,
    /// Planner branch, `None` for fixed plans
    pub fling_mode: Option<FlingMode>,
}

impl AnimationPlan {
    /// A fixed-duration plan; zero durations are bumped to one millisecond
    pub fn new(duration_ms: u32, curve: impl Into<Curve>) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            curve: curve.into(),
            fling_mode: None,
        }
    }

    /// Build a plan from a duration in seconds
    pub fn from_seconds(seconds: f32, curve: impl Into<Curve>) -> Self {
        Self::new(seconds_to_ms(seconds), curve)
    }

    fn with_mode(mut self, mode: FlingMode) -> Self {
        self.fling_mode = Some(mode);
        self
    }
}

fn seconds_to_ms(seconds: f32) -> u32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 1;
    }
    ((seconds * 1000.0).round() as u32).max(1)
}

/// Tuning for the fling planner, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Time budget for travelling the full extent
    pub max_length_seconds: f32,
    /// Below this release speed the velocity is ignored (px/s)
    pub min_velocity: f32,
    /// At or above this release speed the ease-out is steepest (px/s)
    pub high_velocity: f32,
}

impl FlingConfig {
    /// Planner tuning for a display density
    pub fn new(max_length_seconds: f32, density: f32) -> Self {
        Self {
            max_length_seconds,
            min_velocity: MIN_VELOCITY_DP_PER_SECOND * density,
            high_velocity: HIGH_VELOCITY_DP_PER_SECOND * density,
        }
    }
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self::new(0.4, 1.0)
    }
}

/// Computes dismiss animations from release state
#[derive(Clone, Copy, Debug, Default)]
pub struct FlingCurvePlanner {
    config: FlingConfig,
}

impl FlingCurvePlanner {
    pub fn new(config: FlingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlingConfig {
        &self.config
    }

    /// Plan the animation carrying an item from `current` to the off-screen
    /// `target`, released at `velocity`, over an item of `extent` pixels.
    pub fn plan_dismiss(
        &self,
        current: f32,
        target: f32,
        velocity: f32,
        extent: f32,
    ) -> AnimationPlan {
        let distance = (target - current).abs();
        let speed = velocity.abs();
        let budget = self.time_budget(distance, extent);

        let y2 = self.ease_out_y2(speed);
        let bezier = CubicBezier::new(0.0, 0.0, LINEAR_OUT_FASTER_IN_X2, y2);
        let ease_out = Curve::Eased(Easing::CubicBezier(bezier));

        // Time the ease-out needs for its start slope to equal the release
        // speed. A stationary release can never match.
        let start_gradient = bezier.initial_slope();
        let implied_seconds = if speed > 0.0 {
            start_gradient * distance / speed
        } else {
            f32::INFINITY
        };

        if implied_seconds <= budget {
            tracing::trace!(
                "fling plan: direct (implied {:.3}s <= budget {:.3}s)",
                implied_seconds,
                budget
            );
            AnimationPlan::from_seconds(budget, ease_out).with_mode(FlingMode::Direct)
        } else if speed >= self.config.min_velocity {
            tracing::trace!(
                "fling plan: blended (implied {:.3}s > budget {:.3}s, speed {:.0})",
                implied_seconds,
                budget,
                speed
            );
            let linear = Curve::Velocity(VelocityCurve::new(budget, speed, distance));
            let curve = Curve::crossfade(linear, ease_out.clone(), ease_out);
            AnimationPlan::from_seconds(budget, curve).with_mode(FlingMode::Blended)
        } else {
            tracing::trace!(
                "fling plan: low velocity (speed {:.0} < {:.0})",
                speed,
                self.config.min_velocity
            );
            AnimationPlan::from_seconds(budget, Easing::FastOutLinearIn)
                .with_mode(FlingMode::LowVelocity)
        }
    }

    /// Time allowed for a travel of `distance` over an item of `extent`
    ///
    /// Scales with the square root of the fraction of the extent left to
    /// cover, so short remaining travel still gets a visible animation.
    pub fn time_budget(&self, distance: f32, extent: f32) -> f32 {
        let fraction = if extent > 0.0 { distance / extent } else { 1.0 };
        self.config.max_length_seconds * fraction.max(0.0).sqrt()
    }

    /// y coordinate of the ease-out's second control point for a release speed
    pub fn ease_out_y2(&self, speed: f32) -> f32 {
        let range = self.config.high_velocity - self.config.min_velocity;
        let t = if range > 0.0 {
            ((speed - self.config.min_velocity) / range).clamp(0.0, 1.0)
        } else if speed >= self.config.high_velocity {
            1.0
        } else {
            0.0
        };
        LINEAR_OUT_FASTER_IN_Y2_MAX * t + LINEAR_OUT_FASTER_IN_Y2_MIN * (1.0 - t)
    }
}
