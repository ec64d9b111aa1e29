//! Swipe Animation System
//!
//! Release animations for swiped items: choosing a curve from the release
//! velocity and driving it frame by frame.
//!
//! # Features
//!
//! - **Easing**: cubic Bézier timing curves and the fixed swipe easings
//! - **Composite Curves**: velocity-matched segments and crossfades
//! - **Fling Planning**: three-mode duration/curve selection for dismissals
//! - **Drivers**: cancel-safe, frame-driven executors with no timers of their own
//! - **Pending Set**: arena-backed map keeping one animation per item
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use swipe_animation::{AnimationDriver, FlingConfig, FlingCurvePlanner};
//!
//! let planner = FlingCurvePlanner::new(FlingConfig::default());
//! let plan = planner.plan_dismiss(300.0, 1000.0, 2500.0, 1000.0);
//! assert!(plan.duration_ms > 0);
//!
//! let mut driver = AnimationDriver::new(300.0, 1000.0, plan);
//! driver.start(Duration::ZERO, Duration::ZERO);
//! let frame = driver.sample(Duration::from_millis(16));
//! assert!(frame.value >= 300.0);
//! ```

pub mod curve;
pub mod driver;
pub mod easing;
pub mod fling;
pub mod pending;

pub use curve::{Curve, VelocityCurve};
pub use driver::{AnimationDriver, AnimationOutcome, DriverFrame, DriverState};
pub use easing::{CubicBezier, Easing};
pub use fling::{
    AnimationPlan, FlingConfig, FlingCurvePlanner, FlingMode, HIGH_VELOCITY_DP_PER_SECOND,
    MIN_VELOCITY_DP_PER_SECOND,
};
pub use pending::{DismissPendingSet, DriverId};
