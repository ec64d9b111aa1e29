//! Engine configuration
//!
//! Distances and velocities are stored in density-independent units and
//! converted to pixels through [`SwipeConfig::density`]. Every field has a
//! default, so partial configuration files deserialize cleanly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use swipe_animation::FlingConfig;
use swipe_platform::{Axis, DisplayMetrics, Result, SwipeError};

/// Multiplier applied to the platform long-press timeout
pub const LONG_PRESS_TIMEOUT_FACTOR: f32 = 1.5;

/// Swipe engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Axis along which swipes are recognized
    pub axis: Axis,
    /// Pixels per density-independent unit
    pub density: f32,
    /// Lower clamp for reported swipe progress
    pub min_swipe_progress: f32,
    /// Upper clamp for reported swipe progress
    pub max_swipe_progress: f32,
    /// Release speed above which a swipe counts as a fling (dp/s)
    pub escape_velocity_dp: f32,
    /// Release speeds are clamped to this magnitude (dp/s)
    pub max_dismiss_velocity_dp: f32,
    /// Accelerated dismissal duration when released at rest (ms)
    pub default_escape_duration_ms: u32,
    /// Upper bound for dismissal durations (ms)
    pub max_escape_duration_ms: u32,
    /// Snap-back animation duration (ms)
    pub snap_duration_ms: u32,
    /// Travel needed before a gesture counts as deliberate (dp)
    pub falsing_threshold_dp: f32,
    /// Travel needed before a touch becomes a drag (dp)
    pub touch_slop_dp: f32,
    /// Platform long-press timeout before scaling (ms)
    pub long_press_timeout_ms: u32,
    /// Whether long presses are watched at all
    pub long_press_enabled: bool,
    /// Never request hardware layers from the host
    pub disable_hardware_layers: bool,
    /// Fling planner: slowest release worth matching (dp/s)
    pub fling_min_velocity_dp: f32,
    /// Fling planner: release speed for the steepest ease-out (dp/s)
    pub fling_high_velocity_dp: f32,
    /// Horizon of the release velocity estimate (ms)
    pub velocity_window_ms: u32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            density: 1.0,
            min_swipe_progress: 0.0,
            max_swipe_progress: 1.0,
            escape_velocity_dp: 100.0,
            max_dismiss_velocity_dp: 4000.0,
            default_escape_duration_ms: 200,
            max_escape_duration_ms: 400,
            snap_duration_ms: 150,
            falsing_threshold_dp: 70.0,
            touch_slop_dp: 16.0,
            long_press_timeout_ms: 500,
            long_press_enabled: true,
            disable_hardware_layers: false,
            fling_min_velocity_dp: swipe_animation::MIN_VELOCITY_DP_PER_SECOND,
            fling_high_velocity_dp: swipe_animation::HIGH_VELOCITY_DP_PER_SECOND,
            velocity_window_ms: 100,
        }
    }
}

impl SwipeConfig {
    /// Default configuration for a drag axis
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    /// Set the drag axis
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the display density
    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set the clamp range for reported swipe progress
    pub fn swipe_progress_range(mut self, min: f32, max: f32) -> Self {
        self.min_swipe_progress = min;
        self.max_swipe_progress = max;
        self
    }

    /// Set the falsing threshold in dp
    pub fn falsing_threshold(mut self, dp: f32) -> Self {
        self.falsing_threshold_dp = dp;
        self
    }

    /// Set the drag slop in dp
    pub fn touch_slop(mut self, dp: f32) -> Self {
        self.touch_slop_dp = dp;
        self
    }

    /// Enable or disable long-press watching
    pub fn long_press(mut self, enabled: bool) -> Self {
        self.long_press_enabled = enabled;
        self
    }

    /// Stop the engine from requesting hardware layers
    pub fn disable_hardware_layers(mut self, disable: bool) -> Self {
        self.disable_hardware_layers = disable;
        self
    }

    pub fn metrics(&self) -> DisplayMetrics {
        DisplayMetrics::new(self.density)
    }

    pub fn escape_velocity_px(&self) -> f32 {
        self.metrics().dp_to_px(self.escape_velocity_dp)
    }

    pub fn max_dismiss_velocity_px(&self) -> f32 {
        self.metrics().dp_to_px(self.max_dismiss_velocity_dp)
    }

    pub fn falsing_threshold_px(&self) -> f32 {
        self.metrics().dp_to_px(self.falsing_threshold_dp)
    }

    pub fn touch_slop_px(&self) -> f32 {
        self.metrics().dp_to_px(self.touch_slop_dp)
    }

    /// Delay before a held touch becomes a long press
    pub fn long_press_delay(&self) -> Duration {
        let ms = self.long_press_timeout_ms as f32 * LONG_PRESS_TIMEOUT_FACTOR;
        Duration::from_millis(ms.round() as u64)
    }

    pub fn velocity_window(&self) -> Duration {
        Duration::from_millis(u64::from(self.velocity_window_ms))
    }

    /// Fling planner tuning in pixels
    pub fn fling_config(&self) -> FlingConfig {
        FlingConfig {
            max_length_seconds: self.max_escape_duration_ms as f32 / 1000.0,
            min_velocity: self.metrics().dp_to_px(self.fling_min_velocity_dp),
            high_velocity: self.metrics().dp_to_px(self.fling_high_velocity_dp),
        }
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(SwipeError::InvalidConfig(message))
        }

        if !(self.density.is_finite() && self.density > 0.0) {
            return invalid(format!("density must be positive, got {}", self.density));
        }
        if !(0.0..=1.0).contains(&self.min_swipe_progress)
            || !(0.0..=1.0).contains(&self.max_swipe_progress)
            || self.min_swipe_progress > self.max_swipe_progress
        {
            return invalid(format!(
                "swipe progress range [{}, {}] must be ordered within [0, 1]",
                self.min_swipe_progress, self.max_swipe_progress
            ));
        }
        let non_negative = [
            ("escape_velocity_dp", self.escape_velocity_dp),
            ("falsing_threshold_dp", self.falsing_threshold_dp),
            ("touch_slop_dp", self.touch_slop_dp),
            ("fling_min_velocity_dp", self.fling_min_velocity_dp),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be non-negative, got {value}"));
            }
        }
        if !(self.max_dismiss_velocity_dp.is_finite() && self.max_dismiss_velocity_dp > 0.0) {
            return invalid(format!(
                "max_dismiss_velocity_dp must be positive, got {}",
                self.max_dismiss_velocity_dp
            ));
        }
        if self.fling_high_velocity_dp < self.fling_min_velocity_dp {
            return invalid(format!(
                "fling_high_velocity_dp ({}) is below fling_min_velocity_dp ({})",
                self.fling_high_velocity_dp, self.fling_min_velocity_dp
            ));
        }
        let durations = [
            ("default_escape_duration_ms", self.default_escape_duration_ms),
            ("max_escape_duration_ms", self.max_escape_duration_ms),
            ("snap_duration_ms", self.snap_duration_ms),
            ("velocity_window_ms", self.velocity_window_ms),
        ];
        for (name, value) in durations {
            if value == 0 {
                return invalid(format!("{name} must be greater than zero"));
            }
        }
        Ok(())
    }
}
