//! Swipe progress, default fade and rubber-band math

use std::f32::consts::FRAC_PI_2;

use crate::host::LayerMode;

/// Share of the item extent a non-dismissible item may be pulled
pub const RUBBER_BAND_FACTOR: f32 = 0.25;

/// Progress at which the default fade reaches full transparency
const FADE_END_PROGRESS: f32 = 0.5;

/// Normalized swipe progress `|offset / extent|`, clamped to `[min, max]`
///
/// A collapsed item reports `max`.
pub fn swipe_progress(offset: f32, extent: f32, min: f32, max: f32) -> f32 {
    if extent <= 0.0 {
        return max;
    }
    (offset / extent).abs().max(min).min(max)
}

/// Default opacity for a given progress: fades linearly out over `[0, 0.5]`
pub fn swipe_alpha(progress: f32) -> f32 {
    1.0 - (progress / FADE_END_PROGRESS).clamp(0.0, 1.0)
}

/// Damped displacement for items that cannot be dismissed
///
/// Follows a quarter sine wave up to a pull of one extent, then holds at
/// `±0.25·extent`.
pub fn rubber_band(delta: f32, extent: f32) -> f32 {
    let max_pull = RUBBER_BAND_FACTOR * extent;
    if extent <= 0.0 {
        return 0.0;
    }
    if delta.abs() >= extent {
        return max_pull.copysign(delta);
    }
    max_pull * (delta / extent * FRAC_PI_2).sin()
}

/// Render mode for an item at a given progress
///
/// The layer is only worth holding while the item is partially faded.
pub fn layer_mode_for_progress(progress: f32) -> LayerMode {
    if progress > 0.0 && progress < 1.0 {
        LayerMode::Hardware
    } else {
        LayerMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        assert_eq!(swipe_progress(250.0, 1000.0, 0.0, 1.0), 0.25);
        assert_eq!(swipe_progress(-250.0, 1000.0, 0.0, 1.0), 0.25);
        assert_eq!(swipe_progress(2000.0, 1000.0, 0.0, 1.0), 1.0);
        assert_eq!(swipe_progress(10.0, 1000.0, 0.1, 0.8), 0.1);
        assert_eq!(swipe_progress(900.0, 1000.0, 0.1, 0.8), 0.8);
        assert_eq!(swipe_progress(10.0, 0.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_alpha_fades_monotonically() {
        assert_eq!(swipe_alpha(0.0), 1.0);
        assert!((swipe_alpha(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(swipe_alpha(0.5), 0.0);
        assert_eq!(swipe_alpha(0.9), 0.0);

        let mut last = 1.0;
        for step in 0..=20 {
            let alpha = swipe_alpha(step as f32 / 20.0);
            assert!(alpha <= last);
            last = alpha;
        }
    }

    #[test]
    fn test_rubber_band_inside_extent() {
        assert_eq!(rubber_band(0.0, 400.0), 0.0);
        // Halfway: 100 * sin(pi/4)
        let half = rubber_band(200.0, 400.0);
        assert!((half - 100.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
        assert!((rubber_band(-200.0, 400.0) + half).abs() < 1e-6);
        assert!(rubber_band(399.0, 400.0) < 100.0);
    }

    #[test]
    fn test_rubber_band_saturates_past_extent() {
        assert_eq!(rubber_band(400.0, 400.0), 100.0);
        assert_eq!(rubber_band(5000.0, 400.0), 100.0);
        assert_eq!(rubber_band(-5000.0, 400.0), -100.0);
        assert_eq!(rubber_band(50.0, 0.0), 0.0);
    }

    #[test]
    fn test_layer_only_while_partially_swiped() {
        assert_eq!(layer_mode_for_progress(0.0), LayerMode::None);
        assert_eq!(layer_mode_for_progress(0.3), LayerMode::Hardware);
        assert_eq!(layer_mode_for_progress(1.0), LayerMode::None);
    }
}
