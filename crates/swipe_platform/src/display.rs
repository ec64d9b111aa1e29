//! Display metrics supplied by the host

use serde::{Deserialize, Serialize};

/// Screen density information
///
/// Distances and velocities in the engine's configuration are expressed in
/// density-independent units and scaled to pixels with [`DisplayMetrics::density`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Pixels per density-independent unit
    pub density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    /// Convert density-independent units to pixels
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.density
    }

    /// Convert pixels to density-independent units
    pub fn px_to_dp(&self, px: f32) -> f32 {
        if self.density > 0.0 {
            px / self.density
        } else {
            px
        }
    }
}
