//! Swipe Platform Abstraction Layer
//!
//! Platform-agnostic input and geometry types consumed by the swipe engine.
//! Hosts translate their native touch stream into [`PointerEvent`]s and
//! describe their screen with [`DisplayMetrics`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use swipe_platform::{Axis, Point, PointerEvent};
//!
//! let down = PointerEvent::down(Point::new(40.0, 12.0), Duration::ZERO);
//! assert_eq!(Axis::Horizontal.along(down.position), 40.0);
//! assert_eq!(Axis::Horizontal.across(down.position), 12.0);
//! ```

mod display;
mod error;
mod geometry;
mod input;

// Re-export all public types
pub use display::DisplayMetrics;
pub use error::{Result, SwipeError};
pub use geometry::{Axis, Point, Rect, Size};
pub use input::{PointerAction, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::display::DisplayMetrics;
    pub use crate::error::{Result, SwipeError};
    pub use crate::geometry::{Axis, Point, Rect, Size};
    pub use crate::input::{PointerAction, PointerEvent};
}
