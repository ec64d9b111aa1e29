//! Swipe Core
//!
//! Swipe-to-dismiss gesture engine: a touch-tracking state machine that
//! recognizes drags on host-owned items, protects against accidental
//! swipes, decides between dismissal and snap-back on release, and drives
//! the resulting animation frame by frame.
//!
//! # Features
//!
//! - **Capability Interface**: the host implements [`SwipeHost`]; the engine
//!   never owns items
//! - **Falsing Protection**: dismissals need deliberate travel when the host asks
//! - **Long Press**: a held touch becomes a long press and never a drag
//! - **Fling Animations**: release velocity shapes the dismissal curve
//! - **Cancel-Safe Completion**: every animation reports how it ended
//!
//! # Example
//!
//! ```rust,ignore
//! use swipe_core::prelude::*;
//!
//! let mut tracker = TouchGestureTracker::new(SwipeConfig::new(Axis::Horizontal));
//!
//! // From the host's input dispatch
//! let consumed = tracker.on_touch_event(&mut host, &event);
//!
//! // From the host's frame callback
//! if tracker.tick(&mut host, now) {
//!     request_frame();
//! }
//!
//! // Before the host view goes away
//! tracker.cancel_all(&mut host);
//! ```

pub mod config;
pub mod decision;
pub mod falsing;
pub mod host;
pub mod long_press;
pub mod progress;
pub mod tracker;
pub mod velocity;


pub use config::{SwipeConfig, LONG_PRESS_TIMEOUT_FACTOR};
pub use decision::{dismiss_target, DismissDecisionEngine, ReleaseState, SwipeDecision};
pub use falsing::FalsingGuard;
pub use host::{LayerMode, SwipeHost};
pub use long_press::LongPressWatcher;
pub use progress::{layer_mode_for_progress, rubber_band, swipe_alpha, swipe_progress};
pub use tracker::{CompletionCallback, DismissOptions, GesturePhase, TouchGestureTracker};
pub use velocity::VelocityTracker;

pub use swipe_animation::AnimationOutcome;

/// Commonly used types
pub mod prelude {
    pub use crate::config::SwipeConfig;
    pub use crate::host::{LayerMode, SwipeHost};
    pub use crate::tracker::{DismissOptions, GesturePhase, TouchGestureTracker};
    pub use swipe_animation::AnimationOutcome;
    pub use swipe_platform::{Axis, Point, PointerAction, PointerEvent, Rect};
}
