//! Host capability interface
//!
//! The engine never owns the items it moves. Everything it needs to know
//! about them, and every visual change it makes, goes through [`SwipeHost`].
//! Methods with default bodies are optional capabilities.

use std::fmt::Debug;
use std::hash::Hash;

use swipe_platform::{Axis, Point};

/// Render mode requested for an item while it is being moved
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerMode {
    /// Normal rendering
    #[default]
    None,
    /// Offscreen/hardware layer; expensive, so only held during motion
    Hardware,
}

/// Capabilities the swipe engine needs from the view hosting the items
pub trait SwipeHost {
    /// Opaque, host-owned item handle
    type Item: Copy + Eq + Hash + Debug;

    /// Hit test: the swipeable item under `point`, if any
    fn item_at(&self, point: Point) -> Option<Self::Item>;

    /// Whether `item` may currently be dismissed
    fn is_dismissible(&self, item: Self::Item) -> bool;

    /// Whether the current context requires falsing protection
    fn needs_falsing_protection(&self) -> bool;

    /// Scale applied to the configured falsing threshold
    fn falsing_threshold_factor(&self) -> f32 {
        1.0
    }

    /// A drag on `item` was recognized
    fn on_drag_begin(&mut self, item: Self::Item);

    /// A drag on `item` ended without dismissal; a snap-back follows
    fn on_drag_cancelled(&mut self, item: Self::Item);

    /// `item` finished snapping back after a release at `velocity`
    fn on_snapped_back(&mut self, item: Self::Item, velocity: f32);

    /// `item` finished its dismissal animation
    fn on_dismissed(&mut self, item: Self::Item);

    /// The dismissal animation of `item` was canceled before completing
    fn on_dismiss_canceled(&mut self, _item: Self::Item) {}

    /// Swipe progress changed; return `true` if the host rendered it itself
    ///
    /// When this returns `false` for a dismissible item the engine applies
    /// its default fade through [`SwipeHost::set_alpha`].
    fn report_progress(&mut self, item: Self::Item, is_dismissible: bool, progress: f32) -> bool;

    /// Current translation of `item` along `axis`
    fn translation(&self, item: Self::Item, axis: Axis) -> f32;

    /// Move `item` to `value` along `axis`
    fn set_translation(&mut self, item: Self::Item, axis: Axis, value: f32);

    /// Size of `item` along `axis`
    fn extent(&self, item: Self::Item, axis: Axis) -> f32;

    /// Set the opacity of `item`
    fn set_alpha(&mut self, item: Self::Item, alpha: f32);

    /// Switch `item` between normal and layered rendering
    fn set_layer_mode(&mut self, _item: Self::Item, _mode: LayerMode) {}

    /// A held touch on `item` became a long press at `point`
    ///
    /// Returns whether the host handled it.
    fn on_long_press(&mut self, _item: Self::Item, _point: Point) -> bool {
        false
    }

    /// Whether `item` is laid out right-to-left
    fn is_rtl(&self, _item: Self::Item) -> bool {
        false
    }
}
