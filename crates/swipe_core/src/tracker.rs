//! Touch gesture tracker
//!
//! The state machine that turns a raw pointer stream into drags, long
//! presses and release animations:
//!
//! ```text
//! Idle --down on item--> Armed --move past slop--> Dragging --up/cancel--> Idle
//!                          |
//!                          +--long-press deadline--> LongPressed --up/cancel--> Idle
//! ```
//!
//! The tracker owns no timers and no items. Hosts forward pointer events to
//! [`TouchGestureTracker::on_intercept_touch_event`] or
//! [`TouchGestureTracker::on_touch_event`] (each event to exactly one of
//! them) and call [`TouchGestureTracker::tick`] from their frame callback
//! while [`TouchGestureTracker::next_deadline`] is set.
//!
//! Animations still running when the host goes away must be ended with
//! [`TouchGestureTracker::cancel_all`]; dropping the tracker skips the host
//! callbacks and completion hooks of anything still in flight.

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use swipe_animation::{
    AnimationDriver, AnimationOutcome, AnimationPlan, DismissPendingSet, Easing, FlingCurvePlanner,
};
use swipe_platform::{Axis, Point, PointerAction, PointerEvent};

use crate::config::SwipeConfig;
use crate::decision::{dismiss_target, DismissDecisionEngine, ReleaseState, SwipeDecision};
use crate::falsing::FalsingGuard;
use crate::host::{LayerMode, SwipeHost};
use crate::long_press::LongPressWatcher;
use crate::progress::{layer_mode_for_progress, rubber_band, swipe_alpha, swipe_progress};
use crate::velocity::VelocityTracker;

/// Callback run once an animation ends, whichever way it ends
pub type CompletionCallback = Box<dyn FnOnce(AnimationOutcome)>;

/// Where the current gesture stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture
    Idle,
    /// Touch down on an item, not yet recognized as a drag
    Armed,
    /// The engine owns the stream and moves the item
    Dragging,
    /// The touch became a long press; dragging is off for this gesture
    LongPressed,
}

/// Per-gesture state, created on a pointer-down over an item
#[derive(Clone, Copy, Debug)]
struct GestureState<I> {
    item: I,
    down_position: Point,
    initial_touch_pos: f32,
    perpendicular_initial_touch_pos: f32,
    /// Item translation when the drag was committed
    translation: f32,
    /// Dismissibility at pointer-down; drives progress reporting and the fade
    dismissible: bool,
    dragging: bool,
    long_press_sent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnimationKind {
    Dismiss,
    SnapBack,
}

struct PendingAnimation {
    driver: AnimationDriver,
    kind: AnimationKind,
    dismissible: bool,
    velocity: f32,
    restore_layer: bool,
    on_complete: Option<CompletionCallback>,
}

/// Options for [`TouchGestureTracker::dismiss_item`]
#[derive(Default)]
pub struct DismissOptions {
    delay: Duration,
    duration_ms: Option<u32>,
    accelerate: bool,
    dismiss_all: bool,
    on_complete: Option<CompletionCallback>,
}

impl DismissOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait before the animation starts moving
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fixed duration for the accelerate curve
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Use the fast-out/linear-in curve instead of a velocity-matched fling
    pub fn accelerate(mut self, accelerate: bool) -> Self {
        self.accelerate = accelerate;
        self
    }

    /// Part of a "dismiss all": items at rest leave in the default direction
    pub fn dismiss_all(mut self, dismiss_all: bool) -> Self {
        self.dismiss_all = dismiss_all;
        self
    }

    /// Run `callback` when the animation completes or is canceled
    pub fn on_complete(mut self, callback: impl FnOnce(AnimationOutcome) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DismissOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissOptions")
            .field("delay", &self.delay)
            .field("duration_ms", &self.duration_ms)
            .field("accelerate", &self.accelerate)
            .field("dismiss_all", &self.dismiss_all)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Swipe-to-dismiss gesture engine for one host view
pub struct TouchGestureTracker<I> {
    config: SwipeConfig,
    planner: FlingCurvePlanner,
    decision: DismissDecisionEngine,
    velocity: VelocityTracker,
    falsing: FalsingGuard,
    long_press: LongPressWatcher,
    gesture: Option<GestureState<I>>,
    pending: DismissPendingSet<I, PendingAnimation>,
}

impl<I> TouchGestureTracker<I>
where
    I: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new(config: SwipeConfig) -> Self {
        let planner = FlingCurvePlanner::new(config.fling_config());
        let decision = DismissDecisionEngine::new(config.escape_velocity_px());
        let velocity = VelocityTracker::new(config.velocity_window());
        Self {
            config,
            planner,
            decision,
            velocity,
            falsing: FalsingGuard::new(),
            long_press: LongPressWatcher::new(),
            gesture: None,
            pending: DismissPendingSet::new(),
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    fn axis(&self) -> Axis {
        self.config.axis
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Pre-dispatch hook
    ///
    /// Returns `true` once the engine owns the stream (a drag was recognized
    /// or a long press fired); the host should then stop dispatching the
    /// sequence to its children.
    pub fn on_intercept_touch_event<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        self.poll_long_press(host, event.timestamp);

        if self.is_dragging() {
            return self.handle_drag_event(host, event);
        }

        match event.action {
            PointerAction::Down => {
                self.arm(host, event);
                false
            }
            PointerAction::Move => self.track_armed_move(host, event),
            PointerAction::Up | PointerAction::Cancel => {
                let captured = self.gesture.is_some_and(|g| g.long_press_sent);
                self.clear_gesture();
                captured
            }
        }
    }

    /// Primary touch handler
    ///
    /// Returns whether the event was consumed.
    pub fn on_touch_event<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        self.poll_long_press(host, event.timestamp);

        if self.is_long_press_sent() {
            if event.action.is_terminal() {
                self.clear_gesture();
            }
            return true;
        }

        if self.is_dragging() {
            return self.handle_drag_event(host, event);
        }

        if host.item_at(event.position).is_some() {
            self.on_intercept_touch_event(host, event);
            true
        } else {
            self.long_press.cancel();
            if event.action.is_terminal() {
                self.clear_gesture();
            }
            false
        }
    }

    fn arm<H>(&mut self, host: &mut H, event: &PointerEvent)
    where
        H: SwipeHost<Item = I>,
    {
        self.clear_gesture();

        let Some(item) = host.item_at(event.position) else {
            tracing::trace!("pointer down at {:?} hit no item", event.position);
            return;
        };

        // Never let a new gesture and an old animation share the item
        if self.pending.contains(item) {
            self.cancel_animation(host, item);
        }

        let axis = self.axis();
        self.velocity.add(event);
        self.gesture = Some(GestureState {
            item,
            down_position: event.position,
            initial_touch_pos: axis.along(event.position),
            perpendicular_initial_touch_pos: axis.across(event.position),
            translation: host.translation(item, axis),
            dismissible: host.is_dismissible(item),
            dragging: false,
            long_press_sent: false,
        });

        if self.config.long_press_enabled {
            self.long_press
                .schedule(event.timestamp, self.config.long_press_delay());
        }

        tracing::debug!("armed {:?} at {:?}", item, event.position);
    }

    fn track_armed_move<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        let axis = self.axis();
        let slop = self.config.touch_slop_px();
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        if gesture.long_press_sent {
            return true;
        }

        self.velocity.add(event);
        let delta = axis.along(event.position) - gesture.initial_touch_pos;
        let perpendicular = axis.across(event.position) - gesture.perpendicular_initial_touch_pos;

        if delta.abs() > slop || perpendicular.abs() > slop {
            self.long_press.cancel();
        }

        if delta.abs() > slop && delta.abs() > perpendicular.abs() {
            let item = gesture.item;
            gesture.dragging = true;
            gesture.initial_touch_pos = axis.along(event.position);
            gesture.translation = host.translation(item, axis);
            tracing::debug!("drag began on {:?} (delta {delta})", item);
            host.on_drag_begin(item);
        }

        gesture.dragging
    }

    fn handle_drag_event<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        match event.action {
            PointerAction::Down => {
                tracing::warn!(
                    "ignoring pointer down {} at {:?} during a drag",
                    event.pointer_id,
                    event.position
                );
            }
            PointerAction::Move => {
                self.velocity.add(event);
                self.drag_to(host, self.axis().along(event.position));
            }
            PointerAction::Up | PointerAction::Cancel => {
                self.velocity.add(event);
                self.release(host, event);
            }
        }
        true
    }

    fn drag_to<H>(&mut self, host: &mut H, position: f32)
    where
        H: SwipeHost<Item = I>,
    {
        let Some(gesture) = self.gesture else {
            return;
        };
        let axis = self.axis();
        let item = gesture.item;

        let delta = position - gesture.initial_touch_pos;
        let threshold = self.config.falsing_threshold_px() * host.falsing_threshold_factor();
        self.falsing.observe(delta, threshold);

        let delta = if host.is_dismissible(item) {
            delta
        } else {
            rubber_band(delta, host.extent(item, axis))
        };

        let translation = gesture.translation + delta;
        tracing::trace!("drag {:?} to {translation}", item);
        host.set_translation(item, axis, translation);
        self.update_swipe_progress(host, item, gesture.dismissible);
    }

    fn release<H>(&mut self, host: &mut H, event: &PointerEvent)
    where
        H: SwipeHost<Item = I>,
    {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        self.long_press.cancel();

        let axis = self.axis();
        let item = gesture.item;
        let velocity = self
            .velocity
            .velocity(axis, self.config.max_dismiss_velocity_px());

        let decision = match event.action {
            PointerAction::Up => {
                let release = ReleaseState {
                    velocity,
                    translation: host.translation(item, axis),
                    extent: host.extent(item, axis),
                    dismissible: host.is_dismissible(item),
                    vetoed: self.falsing.vetoes(host.needs_falsing_protection()),
                };
                self.decision.decide(&release)
            }
            _ => SwipeDecision::SnapBack,
        };

        tracing::debug!(
            "released {:?} ({:?}) at {velocity} px/s: {:?}",
            item,
            event.action,
            decision
        );

        self.velocity.clear();
        self.falsing.reset();

        match decision {
            SwipeDecision::Dismiss { flung } => {
                let options = DismissOptions::new().accelerate(!flung);
                self.dismiss_item(host, item, velocity, event.timestamp, options);
            }
            SwipeDecision::SnapBack => {
                host.on_drag_cancelled(item);
                self.start_snap(host, item, 0.0, velocity, event.timestamp, gesture.dismissible);
            }
        }
    }

    fn clear_gesture(&mut self) {
        self.long_press.cancel();
        self.gesture = None;
        self.velocity.clear();
        self.falsing.reset();
    }

    fn poll_long_press<H>(&mut self, host: &mut H, now: Duration)
    where
        H: SwipeHost<Item = I>,
    {
        if !self.long_press.poll(now) {
            return;
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.dragging || gesture.long_press_sent {
            return;
        }

        gesture.long_press_sent = true;
        let handled = host.on_long_press(gesture.item, gesture.down_position);
        tracing::debug!("long press on {:?} (handled: {handled})", gesture.item);
    }

    fn update_swipe_progress<H>(&self, host: &mut H, item: I, dismissible: bool)
    where
        H: SwipeHost<Item = I>,
    {
        let axis = self.axis();
        let progress = swipe_progress(
            host.translation(item, axis),
            host.extent(item, axis),
            self.config.min_swipe_progress,
            self.config.max_swipe_progress,
        );

        if host.report_progress(item, dismissible, progress) || !dismissible {
            return;
        }
        if !self.config.disable_hardware_layers {
            host.set_layer_mode(item, layer_mode_for_progress(progress));
        }
        host.set_alpha(item, swipe_alpha(progress));
    }

    // =========================================================================
    // Animations
    // =========================================================================

    /// Animate `item` off screen
    ///
    /// Any animation already running on the item is canceled first. Without
    /// [`DismissOptions::accelerate`] the curve is planned from `velocity`.
    pub fn dismiss_item<H>(
        &mut self,
        host: &mut H,
        item: I,
        velocity: f32,
        now: Duration,
        options: DismissOptions,
    ) where
        H: SwipeHost<Item = I>,
    {
        if self.pending.contains(item) {
            self.cancel_animation(host, item);
        }

        let axis = self.axis();
        let translation = host.translation(item, axis);
        let extent = host.extent(item, axis);
        let target = dismiss_target(
            axis,
            velocity,
            translation,
            extent,
            host.is_rtl(item),
            options.dismiss_all,
        );

        let plan = if options.accelerate {
            self.accelerate_plan(translation, target, velocity, options.duration_ms)
        } else {
            self.planner
                .plan_dismiss(translation, target, velocity, extent)
        };

        let restore_layer = !self.config.disable_hardware_layers;
        if restore_layer {
            host.set_layer_mode(item, LayerMode::Hardware);
        }

        tracing::debug!(
            "dismissing {:?}: {translation} -> {target} over {}ms ({:?})",
            item,
            plan.duration_ms,
            plan.fling_mode
        );

        let mut driver = AnimationDriver::new(translation, target, plan);
        driver.start(now, options.delay);
        self.insert_pending(
            item,
            PendingAnimation {
                driver,
                kind: AnimationKind::Dismiss,
                dismissible: host.is_dismissible(item),
                velocity,
                restore_layer,
                on_complete: options.on_complete,
            },
        );
    }

    /// Animate `item` back to `target` with the snap-back curve
    pub fn snap_item<H>(&mut self, host: &mut H, item: I, target: f32, velocity: f32, now: Duration)
    where
        H: SwipeHost<Item = I>,
    {
        let dismissible = host.is_dismissible(item);
        self.start_snap(host, item, target, velocity, now, dismissible);
    }

    fn start_snap<H>(
        &mut self,
        host: &mut H,
        item: I,
        target: f32,
        velocity: f32,
        now: Duration,
        dismissible: bool,
    ) where
        H: SwipeHost<Item = I>,
    {
        if self.pending.contains(item) {
            self.cancel_animation(host, item);
        }

        let translation = host.translation(item, self.axis());
        let plan = AnimationPlan::new(self.config.snap_duration_ms, Easing::AccelerateDecelerate);
        tracing::debug!("snapping {:?}: {translation} -> {target}", item);

        let mut driver = AnimationDriver::new(translation, target, plan);
        driver.start(now, Duration::ZERO);
        self.insert_pending(
            item,
            PendingAnimation {
                driver,
                kind: AnimationKind::SnapBack,
                dismissible,
                velocity,
                restore_layer: !self.config.disable_hardware_layers,
                on_complete: None,
            },
        );
    }

    fn accelerate_plan(
        &self,
        translation: f32,
        target: f32,
        velocity: f32,
        fixed_duration_ms: Option<u32>,
    ) -> AnimationPlan {
        let duration_ms = match fixed_duration_ms {
            Some(ms) => ms,
            None if velocity != 0.0 => {
                let travel_ms = (target - translation).abs() * 1000.0 / velocity.abs();
                (travel_ms as u32).min(self.config.max_escape_duration_ms)
            }
            None => self.config.default_escape_duration_ms,
        };
        AnimationPlan::new(duration_ms, Easing::FastOutLinearIn)
    }

    fn insert_pending(&mut self, item: I, animation: PendingAnimation) {
        if self.pending.insert(item, animation).is_err() {
            tracing::warn!("{:?} already has an animation; new one dropped", item);
        }
    }

    /// Advance animations and the long-press timer to `now`
    ///
    /// Returns whether anything still needs further ticks.
    pub fn tick<H>(&mut self, host: &mut H, now: Duration) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        self.poll_long_press(host, now);

        let axis = self.axis();
        for item in self.pending.items() {
            let Some(animation) = self.pending.get_mut(item) else {
                continue;
            };
            let frame = animation.driver.sample(now);
            let dismissible = animation.dismissible;

            host.set_translation(item, axis, frame.value);
            if frame.finished {
                self.finish(host, item, AnimationOutcome::Completed);
            } else {
                self.update_swipe_progress(host, item, dismissible);
            }
        }

        self.next_deadline().is_some()
    }

    /// Cancel the animation running on `item`
    ///
    /// The item stays where the last frame left it. Completion steps still
    /// run, tagged [`AnimationOutcome::Canceled`]. Returns whether an
    /// animation was canceled.
    pub fn cancel_animation<H>(&mut self, host: &mut H, item: I) -> bool
    where
        H: SwipeHost<Item = I>,
    {
        let Some(animation) = self.pending.get_mut(item) else {
            return false;
        };
        if !animation.driver.cancel() {
            return false;
        }
        self.finish(host, item, AnimationOutcome::Canceled);
        true
    }

    /// Abort the current gesture and cancel every running animation
    ///
    /// Hosts must call this before they go away.
    pub fn cancel_all<H>(&mut self, host: &mut H)
    where
        H: SwipeHost<Item = I>,
    {
        if let Some(gesture) = self.gesture {
            if gesture.dragging {
                host.on_drag_cancelled(gesture.item);
            }
        }
        self.clear_gesture();

        for item in self.pending.items() {
            self.cancel_animation(host, item);
        }
    }

    fn finish<H>(&mut self, host: &mut H, item: I, outcome: AnimationOutcome)
    where
        H: SwipeHost<Item = I>,
    {
        let Some(dismissible) = self.pending.get(item).map(|a| a.dismissible) else {
            return;
        };
        self.update_swipe_progress(host, item, dismissible);

        let Some(animation) = self.pending.remove(item) else {
            return;
        };
        tracing::debug!("{:?} animation on {:?} ended: {:?}", animation.kind, item, outcome);

        match (animation.kind, outcome) {
            (AnimationKind::Dismiss, AnimationOutcome::Completed) => host.on_dismissed(item),
            (AnimationKind::Dismiss, AnimationOutcome::Canceled) => host.on_dismiss_canceled(item),
            (AnimationKind::SnapBack, _) => host.on_snapped_back(item, animation.velocity),
        }

        if let Some(on_complete) = animation.on_complete {
            on_complete(outcome);
        }

        if animation.restore_layer {
            host.set_layer_mode(item, LayerMode::None);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn phase(&self) -> GesturePhase {
        match self.gesture {
            None => GesturePhase::Idle,
            Some(g) if g.long_press_sent => GesturePhase::LongPressed,
            Some(g) if g.dragging => GesturePhase::Dragging,
            Some(_) => GesturePhase::Armed,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|g| g.dragging)
    }

    /// Item under the current gesture
    pub fn current_item(&self) -> Option<I> {
        self.gesture.map(|g| g.item)
    }

    pub fn is_long_press_sent(&self) -> bool {
        self.gesture.is_some_and(|g| g.long_press_sent)
    }

    pub fn is_touch_above_falsing_threshold(&self) -> bool {
        self.falsing.is_exceeded()
    }

    /// Whether any snap-back animation is running
    pub fn is_snapping(&self) -> bool {
        self.pending
            .iter()
            .any(|(_, a)| a.kind == AnimationKind::SnapBack)
    }

    /// Whether `item` is animating off screen
    pub fn is_dismiss_pending(&self, item: I) -> bool {
        self.pending
            .get(item)
            .is_some_and(|a| a.kind == AnimationKind::Dismiss)
    }

    /// Whether `item` has any animation running
    pub fn is_animating(&self, item: I) -> bool {
        self.pending.contains(item)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_running_animations(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest time at which [`Self::tick`] has work to do
    ///
    /// While animations run this is the earliest end time; hosts should tick
    /// every frame until then rather than sleep until it.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, a)| a.driver.end_time())
            .chain(self.long_press.deadline())
            .min()
    }
}

impl<I: fmt::Debug> fmt::Debug for TouchGestureTracker<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchGestureTracker")
            .field("axis", &self.config.axis)
            .field("gesture", &self.gesture)
            .field("pending", &self.pending)
            .finish()
    }
}
