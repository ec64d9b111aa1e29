//! Frame-driven animation driver
//!
//! A driver owns no timer: the host calls [`AnimationDriver::sample`] from its
//! frame callback with the current time and applies the returned value. All
//! calls happen on the UI thread, so there is nothing to lock.

use std::time::Duration;

use crate::fling::AnimationPlan;

/// How an animation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationOutcome {
    /// The clock ran out and the end value was applied
    Completed,
    /// The animation was aborted before reaching its end value
    Canceled,
}

impl AnimationOutcome {
    pub fn was_canceled(self) -> bool {
        self == AnimationOutcome::Canceled
    }
}

/// Lifecycle of a driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Created but not started
    Idle,
    /// Started; may still be inside its start delay
    Running,
    /// Reached the end value
    Finished,
    /// Aborted
    Canceled,
}

/// One evaluated animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverFrame {
    /// Animated value to apply
    pub value: f32,
    /// Normalized clock in `[0, 1]`
    pub fraction: f32,
    /// Whether this frame completed the animation
    pub finished: bool,
}

/// Executes an [`AnimationPlan`] between two values
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    from: f32,
    to: f32,
    plan: AnimationPlan,
    start_at: Duration,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(from: f32, to: f32, plan: AnimationPlan) -> Self {
        Self {
            from,
            to,
            plan,
            start_at: Duration::ZERO,
            state: DriverState::Idle,
        }
    }

    /// Start the clock at `now + delay`
    pub fn start(&mut self, now: Duration, delay: Duration) {
        if self.state != DriverState::Idle {
            return;
        }
        self.start_at = now + delay;
        self.state = DriverState::Running;
        tracing::trace!(
            "driver start: {} -> {} over {}ms (delay {:?})",
            self.from,
            self.to,
            self.plan.duration_ms,
            delay
        );
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn plan(&self) -> &AnimationPlan {
        &self.plan
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Whether the driver still owns its target's transform
    pub fn is_active(&self) -> bool {
        matches!(self.state, DriverState::Idle | DriverState::Running)
    }

    /// Time at which the animation reaches its end value
    pub fn end_time(&self) -> Duration {
        self.start_at + Duration::from_millis(u64::from(self.plan.duration_ms))
    }

    /// Value at a normalized clock position
    pub fn value_at(&self, fraction: f32) -> f32 {
        let progress = self.plan.curve.apply(fraction);
        self.from + (self.to - self.from) * progress
    }

    /// Advance the clock to `now` and evaluate the frame
    ///
    /// Sampling a driver that has not started, or that already ended,
    /// returns its resting value without changing state.
    pub fn sample(&mut self, now: Duration) -> DriverFrame {
        match self.state {
            DriverState::Idle => {
                return DriverFrame {
                    value: self.from,
                    fraction: 0.0,
                    finished: false,
                }
            }
            DriverState::Finished => {
                return DriverFrame {
                    value: self.to,
                    fraction: 1.0,
                    finished: false,
                }
            }
            DriverState::Canceled => {
                return DriverFrame {
                    value: self.from,
                    fraction: 0.0,
                    finished: false,
                }
            }
            DriverState::Running => {}
        }

        let elapsed = now.saturating_sub(self.start_at);
        let duration = Duration::from_millis(u64::from(self.plan.duration_ms));
        let fraction = (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0);

        if fraction >= 1.0 {
            self.state = DriverState::Finished;
            return DriverFrame {
                value: self.to,
                fraction: 1.0,
                finished: true,
            };
        }

        DriverFrame {
            value: self.value_at(fraction),
            fraction,
            finished: false,
        }
    }

    /// Abort the animation
    ///
    /// Returns `true` when a live animation was canceled. Canceling a driver
    /// that already finished or was already canceled does nothing.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = DriverState::Canceled;
        tracing::trace!("driver canceled ({} -> {})", self.from, self.to);
        true
    }
}
