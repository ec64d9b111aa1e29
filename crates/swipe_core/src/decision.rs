//! Release decision
//!
//! Decides, from the state of a gesture at release, whether the item is
//! dismissed or snaps back, and which edge a dismissal heads for. Everything
//! here is a pure function of its inputs.

use swipe_platform::Axis;

/// Fraction of the item extent past which a release always counts as far enough
pub const FAR_ENOUGH_FRACTION: f32 = 0.4;

/// Snapshot of a gesture at the moment the pointer lifted
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseState {
    /// Release velocity along the drag axis (px/s)
    pub velocity: f32,
    /// Item translation along the drag axis (px)
    pub translation: f32,
    /// Item size along the drag axis (px)
    pub extent: f32,
    /// Whether the host allows dismissing the item
    pub dismissible: bool,
    /// Whether falsing protection refused the gesture
    pub vetoed: bool,
}

/// Verdict for a released gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Animate the item off screen
    Dismiss {
        /// The release was a fling in the drag direction
        flung: bool,
    },
    /// Animate the item back to translation zero
    SnapBack,
}

impl SwipeDecision {
    pub fn is_dismiss(self) -> bool {
        matches!(self, SwipeDecision::Dismiss { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissDecisionEngine {
    escape_velocity: f32,
}

impl DismissDecisionEngine {
    /// `escape_velocity` is in px/s
    pub fn new(escape_velocity: f32) -> Self {
        Self {
            escape_velocity: escape_velocity.abs(),
        }
    }

    pub fn escape_velocity(&self) -> f32 {
        self.escape_velocity
    }

    /// |d| > 0.4·L
    pub fn swiped_far_enough(&self, translation: f32, extent: f32) -> bool {
        translation.abs() > FAR_ENOUGH_FRACTION * extent
    }

    /// |v| > escape velocity, moving further in the direction already dragged
    pub fn swiped_fast_enough(&self, velocity: f32, translation: f32) -> bool {
        velocity.abs() > self.escape_velocity
            && translation != 0.0
            && velocity.signum() == translation.signum()
    }

    pub fn decide(&self, release: &ReleaseState) -> SwipeDecision {
        if !release.dismissible || release.vetoed {
            return SwipeDecision::SnapBack;
        }

        let flung = self.swiped_fast_enough(release.velocity, release.translation);
        if flung || self.swiped_far_enough(release.translation, release.extent) {
            SwipeDecision::Dismiss { flung }
        } else {
            SwipeDecision::SnapBack
        }
    }
}

/// Off-screen translation a dismissal animates to
///
/// Heads for the negative edge when the release moves that way, or at rest
/// when the item already sits on that side. An item released at rest in the
/// middle (or dismissed as part of a "dismiss all") leaves upwards on a
/// vertical axis and leftwards in right-to-left layouts.
pub fn dismiss_target(
    axis: Axis,
    velocity: f32,
    translation: f32,
    extent: f32,
    rtl: bool,
    dismiss_all: bool,
) -> f32 {
    let at_rest = velocity == 0.0;
    let centered_or_all = at_rest && (translation == 0.0 || dismiss_all);

    let negative = velocity < 0.0
        || (at_rest && translation < 0.0 && !dismiss_all)
        || (centered_or_all && axis == Axis::Vertical)
        || (centered_or_all && rtl);

    if negative {
        -extent
    } else {
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(velocity: f32, translation: f32) -> ReleaseState {
        ReleaseState {
            velocity,
            translation,
            extent: 1000.0,
            dismissible: true,
            vetoed: false,
        }
    }

    #[test]
    fn test_far_enough_boundary() {
        let engine = DismissDecisionEngine::new(100.0);
        assert!(!engine.swiped_far_enough(400.0, 1000.0));
        assert!(engine.swiped_far_enough(400.5, 1000.0));
        assert!(engine.swiped_far_enough(-401.0, 1000.0));
    }

    #[test]
    fn test_fast_enough_boundary_and_sign() {
        let engine = DismissDecisionEngine::new(100.0);
        assert!(!engine.swiped_fast_enough(100.0, 50.0));
        assert!(engine.swiped_fast_enough(100.5, 50.0));
        assert!(engine.swiped_fast_enough(-150.0, -50.0));
        // Flinging back towards the origin is not a dismissal fling
        assert!(!engine.swiped_fast_enough(-150.0, 50.0));
        assert!(!engine.swiped_fast_enough(150.0, 0.0));
    }

    #[test]
    fn test_release_at_half_extent_dismisses() {
        let engine = DismissDecisionEngine::new(100.0);
        assert_eq!(
            engine.decide(&release(0.0, 500.0)),
            SwipeDecision::Dismiss { flung: false }
        );
    }

    #[test]
    fn test_short_fast_fling_dismisses() {
        let engine = DismissDecisionEngine::new(100.0);
        assert_eq!(
            engine.decide(&release(150.0, 100.0)),
            SwipeDecision::Dismiss { flung: true }
        );
    }

    #[test]
    fn test_no_motion_snaps_back() {
        let engine = DismissDecisionEngine::new(100.0);
        assert_eq!(engine.decide(&release(0.0, 0.0)), SwipeDecision::SnapBack);
    }

    #[test]
    fn test_veto_and_non_dismissible_snap_back() {
        let engine = DismissDecisionEngine::new(100.0);
        let vetoed = ReleaseState {
            vetoed: true,
            ..release(150.0, 500.0)
        };
        assert_eq!(engine.decide(&vetoed), SwipeDecision::SnapBack);

        let fixed = ReleaseState {
            dismissible: false,
            ..release(150.0, 500.0)
        };
        assert_eq!(engine.decide(&fixed), SwipeDecision::SnapBack);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let engine = DismissDecisionEngine::new(100.0);
        let state = release(-120.0, -90.0);
        let first = engine.decide(&state);
        for _ in 0..10 {
            assert_eq!(engine.decide(&state), first);
        }
        assert_eq!(state, release(-120.0, -90.0));
    }

    #[test]
    fn test_dismiss_target_direction() {
        let h = Axis::Horizontal;
        assert_eq!(dismiss_target(h, 200.0, -10.0, 300.0, false, false), 300.0);
        assert_eq!(dismiss_target(h, -200.0, 10.0, 300.0, false, false), -300.0);
        // At rest: follow the side the item sits on
        assert_eq!(dismiss_target(h, 0.0, -10.0, 300.0, false, false), -300.0);
        assert_eq!(dismiss_target(h, 0.0, 10.0, 300.0, false, false), 300.0);
        // Dismiss-all ignores the resting side
        assert_eq!(dismiss_target(h, 0.0, -10.0, 300.0, false, true), 300.0);
        // Centered items
        assert_eq!(dismiss_target(h, 0.0, 0.0, 300.0, false, false), 300.0);
        assert_eq!(dismiss_target(h, 0.0, 0.0, 300.0, true, false), -300.0);
        assert_eq!(
            dismiss_target(Axis::Vertical, 0.0, 0.0, 300.0, false, false),
            -300.0
        );
    }
}
