//! Accidental-gesture protection

/// Latches once a gesture has travelled far enough to count as deliberate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FalsingGuard {
    exceeded: bool,
}

impl FalsingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous gesture
    pub fn reset(&mut self) {
        self.exceeded = false;
    }

    /// Feed the displacement since the touch went down
    ///
    /// Returns whether the threshold has been exceeded at any point so far.
    pub fn observe(&mut self, displacement: f32, threshold: f32) -> bool {
        if !self.exceeded && displacement.abs() > threshold {
            tracing::trace!("falsing threshold {threshold} exceeded at {displacement}");
            self.exceeded = true;
        }
        self.exceeded
    }

    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    /// Whether a dismissal must be refused
    ///
    /// Only vetoes when the host asked for protection and the gesture never
    /// crossed the threshold.
    pub fn vetoes(&self, protection_needed: bool) -> bool {
        protection_needed && !self.exceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latches_once_exceeded() {
        let mut guard = FalsingGuard::new();
        assert!(!guard.observe(30.0, 70.0));
        assert!(!guard.observe(-70.0, 70.0));
        assert!(guard.observe(-70.5, 70.0));
        // Coming back under the threshold keeps the latch
        assert!(guard.observe(0.0, 70.0));
        assert!(guard.is_exceeded());

        guard.reset();
        assert!(!guard.is_exceeded());
    }

    #[test]
    fn test_veto_requires_protection() {
        let mut guard = FalsingGuard::new();
        assert!(guard.vetoes(true));
        assert!(!guard.vetoes(false));

        guard.observe(100.0, 70.0);
        assert!(!guard.vetoes(true));
    }
}
