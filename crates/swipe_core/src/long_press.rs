//! Long-press detection
//!
//! The watcher holds a single deadline. The host polls it (through the
//! tracker's `tick`) and it fires at most once per schedule.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongPressWatcher {
    deadline: Option<Duration>,
}

impl LongPressWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the watcher to fire `delay` after `now`, replacing any earlier schedule
    pub fn schedule(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            tracing::trace!("long press canceled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns `true` exactly once, on the first poll at or past the deadline
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_once_after_deadline() {
        let mut watcher = LongPressWatcher::new();
        watcher.schedule(ms(100), ms(750));
        assert_eq!(watcher.deadline(), Some(ms(850)));

        assert!(!watcher.poll(ms(849)));
        assert!(watcher.poll(ms(850)));
        assert!(!watcher.poll(ms(900)));
        assert!(!watcher.is_pending());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut watcher = LongPressWatcher::new();
        watcher.schedule(ms(0), ms(750));
        watcher.cancel();
        assert!(!watcher.poll(ms(1000)));
        // Canceling again is harmless
        watcher.cancel();
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut watcher = LongPressWatcher::new();
        watcher.schedule(ms(0), ms(750));
        watcher.schedule(ms(500), ms(750));
        assert!(!watcher.poll(ms(800)));
        assert!(watcher.poll(ms(1250)));
    }
}
