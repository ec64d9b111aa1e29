//! Release velocity estimation
//!
//! Keeps a short rolling window of pointer samples and reports the average
//! velocity across it. Older samples are dropped as new ones arrive, so a
//! finger that stops before lifting reports (close to) zero.

use std::collections::VecDeque;
use std::time::Duration;

use swipe_platform::{Axis, Point, PointerEvent};

const MAX_SAMPLES: usize = 20;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time: Duration,
    position: Point,
}

/// Rolling-window pointer velocity tracker
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    window: Duration,
}

impl VelocityTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
            window,
        }
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a pointer sample
    pub fn add(&mut self, event: &PointerEvent) {
        if let Some(last) = self.samples.back() {
            if event.timestamp < last.time {
                tracing::warn!(
                    "ignoring pointer sample at {:?} earlier than last {:?}",
                    event.timestamp,
                    last.time
                );
                return;
            }
        }

        self.samples.push_back(Sample {
            time: event.timestamp,
            position: event.position,
        });
        self.trim();
    }

    fn trim(&mut self) {
        let Some(&Sample { time, .. }) = self.samples.back() else {
            return;
        };

        while let Some(first) = self.samples.front() {
            if self.samples.len() <= MAX_SAMPLES && time <= first.time + self.window {
                break;
            }
            self.samples.pop_front();
        }
    }

    /// Velocity along `axis` in px/s, clamped to `±max_velocity`
    pub fn velocity(&self, axis: Axis, max_velocity: f32) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };

        let elapsed = (last.time - first.time).as_secs_f32();
        if elapsed <= 0.0 {
            return 0.0;
        }

        let delta = axis.along(last.position) - axis.along(first.position);
        let max = max_velocity.abs();
        (delta / elapsed).clamp(-max, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32, ms: u64) -> PointerEvent {
        PointerEvent::moved(Point::new(x, 0.0), Duration::from_millis(ms))
    }

    #[test]
    fn test_empty_tracker_reports_zero() {
        let tracker = VelocityTracker::new(Duration::from_millis(100));
        assert_eq!(tracker.velocity(Axis::Horizontal, 4000.0), 0.0);
    }

    #[test]
    fn test_single_sample_reports_zero() {
        let mut tracker = VelocityTracker::new(Duration::from_millis(100));
        tracker.add(&sample(10.0, 0));
        assert_eq!(tracker.velocity(Axis::Horizontal, 4000.0), 0.0);
    }

    #[test]
    fn test_constant_motion() {
        let mut tracker = VelocityTracker::new(Duration::from_millis(100));
        for i in 0..6 {
            tracker.add(&sample(i as f32 * 10.0, i * 10));
        }
        // 10px per 10ms
        let v = tracker.velocity(Axis::Horizontal, 4000.0);
        assert!((v - 1000.0).abs() < 1e-2, "{v}");
        assert_eq!(tracker.velocity(Axis::Vertical, 4000.0), 0.0);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let mut tracker = VelocityTracker::new(Duration::from_millis(100));
        tracker.add(&sample(0.0, 0));
        tracker.add(&sample(-500.0, 10));
        assert_eq!(tracker.velocity(Axis::Horizontal, 4000.0), -4000.0);
    }

    #[test]
    fn test_old_samples_leave_the_window() {
        let mut tracker = VelocityTracker::new(Duration::from_millis(100));
        tracker.add(&sample(0.0, 0));
        tracker.add(&sample(300.0, 50));
        // Finger rests, then lifts much later at the same spot
        tracker.add(&sample(300.0, 400));
        tracker.add(&sample(300.0, 450));
        assert_eq!(tracker.velocity(Axis::Horizontal, 4000.0), 0.0);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_out_of_order_sample_is_ignored() {
        let mut tracker = VelocityTracker::new(Duration::from_millis(100));
        tracker.add(&sample(0.0, 20));
        tracker.add(&sample(50.0, 10));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_sample_count_is_bounded() {
        let mut tracker = VelocityTracker::new(Duration::from_secs(10));
        for i in 0..50 {
            tracker.add(&sample(i as f32, i));
        }
        assert_eq!(tracker.len(), MAX_SAMPLES);
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
