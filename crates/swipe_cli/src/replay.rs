//! Trace replay
//!
//! Feeds a trace through a [`TouchGestureTracker`] against a scripted host.
//! Frames are ticked at the trace's frame interval between events, then
//! until every animation has settled.

use serde::Serialize;
use std::time::Duration;
use swipe_core::{SwipeConfig, TouchGestureTracker};

use crate::host::{HostEvent, ItemState, ScriptedHost};
use crate::trace::Trace;

/// Upper bound on how long the replay keeps ticking after the last event
const SETTLE_LIMIT_MS: u64 = 10_000;

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub events: Vec<HostEvent>,
    pub items: Vec<ItemState>,
    /// Time at which the last animation settled (ms)
    pub settled_at_ms: u64,
    /// Animations still running when the settle limit was hit
    pub unsettled: usize,
}

pub fn replay(trace: &Trace, config: SwipeConfig) -> ReplayReport {
    let mut host = ScriptedHost::from_trace(trace);
    let mut tracker = TouchGestureTracker::new(config);
    let frame_ms = trace.frame_ms.max(1);

    let mut next_frame = trace.events.first().map_or(0, |event| event.time_ms);
    for event in &trace.events {
        while next_frame < event.time_ms {
            tick(&mut tracker, &mut host, next_frame);
            next_frame += frame_ms;
        }

        host.set_clock(event.time_ms);
        let pointer = event.to_pointer_event();
        let consumed = tracker.on_touch_event(&mut host, &pointer);
        tracing::debug!(
            "{:>6}ms  {:?} at ({}, {}) consumed={} phase={:?}",
            event.time_ms,
            event.action,
            event.x,
            event.y,
            consumed,
            tracker.phase()
        );
    }

    let last_event = trace.events.last().map_or(0, |event| event.time_ms);
    let limit = last_event + SETTLE_LIMIT_MS;
    let mut now = next_frame.max(last_event);
    while tracker.next_deadline().is_some() && now <= limit {
        tick(&mut tracker, &mut host, now);
        now += frame_ms;
    }

    let unsettled = tracker.pending_count();
    if unsettled > 0 {
        tracing::warn!("{} animation(s) still running after {}ms", unsettled, SETTLE_LIMIT_MS);
    }
    let settled_at_ms = now.saturating_sub(frame_ms);

    // The host goes away here
    host.set_clock(settled_at_ms);
    tracker.cancel_all(&mut host);

    ReplayReport {
        events: host.log().to_vec(),
        items: host.item_states(),
        settled_at_ms,
        unsettled,
    }
}

fn tick(tracker: &mut TouchGestureTracker<u32>, host: &mut ScriptedHost, now_ms: u64) {
    host.set_clock(now_ms);
    tracker.tick(host, Duration::from_millis(now_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostEventKind;

    fn trace(events: &str) -> Trace {
        let text = format!(
            r#"
            [[items]]
            id = 1
            x = 0.0
            y = 0.0
            width = 1000.0
            height = 100.0

            {events}
            "#
        );
        Trace::parse(&text).unwrap()
    }

    fn event(time_ms: u64, action: &str, x: f32) -> String {
        format!("[[events]]\ntime_ms = {time_ms}\naction = \"{action}\"\nx = {x:.1}\ny = 50.0\n")
    }

    fn kinds(report: &ReplayReport) -> Vec<HostEventKind> {
        report.events.iter().map(|event| event.kind).collect()
    }

    #[test]
    fn test_fling_replay_dismisses() {
        let events = [
            event(0, "down", 100.0),
            event(16, "move", 140.0),
            event(32, "move", 260.0),
            event(48, "move", 420.0),
            event(64, "up", 420.0),
        ]
        .concat();
        let report = replay(&trace(&events), SwipeConfig::default());

        assert_eq!(
            kinds(&report),
            vec![HostEventKind::DragBegin, HostEventKind::Dismissed]
        );
        assert_eq!(report.items[0].translation, 1000.0);
        assert_eq!(report.unsettled, 0);
        assert!(!report.items[0].hardware_layer);
    }

    #[test]
    fn test_tap_does_nothing() {
        let events = [event(0, "down", 100.0), event(80, "up", 100.0)].concat();
        let report = replay(&trace(&events), SwipeConfig::default());
        assert!(report.events.is_empty());
        assert_eq!(report.items[0].translation, 0.0);
    }

    #[test]
    fn test_hold_becomes_long_press() {
        let events = [
            event(0, "down", 100.0),
            event(900, "move", 400.0),
            event(950, "up", 400.0),
        ]
        .concat();
        let report = replay(&trace(&events), SwipeConfig::default());

        assert_eq!(
            kinds(&report),
            vec![HostEventKind::LongPress { x: 100.0, y: 50.0 }]
        );
        assert!(report.events[0].time_ms >= 750);
        assert_eq!(report.items[0].translation, 0.0);
    }
}
