//! Recorded touch traces
//!
//! A trace is a TOML file describing the items on screen and the pointer
//! events of one or more gestures:
//!
//! ```toml
//! falsing_protection = false
//!
//! [[items]]
//! id = 1
//! x = 0.0
//! y = 0.0
//! width = 1000.0
//! height = 100.0
//!
//! [[events]]
//! time_ms = 0
//! action = "down"
//! x = 100.0
//! y = 50.0
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use swipe_platform::{Point, PointerAction, PointerEvent, Rect};

fn default_true() -> bool {
    true
}

fn default_factor() -> f32 {
    1.0
}

fn default_frame_ms() -> u64 {
    16
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trace {
    /// Whether the host asks for falsing protection
    #[serde(default)]
    pub falsing_protection: bool,
    /// Scale applied to the falsing threshold
    #[serde(default = "default_factor")]
    pub falsing_factor: f32,
    /// Frame interval used to tick animations (ms)
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default)]
    pub items: Vec<TraceItem>,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceItem {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_true")]
    pub dismissible: bool,
    /// Lay the item out right-to-left
    #[serde(default)]
    pub rtl: bool,
}

impl TraceItem {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceAction {
    Down,
    Move,
    Up,
    Cancel,
}

impl From<TraceAction> for PointerAction {
    fn from(action: TraceAction) -> Self {
        match action {
            TraceAction::Down => PointerAction::Down,
            TraceAction::Move => PointerAction::Move,
            TraceAction::Up => PointerAction::Up,
            TraceAction::Cancel => PointerAction::Cancel,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TraceEvent {
    pub time_ms: u64,
    pub action: TraceAction,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub pointer: u64,
}

impl TraceEvent {
    pub fn to_pointer_event(self) -> PointerEvent {
        PointerEvent::new(
            self.action.into(),
            Point::new(self.x, self.y),
            Duration::from_millis(self.time_ms),
        )
        .with_pointer_id(self.pointer)
    }
}

impl Trace {
    /// Load and check a trace file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let trace: Trace = toml::from_str(content)?;
        trace.check()?;
        Ok(trace)
    }

    fn check(&self) -> Result<()> {
        if self.frame_ms == 0 {
            anyhow::bail!("frame_ms must be greater than zero");
        }

        let mut seen = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if seen.contains(&item.id) {
                anyhow::bail!("Duplicate item id {}", item.id);
            }
            if item.width <= 0.0 || item.height <= 0.0 {
                anyhow::bail!("Item {} has an empty rectangle", item.id);
            }
            seen.push(item.id);
        }

        for pair in self.events.windows(2) {
            if pair[1].time_ms < pair[0].time_ms {
                anyhow::bail!(
                    "Events out of order: {}ms follows {}ms",
                    pair[1].time_ms,
                    pair[0].time_ms
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[items]]
        id = 7
        x = 0.0
        y = 0.0
        width = 400.0
        height = 80.0
        dismissible = false

        [[events]]
        time_ms = 0
        action = "down"
        x = 10.0
        y = 10.0

        [[events]]
        time_ms = 16
        action = "move"
        x = 60.0
        y = 12.0
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let trace = Trace::parse(SAMPLE).unwrap();
        assert!(!trace.falsing_protection);
        assert_eq!(trace.falsing_factor, 1.0);
        assert_eq!(trace.frame_ms, 16);
        assert_eq!(trace.items.len(), 1);
        assert!(!trace.items[0].dismissible);
        assert!(!trace.items[0].rtl);

        let event = trace.events[1].to_pointer_event();
        assert_eq!(event.action, PointerAction::Move);
        assert_eq!(event.position, Point::new(60.0, 12.0));
        assert_eq!(event.timestamp, Duration::from_millis(16));
    }

    #[test]
    fn test_out_of_order_events_are_rejected() {
        let text = r#"
            [[events]]
            time_ms = 20
            action = "down"
            x = 0.0
            y = 0.0

            [[events]]
            time_ms = 10
            action = "up"
            x = 0.0
            y = 0.0
        "#;
        let err = Trace::parse(text).unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_duplicate_items_are_rejected() {
        let text = r#"
            [[items]]
            id = 1
            x = 0.0
            y = 0.0
            width = 10.0
            height = 10.0

            [[items]]
            id = 1
            x = 0.0
            y = 10.0
            width = 10.0
            height = 10.0
        "#;
        assert!(Trace::parse(text).is_err());
    }
}
