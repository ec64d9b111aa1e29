//! Scripted host
//!
//! A [`SwipeHost`] backed by the items of a trace. It applies every visual
//! change the engine asks for and logs each callback with the replay clock.

use serde::Serialize;
use swipe_core::{LayerMode, SwipeHost};
use swipe_platform::{Axis, Point, Rect};

use crate::trace::Trace;

/// What the engine told the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEventKind {
    DragBegin,
    DragCancelled,
    SnappedBack { velocity: f32 },
    Dismissed,
    DismissCanceled,
    LongPress { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HostEvent {
    pub time_ms: u64,
    pub item: u32,
    #[serde(flatten)]
    pub kind: HostEventKind,
}

/// Final visual state of an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemState {
    pub id: u32,
    pub translation: f32,
    pub alpha: f32,
    pub progress: f32,
    pub hardware_layer: bool,
}

#[derive(Debug, Clone)]
struct ScriptedItem {
    id: u32,
    rect: Rect,
    dismissible: bool,
    rtl: bool,
    translation: f32,
    alpha: f32,
    progress: f32,
    layer: LayerMode,
}

#[derive(Debug)]
pub struct ScriptedHost {
    items: Vec<ScriptedItem>,
    falsing_protection: bool,
    falsing_factor: f32,
    now_ms: u64,
    log: Vec<HostEvent>,
}

impl ScriptedHost {
    pub fn from_trace(trace: &Trace) -> Self {
        let items = trace
            .items
            .iter()
            .map(|item| ScriptedItem {
                id: item.id,
                rect: item.rect(),
                dismissible: item.dismissible,
                rtl: item.rtl,
                translation: 0.0,
                alpha: 1.0,
                progress: 0.0,
                layer: LayerMode::None,
            })
            .collect();

        Self {
            items,
            falsing_protection: trace.falsing_protection,
            falsing_factor: trace.falsing_factor,
            now_ms: 0,
            log: Vec::new(),
        }
    }

    /// Set the time stamped on subsequent log entries
    pub fn set_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn log(&self) -> &[HostEvent] {
        &self.log
    }

    pub fn item_states(&self) -> Vec<ItemState> {
        self.items
            .iter()
            .map(|item| ItemState {
                id: item.id,
                translation: item.translation,
                alpha: item.alpha,
                progress: item.progress,
                hardware_layer: item.layer == LayerMode::Hardware,
            })
            .collect()
    }

    fn find(&self, id: u32) -> Option<&ScriptedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: u32) -> Option<&mut ScriptedItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    fn record(&mut self, item: u32, kind: HostEventKind) {
        tracing::info!("{:>6}ms  item {}  {:?}", self.now_ms, item, kind);
        self.log.push(HostEvent {
            time_ms: self.now_ms,
            item,
            kind,
        });
    }
}

impl SwipeHost for ScriptedHost {
    type Item = u32;

    fn item_at(&self, point: Point) -> Option<u32> {
        // Hit testing uses layout bounds, not the swiped position
        self.items
            .iter()
            .find(|item| item.rect.contains(point))
            .map(|item| item.id)
    }

    fn is_dismissible(&self, item: u32) -> bool {
        self.find(item).is_some_and(|item| item.dismissible)
    }

    fn needs_falsing_protection(&self) -> bool {
        self.falsing_protection
    }

    fn falsing_threshold_factor(&self) -> f32 {
        self.falsing_factor
    }

    fn on_drag_begin(&mut self, item: u32) {
        self.record(item, HostEventKind::DragBegin);
    }

    fn on_drag_cancelled(&mut self, item: u32) {
        self.record(item, HostEventKind::DragCancelled);
    }

    fn on_snapped_back(&mut self, item: u32, velocity: f32) {
        self.record(item, HostEventKind::SnappedBack { velocity });
    }

    fn on_dismissed(&mut self, item: u32) {
        self.record(item, HostEventKind::Dismissed);
    }

    fn on_dismiss_canceled(&mut self, item: u32) {
        self.record(item, HostEventKind::DismissCanceled);
    }

    fn report_progress(&mut self, item: u32, _is_dismissible: bool, progress: f32) -> bool {
        if let Some(entry) = self.find_mut(item) {
            entry.progress = progress;
        }
        false
    }

    fn translation(&self, item: u32, _axis: Axis) -> f32 {
        self.find(item).map_or(0.0, |item| item.translation)
    }

    fn set_translation(&mut self, item: u32, _axis: Axis, value: f32) {
        if let Some(entry) = self.find_mut(item) {
            entry.translation = value;
        }
    }

    fn extent(&self, item: u32, axis: Axis) -> f32 {
        self.find(item).map_or(0.0, |item| axis.extent(item.rect.size))
    }

    fn set_alpha(&mut self, item: u32, alpha: f32) {
        if let Some(entry) = self.find_mut(item) {
            entry.alpha = alpha;
        }
    }

    fn set_layer_mode(&mut self, item: u32, mode: LayerMode) {
        if let Some(entry) = self.find_mut(item) {
            entry.layer = mode;
        }
    }

    fn on_long_press(&mut self, item: u32, point: Point) -> bool {
        self.record(
            item,
            HostEventKind::LongPress {
                x: point.x,
                y: point.y,
            },
        );
        true
    }

    fn is_rtl(&self, item: u32) -> bool {
        self.find(item).is_some_and(|item| item.rtl)
    }
}
