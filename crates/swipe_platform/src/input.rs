//! Pointer input events
//!
//! The engine follows a single-pointer-stream model: hosts forward the
//! primary pointer of a touch sequence and the engine ignores extra downs
//! while a drag is in progress.

use std::time::Duration;

use crate::geometry::Point;

/// Phase of a pointer event within a touch sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Pointer touched down
    Down,
    /// Pointer moved while down
    Move,
    /// Pointer lifted
    Up,
    /// The sequence was aborted by the host (e.g. a parent stole the stream)
    Cancel,
}

impl PointerAction {
    /// Whether this action ends the touch sequence
    pub fn is_terminal(self) -> bool {
        matches!(self, PointerAction::Up | PointerAction::Cancel)
    }
}

/// A single pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened
    pub action: PointerAction,
    /// Position in host view coordinates
    pub position: Point,
    /// Event time on the host's monotonic clock
    pub timestamp: Duration,
    /// Identifier of the pointer that produced the sample
    pub pointer_id: u64,
}

impl PointerEvent {
    /// Create an event for the primary pointer
    pub fn new(action: PointerAction, position: Point, timestamp: Duration) -> Self {
        Self {
            action,
            position,
            timestamp,
            pointer_id: 0,
        }
    }

    pub fn down(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerAction::Down, position, timestamp)
    }

    pub fn moved(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerAction::Move, position, timestamp)
    }

    pub fn up(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerAction::Up, position, timestamp)
    }

    pub fn cancel(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerAction::Cancel, position, timestamp)
    }

    /// Set the pointer identifier
    pub fn with_pointer_id(mut self, pointer_id: u64) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
