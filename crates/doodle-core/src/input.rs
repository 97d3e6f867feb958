//! Pointer input events and sources.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Pointer event in surface pixel coordinates.
///
/// `time` is a monotonic timestamp from the input source (e.g. DOM `timeStamp`);
/// it drives move rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, time: Duration },
    Move { position: Point, time: Duration },
    Up { position: Point, time: Duration },
    /// Abandon the in-progress gesture without committing.
    Cancel,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64, time_ms: u64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            time: Duration::from_millis(time_ms),
        }
    }

    pub fn moved(x: f64, y: f64, time_ms: u64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
            time: Duration::from_millis(time_ms),
        }
    }

    pub fn up(x: f64, y: f64, time_ms: u64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            time: Duration::from_millis(time_ms),
        }
    }
}

/// A source of pointer events, polled by the engine.
pub trait PointerSource {
    /// Next pending event, or `None` when the source is drained.
    fn poll_event(&mut self) -> Option<PointerEvent>;
}

/// Queue-backed input source for headless drivers and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<PointerEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<PointerEvent> for ScriptedInput {
    fn from_iter<T: IntoIterator<Item = PointerEvent>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl PointerSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<PointerEvent> {
        self.events.pop_front()
    }
}
