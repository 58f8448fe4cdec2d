//! Motion events delivered to touch listeners.
//!
//! A [`MotionEvent`] describes one step of a touch sequence: the first finger
//! going down, movement, additional fingers, and the sequence ending. Time is
//! carried on the event as a [`Duration`] on a monotonic clock chosen by the
//! host, which keeps gesture detection deterministic.

use std::time::Duration;

use crate::geometry::Point;

/// The kind of step a motion event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// The first pointer went down, starting a new sequence.
    Down,
    /// A pointer moved.
    Move,
    /// The last pointer went up, ending the sequence.
    Up,
    /// The sequence was aborted by the host.
    Cancel,
    /// An additional pointer went down while the sequence is active.
    PointerDown,
    /// A non-final pointer went up.
    PointerUp,
}

impl MotionAction {
    /// Returns true if this action ends the current sequence.
    #[inline]
    pub fn ends_sequence(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// Per-pointer touch phase as reported by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The touch started.
    Started,
    /// The touch moved.
    Moved,
    /// The touch ended normally.
    Ended,
    /// The touch was cancelled by the system.
    Cancelled,
}

/// A single touch motion event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    action: MotionAction,
    position: Point,
    pointer_id: u64,
    pointer_count: usize,
    event_time: Duration,
    down_time: Duration,
}

impl MotionEvent {
    /// Create a new motion event.
    ///
    /// `down_time` is the time the first pointer of the sequence went down.
    pub fn new(
        action: MotionAction,
        position: Point,
        pointer_id: u64,
        pointer_count: usize,
        event_time: Duration,
        down_time: Duration,
    ) -> Self {
        Self {
            action,
            position,
            pointer_id,
            pointer_count,
            event_time,
            down_time,
        }
    }

    /// A single-pointer `Down` event at `time`.
    pub fn down(x: f32, y: f32, time: Duration) -> Self {
        Self::new(MotionAction::Down, Point::new(x, y), 0, 1, time, time)
    }

    /// A single-pointer `Move` event belonging to a sequence that started at `down_time`.
    pub fn moved(x: f32, y: f32, time: Duration, down_time: Duration) -> Self {
        Self::new(MotionAction::Move, Point::new(x, y), 0, 1, time, down_time)
    }

    /// A single-pointer `Up` event belonging to a sequence that started at `down_time`.
    pub fn up(x: f32, y: f32, time: Duration, down_time: Duration) -> Self {
        Self::new(MotionAction::Up, Point::new(x, y), 0, 1, time, down_time)
    }

    /// A `Cancel` event belonging to a sequence that started at `down_time`.
    pub fn cancel(x: f32, y: f32, time: Duration, down_time: Duration) -> Self {
        Self::new(MotionAction::Cancel, Point::new(x, y), 0, 1, time, down_time)
    }

    pub fn action(&self) -> MotionAction {
        self.action
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Identifier of the pointer this event is about.
    pub fn pointer_id(&self) -> u64 {
        self.pointer_id
    }

    /// Number of pointers down when the event was produced, including the
    /// pointer that is going up for `Up`/`PointerUp`.
    pub fn pointer_count(&self) -> usize {
        self.pointer_count
    }

    pub fn event_time(&self) -> Duration {
        self.event_time
    }

    pub fn down_time(&self) -> Duration {
        self.down_time
    }
}

static_assertions::assert_impl_all!(MotionEvent: Send, Sync, Copy);
