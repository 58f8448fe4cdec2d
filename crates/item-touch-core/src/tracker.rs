//! Conversion from per-pointer touch input into motion events.
//!
//! Windowing systems report touches one pointer at a time, each with its own
//! phase. Gesture detection wants a single stream describing the whole touch
//! sequence, so [`TouchTracker`] keeps the set of active pointers and maps each
//! raw touch onto the matching [`MotionAction`].
//!
//! ```ignore
//! use item_touch_core::TouchTracker;
//!
//! let mut tracker = TouchTracker::new();
//!
//! // When receiving a winit touch event:
//! if let Some(event) = tracker.handle_winit_touch(touch, clock.elapsed()) {
//!     list.dispatch_touch_event(&event);
//! }
//! ```

use std::collections::HashSet;
use std::time::Duration;

use crate::geometry::Point;
use crate::logging::targets;
use crate::motion::{MotionAction, MotionEvent, TouchPhase};

/// Tracks active pointers and produces motion events.
#[derive(Debug, Default)]
pub struct TouchTracker {
    /// Pointer IDs of the currently active touches.
    active_touches: HashSet<u64>,
    /// When the first pointer of the current sequence went down.
    down_time: Option<Duration>,
}

impl TouchTracker {
    /// Creates a new touch tracker with no active pointers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the number of active touches.
    pub fn active_touch_count(&self) -> usize {
        self.active_touches.len()
    }

    /// Handles one raw touch and returns the motion event it produces.
    ///
    /// Returns `None` for input that does not belong to a tracked sequence,
    /// such as a move for a pointer that never went down.
    pub fn handle(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Point,
        event_time: Duration,
    ) -> Option<MotionEvent> {
        let action = match phase {
            TouchPhase::Started => {
                if self.active_touches.contains(&id) {
                    tracing::trace!(target: targets::TRACKER, id, "duplicate touch start ignored");
                    return None;
                }
                let action = if self.active_touches.is_empty() {
                    self.down_time = Some(event_time);
                    MotionAction::Down
                } else {
                    MotionAction::PointerDown
                };
                self.active_touches.insert(id);
                action
            }
            TouchPhase::Moved => {
                if !self.active_touches.contains(&id) {
                    return None;
                }
                MotionAction::Move
            }
            TouchPhase::Ended => {
                if !self.active_touches.contains(&id) {
                    return None;
                }
                if self.active_touches.len() == 1 {
                    MotionAction::Up
                } else {
                    MotionAction::PointerUp
                }
            }
            TouchPhase::Cancelled => {
                if self.active_touches.is_empty() {
                    return None;
                }
                MotionAction::Cancel
            }
        };

        let pointer_count = self.active_touches.len();
        let down_time = self.down_time.unwrap_or(event_time);

        match action {
            MotionAction::PointerUp => {
                self.active_touches.remove(&id);
            }
            MotionAction::Up | MotionAction::Cancel => {
                self.reset();
            }
            _ => {}
        }

        Some(MotionEvent::new(
            action,
            position,
            id,
            pointer_count,
            event_time,
            down_time,
        ))
    }

    /// Resets the tracker state, clearing all active touches.
    pub fn reset(&mut self) {
        self.active_touches.clear();
        self.down_time = None;
    }
}

#[cfg(feature = "winit")]
mod winit_support {
    use std::time::Duration;

    use winit::event::{Touch, TouchPhase as WinitTouchPhase};

    use super::TouchTracker;
    use crate::geometry::Point;
    use crate::motion::{MotionEvent, TouchPhase};

    impl From<WinitTouchPhase> for TouchPhase {
        fn from(phase: WinitTouchPhase) -> Self {
            match phase {
                WinitTouchPhase::Started => TouchPhase::Started,
                WinitTouchPhase::Moved => TouchPhase::Moved,
                WinitTouchPhase::Ended => TouchPhase::Ended,
                WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
            }
        }
    }

    impl TouchTracker {
        /// Handles a touch event from winit.
        ///
        /// winit does not timestamp touches, so the caller supplies the time
        /// from the same clock it uses for `dispatch_timeouts`.
        pub fn handle_winit_touch(
            &mut self,
            touch: Touch,
            event_time: Duration,
        ) -> Option<MotionEvent> {
            let position = Point::new(touch.location.x as f32, touch.location.y as f32);
            self.handle(touch.id, touch.phase.into(), position, event_time)
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
    fn test_single_finger_sequence() {
        let mut tracker = TouchTracker::new();

        let down = tracker
            .handle(1, TouchPhase::Started, Point::new(10.0, 10.0), ms(0))
            .unwrap();
        assert_eq!(down.action(), MotionAction::Down);
        assert_eq!(down.pointer_count(), 1);

        let moved = tracker
            .handle(1, TouchPhase::Moved, Point::new(12.0, 10.0), ms(16))
            .unwrap();
        assert_eq!(moved.action(), MotionAction::Move);
        assert_eq!(moved.down_time(), ms(0));
        assert_eq!(moved.position(), Point::new(12.0, 10.0));

        let up = tracker
            .handle(1, TouchPhase::Ended, Point::new(12.0, 10.0), ms(40))
            .unwrap();
        assert_eq!(up.action(), MotionAction::Up);
        assert_eq!(up.pointer_count(), 1);
        assert_eq!(tracker.active_touch_count(), 0);
    }

    #[test]
    fn test_second_finger() {
        let mut tracker = TouchTracker::new();
        tracker.handle(1, TouchPhase::Started, Point::new(0.0, 0.0), ms(0));

        let second = tracker
            .handle(2, TouchPhase::Started, Point::new(50.0, 0.0), ms(10))
            .unwrap();
        assert_eq!(second.action(), MotionAction::PointerDown);
        assert_eq!(second.pointer_count(), 2);
        assert_eq!(second.down_time(), ms(0));

        let lifted = tracker
            .handle(2, TouchPhase::Ended, Point::new(50.0, 0.0), ms(20))
            .unwrap();
        assert_eq!(lifted.action(), MotionAction::PointerUp);
        assert_eq!(lifted.pointer_count(), 2);

        let last = tracker
            .handle(1, TouchPhase::Ended, Point::new(0.0, 0.0), ms(30))
            .unwrap();
        assert_eq!(last.action(), MotionAction::Up);
    }

    #[test]
    fn test_untracked_pointer_is_ignored() {
        let mut tracker = TouchTracker::new();
        assert!(tracker
            .handle(9, TouchPhase::Moved, Point::ZERO, ms(0))
            .is_none());
        assert!(tracker
            .handle(9, TouchPhase::Ended, Point::ZERO, ms(0))
            .is_none());
        assert!(tracker
            .handle(9, TouchPhase::Cancelled, Point::ZERO, ms(0))
            .is_none());
    }

    #[test]
    fn test_cancel_clears_all_pointers() {
        let mut tracker = TouchTracker::new();
        tracker.handle(1, TouchPhase::Started, Point::ZERO, ms(0));
        tracker.handle(2, TouchPhase::Started, Point::ZERO, ms(5));

        let cancel = tracker
            .handle(1, TouchPhase::Cancelled, Point::ZERO, ms(10))
            .unwrap();
        assert_eq!(cancel.action(), MotionAction::Cancel);
        assert_eq!(cancel.pointer_count(), 2);
        assert_eq!(tracker.active_touch_count(), 0);

        // The next start begins a fresh sequence.
        let down = tracker
            .handle(3, TouchPhase::Started, Point::ZERO, ms(100))
            .unwrap();
        assert_eq!(down.action(), MotionAction::Down);
        assert_eq!(down.down_time(), ms(100));
    }

    #[cfg(feature = "winit")]
    #[test]
    fn test_winit_phase_conversion() {
        use winit::event::TouchPhase as WinitTouchPhase;

        assert_eq!(TouchPhase::from(WinitTouchPhase::Started), TouchPhase::Started);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Moved), TouchPhase::Moved);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Ended), TouchPhase::Ended);
        assert_eq!(
            TouchPhase::from(WinitTouchPhase::Cancelled),
            TouchPhase::Cancelled
        );
    }
}
