//! Tap, show-press and long-press detection from motion events.
//!
//! [`GestureDetector`] classifies a touch sequence into the primitive
//! gestures an item list cares about and reports them to a
//! [`GestureListener`]:
//!
//! - **show-press**: the finger has been down for `tap_timeout` without
//!   leaving the tap region. Used to show pressed feedback.
//! - **single tap up**: the finger went up inside the tap region before a
//!   long-press was recognized.
//! - **long press**: the finger has been down for `long_press_timeout`
//!   without leaving the tap region.
//!
//! The detector never reads a clock. Timers are checked against the
//! timestamp of every incoming event, and hosts call
//! [`GestureDetector::check_timeouts`] between events (for example from a
//! frame callback) so that a finger held still still produces a long-press.
//!
//! # Usage
//!
//! ```ignore
//! use item_touch_core::{GestureConfig, GestureDetector, GestureListener, MotionEvent};
//!
//! struct Taps(u32);
//!
//! impl GestureListener for Taps {
//!     fn on_single_tap_up(&mut self, _event: &MotionEvent) -> bool {
//!         self.0 += 1;
//!         true
//!     }
//! }
//!
//! let mut detector = GestureDetector::new(GestureConfig::default());
//! let mut taps = Taps(0);
//! detector.on_touch_event(&down, &mut taps);
//! detector.on_touch_event(&up, &mut taps);
//! ```

use std::time::Duration;

use crate::config::GestureConfig;
use crate::logging::targets;
use crate::motion::{MotionAction, MotionEvent};

/// Receives gestures recognized by a [`GestureDetector`].
///
/// Every method has a do-nothing default, so implementors only override the
/// gestures they need.
pub trait GestureListener {
    /// A new touch sequence started.
    ///
    /// Returns whether the listener handled the event.
    fn on_down(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// The finger has rested on the same spot for the tap timeout.
    ///
    /// Called with the down event of the sequence.
    fn on_show_press(&mut self, _event: &MotionEvent) {}

    /// The finger went up inside the tap region and no long-press fired.
    ///
    /// Called with the up event. Returns whether the listener handled it.
    fn on_single_tap_up(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// The finger has rested on the same spot for the long-press timeout.
    ///
    /// Called with the down event of the sequence.
    fn on_long_press(&mut self, _event: &MotionEvent) {}

    /// A sequence that already delivered show-press ended without a tap or
    /// long-press: it turned into a scroll, gained a second pointer, or was
    /// cancelled.
    ///
    /// Called with the down event of the sequence.
    fn on_gesture_aborted(&mut self, _event: &MotionEvent) {}
}

/// State of the touch sequence currently being classified.
#[derive(Debug, Clone, Copy)]
struct Sequence {
    /// The down event that started the sequence.
    down: MotionEvent,
    /// When show-press fires, if still pending.
    show_press_at: Option<Duration>,
    /// When long-press fires, if still pending.
    long_press_at: Option<Duration>,
    /// Whether show-press has been delivered.
    show_press_delivered: bool,
    /// Whether long-press has been delivered.
    in_long_press: bool,
    /// Whether every event so far stayed within the touch slop.
    in_tap_region: bool,
}

impl Sequence {
    /// Whether an abort must be reported if the sequence ends now.
    fn needs_abort_notice(&self) -> bool {
        self.show_press_delivered && !self.in_long_press
    }
}

/// Detects show-press, single tap and long-press gestures.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    config: GestureConfig,
    sequence: Option<Sequence>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureDetector {
    /// Creates a detector with the given configuration.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            sequence: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_long_press_enabled(&self) -> bool {
        self.config.long_press_enabled
    }

    /// Enables or disables long-press detection.
    ///
    /// Disabling drops a pending long-press of the current sequence, so a
    /// finger that is held and then lifted produces a single tap.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.config.long_press_enabled = enabled;
        if !enabled && let Some(sequence) = self.sequence.as_mut() {
            sequence.long_press_at = None;
        }
    }

    /// Returns true while the current sequence is a recognized long-press.
    pub fn is_in_long_press(&self) -> bool {
        self.sequence.is_some_and(|s| s.in_long_press)
    }

    /// Returns true while a touch sequence is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.sequence.is_some()
    }

    /// The earliest time at which a pending show-press or long-press fires.
    ///
    /// Hosts can use this to schedule their next `check_timeouts` call.
    pub fn next_deadline(&self) -> Option<Duration> {
        let sequence = self.sequence.as_ref()?;
        match (sequence.show_press_at, sequence.long_press_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Forgets the current sequence without notifying anyone.
    pub fn reset(&mut self) {
        self.sequence = None;
    }

    /// Analyzes a motion event, invoking `listener` for recognized gestures.
    ///
    /// Returns whether the listener handled the event.
    pub fn on_touch_event<L>(&mut self, event: &MotionEvent, listener: &mut L) -> bool
    where
        L: GestureListener + ?Sized,
    {
        if event.action() != MotionAction::Down {
            self.fire_due(event.event_time(), listener);
        }

        match event.action() {
            MotionAction::Down => self.handle_down(event, listener),
            MotionAction::Move => {
                self.handle_move(event, listener);
                false
            }
            MotionAction::Up => self.handle_up(event, listener),
            MotionAction::Cancel => {
                if let Some(sequence) = self.sequence.take() {
                    tracing::trace!(target: targets::GESTURE, "sequence cancelled");
                    if sequence.needs_abort_notice() {
                        listener.on_gesture_aborted(&sequence.down);
                    }
                }
                false
            }
            MotionAction::PointerDown => {
                // A second finger means this is not a tap or long-press.
                self.leave_tap_region(listener);
                false
            }
            MotionAction::PointerUp => false,
        }
    }

    /// Fires show-press and long-press if their deadlines are at or before `now`.
    ///
    /// Returns true if any gesture fired.
    pub fn check_timeouts<L>(&mut self, now: Duration, listener: &mut L) -> bool
    where
        L: GestureListener + ?Sized,
    {
        self.fire_due(now, listener)
    }

    fn handle_down<L>(&mut self, event: &MotionEvent, listener: &mut L) -> bool
    where
        L: GestureListener + ?Sized,
    {
        if let Some(previous) = self.sequence.take() {
            tracing::trace!(target: targets::GESTURE, "unfinished sequence abandoned");
            if previous.needs_abort_notice() {
                listener.on_gesture_aborted(&previous.down);
            }
        }

        let now = event.event_time();
        let long_press_at = self
            .config
            .long_press_enabled
            .then(|| now + self.config.long_press_timeout);

        self.sequence = Some(Sequence {
            down: *event,
            show_press_at: Some(now + self.config.tap_timeout),
            long_press_at,
            show_press_delivered: false,
            in_long_press: false,
            in_tap_region: true,
        });

        tracing::trace!(
            target: targets::GESTURE,
            x = event.x(),
            y = event.y(),
            "sequence started"
        );

        listener.on_down(event)
    }

    fn handle_move<L>(&mut self, event: &MotionEvent, listener: &mut L)
    where
        L: GestureListener + ?Sized,
    {
        let Some(sequence) = self.sequence.as_ref() else {
            return;
        };
        if sequence.in_long_press || !sequence.in_tap_region {
            return;
        }

        let distance = sequence.down.position().distance_squared(event.position());
        if distance > self.config.touch_slop_squared() {
            tracing::trace!(target: targets::GESTURE, "touch left the tap region");
            self.leave_tap_region(listener);
        }
    }

    fn handle_up<L>(&mut self, event: &MotionEvent, listener: &mut L) -> bool
    where
        L: GestureListener + ?Sized,
    {
        let Some(sequence) = self.sequence.take() else {
            return false;
        };

        if sequence.in_long_press {
            // Tap and long-press are mutually exclusive for one sequence.
            tracing::trace!(target: targets::GESTURE, "long-press released");
            false
        } else if sequence.in_tap_region {
            tracing::trace!(target: targets::GESTURE, "single tap");
            listener.on_single_tap_up(event)
        } else {
            false
        }
    }

    fn leave_tap_region<L>(&mut self, listener: &mut L)
    where
        L: GestureListener + ?Sized,
    {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };
        if !sequence.in_tap_region {
            return;
        }

        sequence.in_tap_region = false;
        sequence.show_press_at = None;
        sequence.long_press_at = None;

        if sequence.needs_abort_notice() {
            listener.on_gesture_aborted(&sequence.down);
        }
    }

    fn fire_due<L>(&mut self, now: Duration, listener: &mut L) -> bool
    where
        L: GestureListener + ?Sized,
    {
        let Some(sequence) = self.sequence.as_mut() else {
            return false;
        };

        let long_press_due = sequence.long_press_at.is_some_and(|at| at <= now);
        let mut fired = false;

        // Show-press always precedes long-press, even when the long-press
        // timeout is configured shorter than the tap timeout.
        if let Some(at) = sequence.show_press_at
            && (at <= now || long_press_due)
        {
            sequence.show_press_at = None;
            sequence.show_press_delivered = true;
            tracing::trace!(target: targets::GESTURE, "show press");
            listener.on_show_press(&sequence.down);
            fired = true;
        }

        if long_press_due {
            sequence.long_press_at = None;
            sequence.in_long_press = true;
            tracing::trace!(target: targets::GESTURE, "long press");
            listener.on_long_press(&sequence.down);
            fired = true;
        }

        fired
    }
}
