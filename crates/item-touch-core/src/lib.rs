//! Input primitives for item-touch.
//!
//! This crate turns raw touch input into the primitive gestures an item list
//! reacts to:
//!
//! - [`geometry`]: points and rectangles for hit testing
//! - [`motion`]: motion events describing a touch sequence
//! - [`tracker`]: per-pointer touch input to motion events (with winit support)
//! - [`config`]: timing and distance thresholds
//! - [`detector`]: show-press, single tap and long-press detection

pub mod config;
pub mod detector;
pub mod geometry;
pub mod logging;
pub mod motion;
pub mod tracker;

pub use config::{
    GestureConfig, DEFAULT_LONG_PRESS_TIMEOUT_MS, DEFAULT_TAP_TIMEOUT_MS, DEFAULT_TOUCH_SLOP,
};
pub use detector::{GestureDetector, GestureListener};
pub use geometry::{Point, Rect, Size};
pub use motion::{MotionAction, MotionEvent, TouchPhase};
pub use tracker::TouchTracker;
