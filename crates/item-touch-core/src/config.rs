//! Timing and distance thresholds for gesture detection.

use std::time::Duration;

/// Default delay in milliseconds before a held touch shows its pressed state.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 100;

/// Default long-press timeout in milliseconds.
///
/// A touch must be held for at least this duration to trigger a long-press.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Default touch slop in logical pixels.
///
/// Movement beyond this distance from the down position turns a tap into a
/// scroll.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Configuration for the gesture detector.
///
/// A container hands this out as its display context; the values are scaled
/// for the display the container is shown on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Delay after the down event before show-press fires.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub tap_timeout: Duration,
    /// Delay after the down event before long-press fires.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub long_press_timeout: Duration,
    /// Maximum movement in pixels that still counts as a tap.
    pub touch_slop: f32,
    /// Whether long-press is detected at all.
    pub long_press_enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(DEFAULT_TAP_TIMEOUT_MS),
            long_press_timeout: Duration::from_millis(DEFAULT_LONG_PRESS_TIMEOUT_MS),
            touch_slop: DEFAULT_TOUCH_SLOP,
            long_press_enabled: true,
        }
    }
}

impl GestureConfig {
    /// Default configuration with the touch slop scaled for a display.
    ///
    /// Non-finite or non-positive scale factors are treated as 1.0.
    pub fn scaled(scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor as f32
        } else {
            1.0
        };
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP * scale,
            ..Self::default()
        }
    }

    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    pub fn with_long_press_timeout(mut self, timeout: Duration) -> Self {
        self.long_press_timeout = timeout;
        self
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn with_long_press_enabled(mut self, enabled: bool) -> Self {
        self.long_press_enabled = enabled;
        self
    }

    /// Squared touch slop, for comparison with [`Point::distance_squared`].
    ///
    /// [`Point::distance_squared`]: crate::geometry::Point::distance_squared
    #[inline]
    pub fn touch_slop_squared(&self) -> f32 {
        self.touch_slop * self.touch_slop
    }
}

static_assertions::assert_impl_all!(GestureConfig: Send, Sync);

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
