//! Logging targets for item-touch.
//!
//! The crates use `tracing` for instrumentation and never install a
//! subscriber themselves. To see logs, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("item_touch::gesture=trace,item_touch::adapter=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Gesture detector state transitions.
    pub const GESTURE: &str = "item_touch::gesture";
    /// Raw touch to motion event conversion.
    pub const TRACKER: &str = "item_touch::tracker";
    /// Click resolution in the item touch adapter.
    pub const ADAPTER: &str = "item_touch::adapter";
    /// Item list dispatch and scrolling.
    pub const LIST: &str = "item_touch::list";
}
