//! Commonly used types, for glob import.
//!
//! ```ignore
//! use item_touch::prelude::*;
//! ```

pub use crate::adapter::ItemTouchListenerAdapter;
pub use crate::container::{
    ItemClickCallbacks, ItemContainer, OnItemClickListener, OnItemTouchListener, PressableView,
};
pub use crate::error::{AdapterError, AdapterResult};
pub use crate::list::{ItemList, ItemView};
pub use item_touch_core::{
    GestureConfig, GestureDetector, GestureListener, MotionAction, MotionEvent, Point, Rect,
    TouchPhase, TouchTracker,
};
