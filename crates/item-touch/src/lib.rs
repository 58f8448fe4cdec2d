//! Item click and long-click callbacks for scrollable item lists.
//!
//! Scrollable item containers lay out child views but do not say which item
//! the user tapped. This crate bridges that gap:
//!
//! - [`ItemTouchListenerAdapter`] observes a container's touch events, detects
//!   taps and long-presses, and reports them per item through
//!   [`OnItemClickListener`].
//! - [`ItemContainer`], [`OnItemTouchListener`] and [`PressableView`] are the
//!   capabilities a container provides so the adapter can hit test children,
//!   look up their positions and show pressed feedback.
//! - [`ItemList`] is a ready-made vertically scrolling container.
//!
//! # Example
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use item_touch::prelude::*;
//!
//! let list = ItemList::new(Rect::new(0.0, 0.0, 320.0, 480.0), 48.0, GestureConfig::default());
//! for name in ["Inbox", "Drafts", "Sent"] {
//!     list.push_item(name);
//! }
//!
//! let listener = Rc::new(ItemClickCallbacks::<ItemList>::new(
//!     |_list, view, position| println!("open {} ({position})", view.label()),
//!     |_list, view, _position| println!("menu for {}", view.label()),
//! ));
//! let adapter = ItemTouchListenerAdapter::new(&list, listener);
//! list.add_on_item_touch_listener(Rc::new(RefCell::new(adapter)));
//!
//! let down = Duration::from_millis(0);
//! list.dispatch_touch_event(&MotionEvent::down(100.0, 60.0, down));
//! list.dispatch_touch_event(&MotionEvent::up(100.0, 60.0, Duration::from_millis(80), down));
//! ```

pub mod adapter;
pub mod container;
pub mod error;
pub mod list;
pub mod prelude;

pub use item_touch_core::*;

pub use adapter::{ItemTouchListenerAdapter, ItemTouchListenerAdapterBuilder};
pub use container::{
    ItemClickCallbacks, ItemContainer, OnItemClickListener, OnItemTouchListener, PressableView,
};
pub use error::{AdapterError, AdapterResult};
pub use list::{ItemList, ItemView, SharedTouchListener, TouchListenerId};

static_assertions::assert_not_impl_any!(ItemTouchListenerAdapter<ItemList>: Send, Sync);
