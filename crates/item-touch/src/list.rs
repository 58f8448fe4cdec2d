//! A vertically scrolling list of item views.
//!
//! [`ItemList`] is a minimal container that lays out fixed-height rows inside
//! a viewport, scrolls them by drag, and routes touch sequences through its
//! registered [`OnItemTouchListener`]s the way a scrollable list does:
//!
//! 1. On `Down` the capture and the disallow-intercept request are reset.
//! 2. If a listener captured the sequence, it receives every event through
//!    `on_touch_event`.
//! 3. Otherwise, unless interception was disallowed, each listener is asked
//!    through `on_intercept_touch_event` in registration order. The first one
//!    returning `true` captures the rest of the sequence.
//! 4. Events nobody captured drive the list's own drag scrolling.
//!
//! The list is shared through `Rc` and mutated through `&self`, so listener
//! callbacks may add items, scroll, unregister listeners or call back into
//! the dispatch methods while a touch event is being dispatched. A listener
//! that is already running is skipped by such nested calls.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use item_touch_core::logging::targets;
use item_touch_core::{GestureConfig, MotionAction, MotionEvent, Point, Rect};

use crate::container::{ItemContainer, OnItemTouchListener, PressableView};

/// A touch listener registered with an [`ItemList`].
pub type SharedTouchListener = Rc<RefCell<dyn OnItemTouchListener<ItemList>>>;

/// One row of an [`ItemList`].
#[derive(Debug)]
pub struct ItemView {
    label: String,
    /// Bounds in list coordinates, updated on every layout.
    bounds: Cell<Rect>,
    pressed: Cell<bool>,
}

impl ItemView {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bounds: Cell::new(Rect::ZERO),
            pressed: Cell::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current bounds in list coordinates, with scrolling applied.
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }
}

impl PressableView for ItemView {
    fn set_pressed(&self, pressed: bool) {
        self.pressed.set(pressed);
    }

    fn is_pressed(&self) -> bool {
        self.pressed.get()
    }
}

/// Identifies a registered touch listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchListenerId(u64);

/// Progress of the list's own drag scrolling.
#[derive(Debug, Clone, Copy)]
struct DragState {
    start_y: f32,
    last_y: f32,
    dragging: bool,
}

/// A vertically scrolling list of fixed-height rows.
pub struct ItemList {
    viewport: Rect,
    item_height: f32,
    config: GestureConfig,
    children: RefCell<Vec<Rc<ItemView>>>,
    scroll_offset: Cell<f32>,
    touch_listeners: RefCell<Vec<(TouchListenerId, SharedTouchListener)>>,
    next_listener_id: Cell<u64>,
    /// Listener that captured the current sequence.
    intercepting: RefCell<Option<SharedTouchListener>>,
    disallow_intercept: Cell<bool>,
    drag: Cell<Option<DragState>>,
}

impl ItemList {
    /// Creates an empty list showing rows of `item_height` inside `viewport`.
    pub fn new(viewport: Rect, item_height: f32, config: GestureConfig) -> Rc<Self> {
        Rc::new(Self {
            viewport,
            item_height: item_height.max(0.0),
            config,
            children: RefCell::new(Vec::new()),
            scroll_offset: Cell::new(0.0),
            touch_listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
            intercepting: RefCell::new(None),
            disallow_intercept: Cell::new(false),
            drag: Cell::new(None),
        })
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends a row and returns its view.
    pub fn push_item(&self, label: impl Into<String>) -> Rc<ItemView> {
        let view = Rc::new(ItemView::new(label));
        self.children.borrow_mut().push(Rc::clone(&view));
        self.layout();
        view
    }

    /// Inserts a row at `index`, shifting later rows down.
    ///
    /// Returns `None` if `index` is past the end of the list.
    pub fn insert_item(&self, index: usize, label: impl Into<String>) -> Option<Rc<ItemView>> {
        let view = {
            let mut children = self.children.borrow_mut();
            if index > children.len() {
                return None;
            }
            let view = Rc::new(ItemView::new(label));
            children.insert(index, Rc::clone(&view));
            view
        };
        self.layout();
        Some(view)
    }

    /// Removes the row at `index` and returns its view.
    pub fn remove_item(&self, index: usize) -> Option<Rc<ItemView>> {
        let removed = {
            let mut children = self.children.borrow_mut();
            (index < children.len()).then(|| children.remove(index))
        }?;
        removed.set_pressed(false);
        self.clamp_scroll();
        self.layout();
        Some(removed)
    }

    pub fn child_at(&self, index: usize) -> Option<Rc<ItemView>> {
        self.children.borrow().get(index).cloned()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Total height of all rows.
    pub fn content_height(&self) -> f32 {
        self.child_count() as f32 * self.item_height
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport.height()).max(0.0)
    }

    /// Scrolls the content by `dy` pixels (positive moves content up).
    ///
    /// The offset is clamped to the content. Returns the distance actually
    /// scrolled.
    pub fn scroll_by(&self, dy: f32) -> f32 {
        let old = self.scroll_offset.get();
        let new = (old + dy).clamp(0.0, self.max_scroll());
        if new != old {
            self.scroll_offset.set(new);
            self.layout();
            tracing::trace!(target: targets::LIST, offset = new, "scrolled");
        }
        new - old
    }

    fn clamp_scroll(&self) {
        let clamped = self.scroll_offset.get().min(self.max_scroll());
        self.scroll_offset.set(clamped);
    }

    fn layout(&self) {
        let top = self.viewport.top() - self.scroll_offset.get();
        for (row, child) in self.children.borrow().iter().enumerate() {
            child.bounds.set(Rect::new(
                self.viewport.left(),
                top + row as f32 * self.item_height,
                self.viewport.width(),
                self.item_height,
            ));
        }
    }

    // =========================================================================
    // Touch listeners
    // =========================================================================

    /// Registers a touch listener. Listeners are consulted in registration
    /// order.
    pub fn add_on_item_touch_listener(&self, listener: SharedTouchListener) -> TouchListenerId {
        let id = TouchListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.touch_listeners.borrow_mut().push((id, listener));
        tracing::debug!(target: targets::LIST, id = id.0, "touch listener added");
        id
    }

    /// Unregisters a touch listener. Returns false if it was not registered.
    pub fn remove_on_item_touch_listener(&self, id: TouchListenerId) -> bool {
        let removed = {
            let mut listeners = self.touch_listeners.borrow_mut();
            let index = listeners.iter().position(|(other, _)| *other == id);
            index.map(|index| listeners.remove(index).1)
        };
        let Some(removed) = removed else {
            return false;
        };

        let mut intercepting = self.intercepting.borrow_mut();
        if intercepting
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, &removed))
        {
            *intercepting = None;
        }
        tracing::debug!(target: targets::LIST, id = id.0, "touch listener removed");
        true
    }

    pub fn touch_listener_count(&self) -> usize {
        self.touch_listeners.borrow().len()
    }

    fn listeners_snapshot(&self) -> Vec<SharedTouchListener> {
        self.touch_listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    /// Dispatches a touch event to the touch listeners and the list itself.
    ///
    /// Returns true if a touch listener intercepted the event.
    pub fn dispatch_touch_event(&self, event: &MotionEvent) -> bool {
        let action = event.action();
        if action == MotionAction::Down {
            self.intercepting.replace(None);
            self.disallow_intercept.set(false);
        }

        let captured = self.intercepting.borrow().clone();
        let intercepted = if let Some(listener) = captured {
            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.on_touch_event(self, event),
                Err(_) => tracing::trace!(target: targets::LIST, ?action, "capturing listener busy"),
            }
            true
        } else if !self.disallow_intercept.get()
            && let Some(listener) = self.find_intercepting_listener(event)
        {
            tracing::trace!(target: targets::LIST, ?action, "sequence captured by listener");
            self.intercepting.replace(Some(listener));
            self.drag.set(None);
            true
        } else {
            self.handle_drag(event);
            false
        };

        if action.ends_sequence() {
            self.intercepting.replace(None);
            self.drag.set(None);
        }

        intercepted
    }

    fn find_intercepting_listener(&self, event: &MotionEvent) -> Option<SharedTouchListener> {
        self.listeners_snapshot()
            .into_iter()
            .find(|listener| {
                listener
                    .try_borrow_mut()
                    .is_ok_and(|mut listener| listener.on_intercept_touch_event(self, event))
            })
    }

    /// Stops (or resumes) asking touch listeners to intercept until the next
    /// `Down`, and tells every listener about the request.
    pub fn request_disallow_intercept_touch_event(&self, disallow: bool) {
        self.disallow_intercept.set(disallow);
        for listener in self.listeners_snapshot() {
            // Busy listeners are the ones that made the request.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener.on_request_disallow_intercept_touch_event(disallow);
            }
        }
    }

    /// Lets touch listeners run time-based gesture detection.
    ///
    /// Call this from the host's frame or timer callback with the same clock
    /// used for motion event timestamps.
    pub fn dispatch_timeouts(&self, now: Duration) {
        for listener in self.listeners_snapshot() {
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener.on_timeout(self, now);
            }
        }
    }

    fn handle_drag(&self, event: &MotionEvent) {
        let y = event.y();
        match event.action() {
            MotionAction::Down => {
                self.drag.set(Some(DragState {
                    start_y: y,
                    last_y: y,
                    dragging: false,
                }));
            }
            MotionAction::Move => {
                let Some(mut drag) = self.drag.get() else {
                    return;
                };
                if !drag.dragging && (y - drag.start_y).abs() > self.config.touch_slop {
                    drag.dragging = true;
                    tracing::trace!(target: targets::LIST, "drag scrolling started");
                }
                if drag.dragging {
                    self.scroll_by(drag.last_y - y);
                }
                drag.last_y = y;
                self.drag.set(Some(drag));
            }
            MotionAction::Up | MotionAction::Cancel => self.drag.set(None),
            MotionAction::PointerDown | MotionAction::PointerUp => {}
        }
    }
}

impl ItemContainer for ItemList {
    type Child = Rc<ItemView>;

    fn find_child_view_under(&self, x: f32, y: f32) -> Option<Self::Child> {
        let point = Point::new(x, y);
        if !self.viewport.contains(point) {
            return None;
        }
        self.children
            .borrow()
            .iter()
            .rev()
            .find(|child| child.bounds().contains(point))
            .cloned()
    }

    fn child_position(&self, child: &Self::Child) -> Option<usize> {
        self.children
            .borrow()
            .iter()
            .position(|other| Rc::ptr_eq(other, child))
    }

    fn gesture_config(&self) -> GestureConfig {
        self.config.clone()
    }
}

impl fmt::Debug for ItemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("viewport", &self.viewport)
            .field("item_height", &self.item_height)
            .field("child_count", &self.child_count())
            .field("scroll_offset", &self.scroll_offset.get())
            .field("touch_listeners", &self.touch_listener_count())
            .finish_non_exhaustive()
    }
}
