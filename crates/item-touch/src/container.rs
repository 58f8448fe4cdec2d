//! Capability traits shared by item containers, touch listeners and click
//! listeners.
//!
//! A container is any scrollable view that lays out child item views. The
//! [`ItemTouchListenerAdapter`] only needs three things from it: a hit test,
//! a position lookup and the gesture thresholds for its display.
//!
//! [`ItemTouchListenerAdapter`]: crate::ItemTouchListenerAdapter

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use item_touch_core::{GestureConfig, MotionEvent};

/// A view that can show transient pressed feedback.
pub trait PressableView {
    /// Sets or clears the pressed visual state.
    fn set_pressed(&self, pressed: bool);

    /// Returns the current pressed visual state.
    fn is_pressed(&self) -> bool;
}

impl<T: PressableView + ?Sized> PressableView for Rc<T> {
    fn set_pressed(&self, pressed: bool) {
        (**self).set_pressed(pressed);
    }

    fn is_pressed(&self) -> bool {
        (**self).is_pressed()
    }
}

/// A scrollable view hosting item views.
pub trait ItemContainer {
    /// Handle to a child item view. Cloning must be cheap and yield a handle
    /// to the same view.
    type Child: PressableView + Clone;

    /// Returns the child whose bounds contain the point, if any.
    ///
    /// Points in padding or in the empty space after the last child resolve
    /// to `None`.
    fn find_child_view_under(&self, x: f32, y: f32) -> Option<Self::Child>;

    /// Returns the index of `child` among the currently laid-out children.
    ///
    /// `None` if the view is no longer a child of this container.
    fn child_position(&self, child: &Self::Child) -> Option<usize>;

    /// Gesture thresholds for the display this container is shown on.
    fn gesture_config(&self) -> GestureConfig {
        GestureConfig::default()
    }
}

/// Observer of the touch events a container receives.
///
/// A container asks its touch listeners whether they want to take over a
/// touch sequence before handling it itself. A listener that returns `true`
/// from [`on_intercept_touch_event`] receives the rest of the sequence
/// through [`on_touch_event`].
///
/// [`on_intercept_touch_event`]: OnItemTouchListener::on_intercept_touch_event
/// [`on_touch_event`]: OnItemTouchListener::on_touch_event
pub trait OnItemTouchListener<C> {
    /// Observes an event before the container handles it.
    ///
    /// Returning `true` captures the remainder of the sequence.
    fn on_intercept_touch_event(&mut self, container: &C, event: &MotionEvent) -> bool;

    /// Receives events of a sequence this listener captured.
    fn on_touch_event(&mut self, container: &C, event: &MotionEvent);

    /// A child asked the container to stop intercepting for the current
    /// sequence.
    fn on_request_disallow_intercept_touch_event(&mut self, disallow: bool);

    /// Time advanced to `now` without a touch event.
    ///
    /// Containers call this between events so that time-based gestures
    /// fire while a finger rests without moving.
    fn on_timeout(&mut self, _container: &C, _now: Duration) {}
}

/// Receives item clicks resolved from touch gestures.
pub trait OnItemClickListener<C: ItemContainer> {
    /// An item was tapped.
    fn on_item_click(&self, container: &C, view: &C::Child, position: usize);

    /// An item was pressed and held.
    fn on_item_long_click(&self, container: &C, view: &C::Child, position: usize);
}

type ItemCallback<C> = Box<dyn Fn(&C, &<C as ItemContainer>::Child, usize)>;

/// An [`OnItemClickListener`] built from closures.
///
/// ```ignore
/// let listener = ItemClickCallbacks::new(
///     |_, _, position| println!("clicked {position}"),
///     |_, _, position| println!("long clicked {position}"),
/// );
/// ```
pub struct ItemClickCallbacks<C: ItemContainer> {
    on_click: ItemCallback<C>,
    on_long_click: ItemCallback<C>,
}

impl<C: ItemContainer> ItemClickCallbacks<C> {
    /// Creates a listener from a click and a long-click closure.
    pub fn new<F, G>(on_click: F, on_long_click: G) -> Self
    where
        F: Fn(&C, &C::Child, usize) + 'static,
        G: Fn(&C, &C::Child, usize) + 'static,
    {
        Self {
            on_click: Box::new(on_click),
            on_long_click: Box::new(on_long_click),
        }
    }

    /// Creates a listener that only reacts to clicks.
    pub fn clicks<F>(on_click: F) -> Self
    where
        F: Fn(&C, &C::Child, usize) + 'static,
    {
        Self::new(on_click, |_, _, _| {})
    }
}

impl<C: ItemContainer> OnItemClickListener<C> for ItemClickCallbacks<C> {
    fn on_item_click(&self, container: &C, view: &C::Child, position: usize) {
        (self.on_click)(container, view, position);
    }

    fn on_item_long_click(&self, container: &C, view: &C::Child, position: usize) {
        (self.on_long_click)(container, view, position);
    }
}

impl<C: ItemContainer> fmt::Debug for ItemClickCallbacks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemClickCallbacks").finish_non_exhaustive()
    }
}
