//! Touch-to-click adapter for item containers.
//!
//! Item containers lay out child views but do not report which item was
//! clicked. [`ItemTouchListenerAdapter`] observes the touch events a container
//! receives, runs them through a [`GestureDetector`], and turns recognized
//! taps and long-presses on a child into [`OnItemClickListener`] callbacks.
//!
//! # Usage
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use item_touch::{ItemClickCallbacks, ItemTouchListenerAdapter};
//!
//! let listener = Rc::new(ItemClickCallbacks::clicks(|_list, _view, position| {
//!     println!("clicked item {position}");
//! }));
//! let adapter = ItemTouchListenerAdapter::new(&list, listener);
//! list.add_on_item_touch_listener(Rc::new(RefCell::new(adapter)));
//! ```
//!
//! # Gestures
//!
//! | Gesture | Effect on the child under the touch |
//! |---|---|
//! | show-press | pressed state set |
//! | single tap | pressed state cleared, then `on_item_click` |
//! | long press | `on_item_long_click`, then pressed state cleared |
//! | scroll, cancel, second finger | pressed state cleared |
//!
//! A touch that lands outside every child does nothing. The adapter never
//! intercepts: the container's own scrolling keeps working.

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use item_touch_core::logging::targets;
use item_touch_core::{GestureConfig, GestureDetector, GestureListener, MotionEvent};

use crate::container::{ItemContainer, OnItemClickListener, OnItemTouchListener, PressableView};
use crate::error::{AdapterError, AdapterResult};

/// Translates touch events on an item container into item click callbacks.
pub struct ItemTouchListenerAdapter<C: ItemContainer> {
    detector: GestureDetector,
    clicks: ClickGestureHandler<C>,
}

impl<C: ItemContainer> ItemTouchListenerAdapter<C> {
    /// Creates an adapter for `container` that reports clicks to `listener`.
    ///
    /// The adapter keeps only a weak reference to the container, so it can be
    /// registered with the container it observes without creating a cycle.
    pub fn new(container: &Rc<C>, listener: Rc<dyn OnItemClickListener<C>>) -> Self {
        let config = container.gesture_config();
        Self::with_config(container, listener, config)
    }

    /// Creates an adapter from optional collaborators.
    ///
    /// Fails with [`AdapterError::InvalidArgument`] if either is absent.
    pub fn try_new(
        container: Option<&Rc<C>>,
        listener: Option<Rc<dyn OnItemClickListener<C>>>,
    ) -> AdapterResult<Self> {
        let mut builder = Self::builder();
        if let Some(container) = container {
            builder = builder.container(container);
        }
        if let Some(listener) = listener {
            builder = builder.listener(listener);
        }
        builder.build()
    }

    /// Returns a builder for configuring an adapter.
    pub fn builder() -> ItemTouchListenerAdapterBuilder<C> {
        ItemTouchListenerAdapterBuilder::default()
    }

    fn with_config(
        container: &Rc<C>,
        listener: Rc<dyn OnItemClickListener<C>>,
        config: GestureConfig,
    ) -> Self {
        Self {
            detector: GestureDetector::new(config),
            clicks: ClickGestureHandler {
                container: Rc::downgrade(container),
                listener,
                pressed: None,
            },
        }
    }

    /// The gesture detector driving this adapter.
    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    /// Enables or disables long-click detection.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.detector.set_long_press_enabled(enabled);
    }

    /// The earliest time at which a pending gesture fires, if any.
    ///
    /// Hosts that do not poll every frame can use this to schedule their next
    /// timeout dispatch.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.detector.next_deadline()
    }
}

impl<C: ItemContainer> OnItemTouchListener<C> for ItemTouchListenerAdapter<C> {
    fn on_intercept_touch_event(&mut self, _container: &C, event: &MotionEvent) -> bool {
        self.detector.on_touch_event(event, &mut self.clicks);
        false
    }

    fn on_touch_event(&mut self, _container: &C, _event: &MotionEvent) {}

    fn on_request_disallow_intercept_touch_event(&mut self, _disallow: bool) {}

    fn on_timeout(&mut self, _container: &C, now: Duration) {
        self.detector.check_timeouts(now, &mut self.clicks);
    }
}

impl<C: ItemContainer> fmt::Debug for ItemTouchListenerAdapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemTouchListenerAdapter")
            .field("detector", &self.detector)
            .field("container_alive", &(self.clicks.container.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

/// Builder for [`ItemTouchListenerAdapter`].
pub struct ItemTouchListenerAdapterBuilder<C: ItemContainer> {
    container: Option<Weak<C>>,
    listener: Option<Rc<dyn OnItemClickListener<C>>>,
    config: Option<GestureConfig>,
}

impl<C: ItemContainer> Default for ItemTouchListenerAdapterBuilder<C> {
    fn default() -> Self {
        Self {
            container: None,
            listener: None,
            config: None,
        }
    }
}

impl<C: ItemContainer> ItemTouchListenerAdapterBuilder<C> {
    /// Sets the container whose children are hit tested.
    pub fn container(mut self, container: &Rc<C>) -> Self {
        self.container = Some(Rc::downgrade(container));
        self
    }

    /// Sets the listener receiving item clicks.
    pub fn listener(mut self, listener: Rc<dyn OnItemClickListener<C>>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Overrides the gesture thresholds reported by the container.
    pub fn gesture_config(mut self, config: GestureConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the adapter.
    ///
    /// Fails with [`AdapterError::InvalidArgument`] if the container or the
    /// listener was not set, or if the container has already been dropped.
    pub fn build(self) -> AdapterResult<ItemTouchListenerAdapter<C>> {
        let container = self
            .container
            .and_then(|weak| weak.upgrade())
            .ok_or(AdapterError::InvalidArgument("container"))?;
        let listener = self
            .listener
            .ok_or(AdapterError::InvalidArgument("listener"))?;
        let config = self
            .config
            .unwrap_or_else(|| container.gesture_config());

        Ok(ItemTouchListenerAdapter::with_config(
            &container, listener, config,
        ))
    }
}

impl<C: ItemContainer> fmt::Debug for ItemTouchListenerAdapterBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemTouchListenerAdapterBuilder")
            .field("has_container", &self.container.is_some())
            .field("has_listener", &self.listener.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Resolves gestures to child views and forwards them as item clicks.
struct ClickGestureHandler<C: ItemContainer> {
    container: Weak<C>,
    listener: Rc<dyn OnItemClickListener<C>>,
    /// Child that received show-press and has not been released yet.
    pressed: Option<C::Child>,
}

impl<C: ItemContainer> ClickGestureHandler<C> {
    /// Resolves the child under the event, if the container is still alive.
    fn child_under(&self, event: &MotionEvent) -> Option<(Rc<C>, C::Child)> {
        let Some(container) = self.container.upgrade() else {
            tracing::debug!(target: targets::ADAPTER, "container dropped, gesture ignored");
            return None;
        };
        let child = container.find_child_view_under(event.x(), event.y())?;
        Some((container, child))
    }

    /// Clears the pressed state of the show-pressed child, if any.
    fn release_pressed(&mut self) {
        if let Some(child) = self.pressed.take() {
            child.set_pressed(false);
        }
    }
}

impl<C: ItemContainer> GestureListener for ClickGestureHandler<C> {
    fn on_show_press(&mut self, event: &MotionEvent) {
        if let Some((_, child)) = self.child_under(event) {
            child.set_pressed(true);
            self.pressed = Some(child);
        }
    }

    fn on_single_tap_up(&mut self, event: &MotionEvent) -> bool {
        // The finger may have drifted off the show-pressed child within the slop.
        self.release_pressed();
        let Some((container, child)) = self.child_under(event) else {
            tracing::debug!(
                target: targets::ADAPTER,
                x = event.x(),
                y = event.y(),
                "tap outside any item"
            );
            return false;
        };

        child.set_pressed(false);
        let Some(position) = container.child_position(&child) else {
            tracing::debug!(target: targets::ADAPTER, "tapped view has no position");
            return false;
        };

        tracing::debug!(target: targets::ADAPTER, position, "item click");
        self.listener.on_item_click(&container, &child, position);
        true
    }

    fn on_long_press(&mut self, event: &MotionEvent) {
        let Some((container, child)) = self.child_under(event) else {
            tracing::debug!(
                target: targets::ADAPTER,
                x = event.x(),
                y = event.y(),
                "long press outside any item"
            );
            self.release_pressed();
            return;
        };

        match container.child_position(&child) {
            Some(position) => {
                tracing::debug!(target: targets::ADAPTER, position, "item long click");
                self.listener.on_item_long_click(&container, &child, position);
            }
            None => {
                tracing::debug!(target: targets::ADAPTER, "long-pressed view has no position");
            }
        }
        child.set_pressed(false);
        self.release_pressed();
    }

    fn on_gesture_aborted(&mut self, _event: &MotionEvent) {
        self.release_pressed();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use item_touch_core::{MotionAction, Point};

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[derive(Debug, Default)]
    struct RowView {
        pressed: Cell<bool>,
    }

    impl PressableView for RowView {
        fn set_pressed(&self, pressed: bool) {
            self.pressed.set(pressed);
        }

        fn is_pressed(&self) -> bool {
            self.pressed.get()
        }
    }

    /// A column of 40px rows starting at y = 0.
    struct Column {
        rows: Vec<Rc<RowView>>,
        orphan: Rc<RowView>,
        config: GestureConfig,
    }

    impl Column {
        fn new(rows: usize) -> Rc<Self> {
            Rc::new(Self {
                rows: (0..rows).map(|_| Rc::new(RowView::default())).collect(),
                orphan: Rc::new(RowView::default()),
                config: GestureConfig::default(),
            })
        }
    }

    impl ItemContainer for Column {
        type Child = Rc<RowView>;

        fn find_child_view_under(&self, x: f32, y: f32) -> Option<Self::Child> {
            if !(0.0..100.0).contains(&x) || y < 0.0 {
                return None;
            }
            if y >= 1000.0 {
                // Stand-in for a view that is animating out of the list.
                return Some(Rc::clone(&self.orphan));
            }
            self.rows.get((y / 40.0) as usize).cloned()
        }

        fn child_position(&self, child: &Self::Child) -> Option<usize> {
            self.rows.iter().position(|row| Rc::ptr_eq(row, child))
        }

        fn gesture_config(&self) -> GestureConfig {
            self.config.clone()
        }
    }

    #[derive(Default)]
    struct Clicks {
        calls: RefCell<Vec<(&'static str, usize, bool)>>,
    }

    impl OnItemClickListener<Column> for Clicks {
        fn on_item_click(&self, _container: &Column, view: &Rc<RowView>, position: usize) {
            self.calls
                .borrow_mut()
                .push(("click", position, view.is_pressed()));
        }

        fn on_item_long_click(&self, _container: &Column, view: &Rc<RowView>, position: usize) {
            self.calls
                .borrow_mut()
                .push(("long", position, view.is_pressed()));
        }
    }

    fn setup(rows: usize) -> (Rc<Column>, Rc<Clicks>, ItemTouchListenerAdapter<Column>) {
        let column = Column::new(rows);
        let clicks = Rc::new(Clicks::default());
        let adapter = ItemTouchListenerAdapter::new(&column, clicks.clone());
        (column, clicks, adapter)
    }

    #[test]
    fn test_try_new_requires_both_arguments() {
        let column = Column::new(1);
        let clicks: Rc<dyn OnItemClickListener<Column>> = Rc::new(Clicks::default());

        let err = ItemTouchListenerAdapter::<Column>::try_new(None, Some(clicks.clone()))
            .unwrap_err();
        assert_eq!(err, AdapterError::InvalidArgument("container"));

        let err = ItemTouchListenerAdapter::try_new(Some(&column), None).unwrap_err();
        assert_eq!(err, AdapterError::InvalidArgument("listener"));

        let err = ItemTouchListenerAdapter::<Column>::try_new(None, None).unwrap_err();
        assert!(err.is_invalid_argument());

        assert!(ItemTouchListenerAdapter::try_new(Some(&column), Some(clicks)).is_ok());
    }

    #[test]
    fn test_builder_rejects_dropped_container() {
        let column = Column::new(1);
        let builder = ItemTouchListenerAdapter::builder()
            .container(&column)
            .listener(Rc::new(Clicks::default()));
        drop(column);

        assert_eq!(
            builder.build().unwrap_err(),
            AdapterError::InvalidArgument("container")
        );
    }

    #[test]
    fn test_builder_config_override() {
        let column = Column::new(1);
        let config = GestureConfig::default().with_touch_slop(30.0);
        let adapter = ItemTouchListenerAdapter::builder()
            .container(&column)
            .listener(Rc::new(Clicks::default()))
            .gesture_config(config.clone())
            .build()
            .unwrap();

        assert_eq!(adapter.detector().config(), &config);
    }

    #[test]
    fn test_uses_container_gesture_config() {
        let column = Rc::new(Column {
            rows: Vec::new(),
            orphan: Rc::new(RowView::default()),
            config: GestureConfig::scaled(2.0),
        });
        let adapter = ItemTouchListenerAdapter::new(&column, Rc::new(Clicks::default()));
        assert_eq!(adapter.detector().config().touch_slop, 16.0);
    }

    #[test]
    fn test_tap_clicks_item() {
        let (column, clicks, mut adapter) = setup(3);

        assert!(!adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 60.0, ms(0))));
        assert!(!adapter
            .on_intercept_touch_event(&column, &MotionEvent::up(50.0, 60.0, ms(60), ms(0))));

        assert_eq!(*clicks.calls.borrow(), vec![("click", 1, false)]);
    }

    #[test]
    fn test_show_press_sets_pressed_without_callback() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 10.0, ms(0)));
        adapter.on_timeout(&column, ms(100));

        assert!(column.rows[0].is_pressed());
        assert!(!column.rows[1].is_pressed());
        assert!(clicks.calls.borrow().is_empty());

        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 10.0, ms(200), ms(0)));
        assert!(!column.rows[0].is_pressed());
        assert_eq!(*clicks.calls.borrow(), vec![("click", 0, false)]);
    }

    #[test]
    fn test_long_press_clears_pressed_after_callback() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 10.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        adapter.on_timeout(&column, ms(500));

        // Still pressed while the listener runs.
        assert_eq!(*clicks.calls.borrow(), vec![("long", 0, true)]);
        assert!(!column.rows[0].is_pressed());

        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 10.0, ms(700), ms(0)));
        assert_eq!(clicks.calls.borrow().len(), 1);
    }

    #[test]
    fn test_tap_in_empty_space() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 150.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        let intercepted = adapter
            .on_intercept_touch_event(&column, &MotionEvent::up(50.0, 150.0, ms(150), ms(0)));

        assert!(!intercepted);
        assert!(clicks.calls.borrow().is_empty());
        assert!(column.rows.iter().all(|row| !row.is_pressed()));
    }

    #[test]
    fn test_tap_drifting_into_next_row_releases_first_row() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 37.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        assert!(column.rows[0].is_pressed());

        // Within the slop, but across the row boundary.
        adapter.on_intercept_touch_event(&column, &MotionEvent::moved(50.0, 43.0, ms(120), ms(0)));
        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 43.0, ms(150), ms(0)));

        assert_eq!(*clicks.calls.borrow(), vec![("click", 1, false)]);
        assert!(column.rows.iter().all(|row| !row.is_pressed()));
    }

    #[test]
    fn test_tap_drifting_into_empty_space_releases_last_row() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 117.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        assert!(column.rows[2].is_pressed());

        adapter.on_intercept_touch_event(&column, &MotionEvent::moved(50.0, 123.0, ms(120), ms(0)));
        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 123.0, ms(150), ms(0)));

        assert!(clicks.calls.borrow().is_empty());
        assert!(!column.rows[2].is_pressed());
    }

    #[test]
    fn test_long_press_after_drift_releases_every_row() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 37.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        adapter.on_intercept_touch_event(&column, &MotionEvent::moved(50.0, 43.0, ms(120), ms(0)));
        adapter.on_timeout(&column, ms(500));

        assert_eq!(clicks.calls.borrow().len(), 1);
        assert_eq!(clicks.calls.borrow()[0].0, "long");
        assert!(column.rows.iter().all(|row| !row.is_pressed()));
    }

    #[test]
    fn test_view_without_position_is_not_clicked() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 1010.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        assert!(column.orphan.is_pressed());
        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 1010.0, ms(150), ms(0)));

        assert!(clicks.calls.borrow().is_empty());
        assert!(!column.orphan.is_pressed());
    }

    #[test]
    fn test_scroll_releases_pressed_item() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 50.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        assert!(column.rows[1].is_pressed());

        adapter.on_intercept_touch_event(&column, &MotionEvent::moved(50.0, 90.0, ms(120), ms(0)));
        assert!(!column.rows[1].is_pressed());

        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 90.0, ms(140), ms(0)));
        assert!(clicks.calls.borrow().is_empty());
    }

    #[test]
    fn test_second_pointer_releases_pressed_item() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 50.0, ms(0)));
        adapter.on_timeout(&column, ms(100));
        let second = MotionEvent::new(
            MotionAction::PointerDown,
            Point::new(20.0, 10.0),
            1,
            2,
            ms(110),
            ms(0),
        );
        adapter.on_intercept_touch_event(&column, &second);

        assert!(!column.rows[1].is_pressed());
        adapter.on_timeout(&column, ms(900));
        assert!(clicks.calls.borrow().is_empty());
    }

    #[test]
    fn test_dropped_container_is_ignored() {
        let (column, clicks, mut adapter) = setup(3);
        let other = Column::new(3);

        adapter.on_intercept_touch_event(&other, &MotionEvent::down(50.0, 50.0, ms(0)));
        drop(column);
        adapter.on_intercept_touch_event(&other, &MotionEvent::up(50.0, 50.0, ms(30), ms(0)));

        assert!(clicks.calls.borrow().is_empty());
    }

    #[test]
    fn test_long_press_disabled() {
        let (column, clicks, mut adapter) = setup(3);
        adapter.set_long_press_enabled(false);

        adapter.on_intercept_touch_event(&column, &MotionEvent::down(50.0, 90.0, ms(0)));
        assert_eq!(adapter.next_deadline(), Some(ms(100)));
        adapter.on_timeout(&column, ms(1000));
        adapter.on_intercept_touch_event(&column, &MotionEvent::up(50.0, 90.0, ms(1100), ms(0)));

        assert_eq!(*clicks.calls.borrow(), vec![("click", 2, false)]);
    }

    #[test]
    fn test_touch_event_and_disallow_are_inert() {
        let (column, clicks, mut adapter) = setup(3);

        adapter.on_touch_event(&column, &MotionEvent::down(50.0, 10.0, ms(0)));
        adapter.on_request_disallow_intercept_touch_event(true);
        adapter.on_touch_event(&column, &MotionEvent::up(50.0, 10.0, ms(20), ms(0)));

        assert!(!adapter.detector().is_tracking());
        assert!(clicks.calls.borrow().is_empty());
    }
}
