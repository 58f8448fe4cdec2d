//! Item click demo
//!
//! Replays a scripted series of touches against an `ItemList` and prints the
//! item clicks the adapter reports.
//!
//! Run with: cargo run -p item-touch --example list_clicks
//! For gesture traces: RUST_LOG=item_touch=trace cargo run -p item-touch --example list_clicks

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use item_touch::prelude::*;

/// One scripted raw touch.
struct Step {
    at_ms: u64,
    id: u64,
    phase: TouchPhase,
    x: f32,
    y: f32,
}

const fn step(at_ms: u64, id: u64, phase: TouchPhase, x: f32, y: f32) -> Step {
    Step {
        at_ms,
        id,
        phase,
        x,
        y,
    }
}

const SCRIPT: &[Step] = &[
    // Quick tap on "Drafts".
    step(0, 1, TouchPhase::Started, 120.0, 70.0),
    step(60, 1, TouchPhase::Ended, 120.0, 70.0),
    // Long press on "Inbox".
    step(1000, 2, TouchPhase::Started, 120.0, 20.0),
    step(1700, 2, TouchPhase::Ended, 120.0, 20.0),
    // Tap on the empty space below the rows.
    step(2500, 3, TouchPhase::Started, 120.0, 400.0),
    step(2560, 3, TouchPhase::Ended, 120.0, 400.0),
    // Drag starting on "Spam": leaves the tap region, no click.
    step(3000, 4, TouchPhase::Started, 120.0, 200.0),
    step(3150, 4, TouchPhase::Moved, 120.0, 170.0),
    step(3200, 4, TouchPhase::Moved, 120.0, 150.0),
    step(3250, 4, TouchPhase::Ended, 120.0, 150.0),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let list = ItemList::new(Rect::new(0.0, 0.0, 320.0, 480.0), 48.0, GestureConfig::scaled(1.0));
    for name in ["Inbox", "Drafts", "Sent", "Archive", "Spam", "Trash"] {
        list.push_item(name);
    }

    let listener = Rc::new(ItemClickCallbacks::<ItemList>::new(
        |_, view, position| println!("click       #{position} {}", view.label()),
        |_, view, position| println!("long click  #{position} {}", view.label()),
    ));
    let adapter = ItemTouchListenerAdapter::new(&list, listener);
    list.add_on_item_touch_listener(Rc::new(RefCell::new(adapter)));

    let mut tracker = TouchTracker::new();
    let frame = Duration::from_millis(16);
    let mut now = Duration::ZERO;

    for step in SCRIPT {
        let at = Duration::from_millis(step.at_ms);
        // Frames between touches keep time-based gestures running.
        while now + frame < at {
            now += frame;
            list.dispatch_timeouts(now);
        }
        now = at;

        if let Some(event) = tracker.handle(step.id, step.phase, Point::new(step.x, step.y), at) {
            list.dispatch_touch_event(&event);
        }
    }
}
