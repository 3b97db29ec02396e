//! Long-press recognition
//!
//! A press arms a timer; releasing, leaving or cancelling before it fires
//! disarms it. One armed timer per bound handler at a time.

use panekit_dom::{DomEvent, EventListener, EventType, NodeRef, TimerId};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const PRESS_START: [EventType; 2] = [EventType::MouseDown, EventType::TouchStart];

const PRESS_END: [EventType; 4] = [
    EventType::MouseUp,
    EventType::MouseOut,
    EventType::TouchEnd,
    EventType::TouchCancel,
];

/// Call `handler` with the originating press event once a press on `node`
/// has been held for `delay`
pub(crate) fn bind_long_press(node: &NodeRef, delay: Duration, handler: EventListener) {
    let armed: Rc<Cell<Option<TimerId>>> = Rc::default();
    let document = node.document().downgrade();

    let start: EventListener = {
        let armed = armed.clone();
        let document = document.clone();
        Rc::new(move |event: &DomEvent| {
            let Some(document) = document.upgrade() else {
                return;
            };
            if let Some(previous) = armed.take() {
                document.clear_timeout(previous);
            }
            let handler = handler.clone();
            let slot = armed.clone();
            let press = event.clone();
            let timer = document.set_timeout(delay, move || {
                slot.set(None);
                tracing::trace!("Long press recognized on {:?}", press.target);
                handler(&press);
            });
            armed.set(Some(timer));
        })
    };

    let cancel: EventListener = Rc::new(move |_: &DomEvent| {
        let Some(timer) = armed.take() else {
            return;
        };
        if let Some(document) = document.upgrade() {
            document.clear_timeout(timer);
        }
    });

    for event_type in PRESS_START {
        node.add_event_listener(event_type, start.clone(), false);
    }
    for event_type in PRESS_END {
        node.add_event_listener(event_type, cancel.clone(), false);
    }
}
