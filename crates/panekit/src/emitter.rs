//! Event emitter
//!
//! Per-instance listener lists keyed by event name. Wrappers own one emitter
//! each and pass themselves as the call context on dispatch.

use panekit_dom::NodeRef;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Listener callback: `(context, event)`. Identity is the `Rc` allocation.
pub type Listener<T> = Rc<dyn Fn(&T, &CustomEvent)>;

/// Registration options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the registration the first time it fires
    pub once: bool,
}

impl ListenerOptions {
    pub fn once() -> Self {
        Self { once: true }
    }
}

/// Event emitted by wrappers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    pub event_type: String,
    pub detail: Option<NodeRef>,
}

impl CustomEvent {
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(event_type: &str, detail: NodeRef) -> Self {
        Self {
            event_type: event_type.to_string(),
            detail: Some(detail),
        }
    }
}

struct Registration<T> {
    callback: Listener<T>,
    options: ListenerOptions,
}

/// Ordered listener lists, one per event name
pub struct EventEmitter<T> {
    listeners: RefCell<HashMap<String, Vec<Registration<T>>>>,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Append a registration. The same callback may be registered twice and
    /// will then fire twice.
    pub fn add_event_listener(&self, event_name: &str, callback: Listener<T>, options: ListenerOptions) {
        self.listeners
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push(Registration { callback, options });
    }

    /// Remove the first registration of `callback`; no-op if absent
    pub fn remove_event_listener(&self, event_name: &str, callback: &Listener<T>) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(event_name) else {
            return;
        };
        if let Some(pos) = list.iter().position(|r| Rc::ptr_eq(&r.callback, callback)) {
            list.remove(pos);
        }
    }

    /// Invoke listeners for `event.event_type` in registration order.
    ///
    /// `once` registrations are removed before any callback runs. The list
    /// is snapshotted first, so listeners added or removed during dispatch
    /// take effect from the next dispatch.
    pub fn dispatch_event(&self, context: &T, event: &CustomEvent) {
        let snapshot: Vec<Listener<T>> = {
            let mut listeners = self.listeners.borrow_mut();
            let Some(list) = listeners.get_mut(&event.event_type) else {
                return;
            };
            let snapshot = list.iter().map(|r| r.callback.clone()).collect();
            list.retain(|r| !r.options.once);
            snapshot
        };
        tracing::trace!("Emitting {} to {} listeners", event.event_type, snapshot.len());
        for callback in snapshot {
            callback(context, event);
        }
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners.borrow().get(event_name).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}
