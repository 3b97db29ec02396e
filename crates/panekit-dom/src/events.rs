//! Native DOM events
//!
//! Listener registration per (node, event type) and the event object handed
//! to listeners. Dispatch itself lives on `Document` because it must release
//! the registry borrow before calling out.

use crate::NodeId;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Native listener callback. Identity (for removal) is the `Rc` allocation.
pub type EventListener = Rc<dyn Fn(&DomEvent)>;

/// Event types the host knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseEnter,
    MouseLeave,
    TouchStart,
    TouchEnd,
    TouchMove,
    TouchCancel,
    DomContentLoaded,
    Load,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::DblClick => "dblclick",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseMove => "mousemove",
            EventType::MouseOver => "mouseover",
            EventType::MouseOut => "mouseout",
            EventType::MouseEnter => "mouseenter",
            EventType::MouseLeave => "mouseleave",
            EventType::TouchStart => "touchstart",
            EventType::TouchEnd => "touchend",
            EventType::TouchMove => "touchmove",
            EventType::TouchCancel => "touchcancel",
            EventType::DomContentLoaded => "DOMContentLoaded",
            EventType::Load => "load",
        }
    }

    /// Check if this event type can bubble
    pub fn bubbles(self) -> bool {
        !matches!(
            self,
            EventType::MouseEnter | EventType::MouseLeave | EventType::Load
        )
    }

    pub fn cancelable(self) -> bool {
        !matches!(
            self,
            EventType::DomContentLoaded | EventType::Load | EventType::TouchCancel
        )
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Event delivered to native listeners
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: String,
    /// Node the event was dispatched on
    pub target: NodeId,
    /// Clock time at dispatch
    pub timestamp: Duration,
    pub bubbles: bool,
    pub cancelable: bool,
    current_target: Cell<NodeId>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    /// Event of a known type, with that type's bubbling rules
    pub fn new(event_type: EventType) -> Self {
        Self::custom(event_type.as_str(), event_type.bubbles(), event_type.cancelable())
    }

    pub fn custom(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            timestamp: Duration::ZERO,
            bubbles,
            cancelable,
            current_target: Cell::new(NodeId::NONE),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub(crate) fn set_current_target(&self, node: NodeId) {
        self.current_target.set(node);
    }

    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

struct Registration {
    listener: EventListener,
    once: bool,
}

/// Native listeners keyed by node, then event type
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<NodeId, HashMap<String, Vec<Registration>>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, event_type: &str, listener: EventListener, once: bool) {
        self.listeners
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default()
            .push(Registration { listener, once });
    }

    /// Remove the first registration sharing `listener`'s allocation
    pub(crate) fn remove(&mut self, node: NodeId, event_type: &str, listener: &EventListener) -> bool {
        let Some(list) = self
            .listeners
            .get_mut(&node)
            .and_then(|by_type| by_type.get_mut(event_type))
        else {
            return false;
        };
        match list.iter().position(|r| Rc::ptr_eq(&r.listener, listener)) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Listeners to run for one dispatch step, dropping `once` entries
    pub(crate) fn take_snapshot(&mut self, node: NodeId, event_type: &str) -> Vec<EventListener> {
        let Some(list) = self
            .listeners
            .get_mut(&node)
            .and_then(|by_type| by_type.get_mut(event_type))
        else {
            return Vec::new();
        };
        let snapshot = list.iter().map(|r| r.listener.clone()).collect();
        list.retain(|r| !r.once);
        snapshot
    }

    pub(crate) fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(event_type))
            .map_or(0, Vec::len)
    }
}
