//! Document - shared handle to a DOM tree and its event loop
//!
//! `Document` is a cheap `Rc` handle; clones refer to the same document.

use crate::clock::Clock;
use crate::events::ListenerRegistry;
use crate::{
    markup, DomError, DomEvent, DomResult, DomTree, EventListener, EventType, FrameId, NodeId,
    NodeRef, SimpleSelector, TimerId,
};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Loading progress of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

struct DocumentInner {
    url: String,
    tree: RefCell<DomTree>,
    listeners: RefCell<ListenerRegistry>,
    clock: RefCell<Clock>,
    ready_state: Cell<ReadyState>,
    html: Cell<NodeId>,
    head: Cell<NodeId>,
    body: Cell<NodeId>,
}

/// HTML Document handle
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

/// Non-owning document handle, for callbacks the document itself stores
#[derive(Clone)]
pub struct WeakDocument {
    inner: Weak<DocumentInner>,
}

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl Document {
    fn empty(url: &str) -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                url: url.to_string(),
                tree: RefCell::new(DomTree::new()),
                listeners: RefCell::default(),
                clock: RefCell::default(),
                ready_state: Cell::new(ReadyState::Loading),
                html: Cell::new(NodeId::NONE),
                head: Cell::new(NodeId::NONE),
                body: Cell::new(NodeId::NONE),
            }),
        }
    }

    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let document = Self::empty(url);
        {
            let mut tree = document.tree_mut();
            let html = tree.create_element("html");
            let head = tree.create_element("head");
            let body = tree.create_element("body");
            let root = tree.root();
            // Fresh nodes under the document node cannot violate hierarchy rules
            let _ = tree.append_child(root, html);
            let _ = tree.append_child(html, head);
            let _ = tree.append_child(html, body);
            document.inner.html.set(html);
            document.inner.head.set(head);
            document.inner.body.set(body);
        }
        tracing::debug!("Created document {}", url);
        document
    }

    /// Build a document from markup
    pub fn parse(html: &str, url: &str) -> DomResult<Self> {
        let document = Self::empty(url);
        markup::parse_document_into(&mut document.tree_mut(), html)?;
        document.locate_structure();
        Ok(document)
    }

    fn locate_structure(&self) {
        let (html, head, body) = {
            let tree = self.tree();
            let find = |tag: &str| {
                tree.descendants(tree.root()).into_iter().find(|&id| {
                    tree.get(id)
                        .and_then(|n| n.as_element())
                        .is_some_and(|e| e.tag == tag)
                })
            };
            (find("html"), find("head"), find("body"))
        };
        self.inner.html.set(html.unwrap_or(NodeId::NONE));
        self.inner.head.set(head.unwrap_or(NodeId::NONE));
        self.inner.body.set(body.unwrap_or(NodeId::NONE));
    }

    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub(crate) fn tree(&self) -> Ref<'_, DomTree> {
        self.inner.tree.borrow()
    }

    pub(crate) fn tree_mut(&self) -> RefMut<'_, DomTree> {
        self.inner.tree.borrow_mut()
    }

    /// Handle to a node of this document
    pub fn node(&self, id: NodeId) -> Option<NodeRef> {
        self.tree()
            .contains(id)
            .then(|| NodeRef::new(self.clone(), id))
    }

    /// The document node itself
    pub fn document_node(&self) -> NodeRef {
        NodeRef::new(self.clone(), NodeId::ROOT)
    }

    /// `<html>` element
    pub fn document_element(&self) -> Option<NodeRef> {
        self.node(self.inner.html.get())
    }

    /// `<head>` element
    pub fn head(&self) -> Option<NodeRef> {
        self.node(self.inner.head.get())
    }

    /// `<body>` element
    pub fn body(&self) -> Option<NodeRef> {
        self.node(self.inner.body.get())
    }

    pub fn create_element(&self, tag: &str) -> NodeRef {
        let id = self.tree_mut().create_element(tag);
        NodeRef::new(self.clone(), id)
    }

    pub fn create_text_node(&self, text: &str) -> NodeRef {
        let id = self.tree_mut().create_text(text);
        NodeRef::new(self.clone(), id)
    }

    /// First connected element with the given `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.query_selector(&format!("#{id}"))
    }

    /// First connected element, in document order, matching a simple selector
    pub fn query_selector(&self, selector: &str) -> Option<NodeRef> {
        let selector = SimpleSelector::parse(selector)?;
        let found = {
            let tree = self.tree();
            tree.descendants(tree.root()).into_iter().find(|&id| {
                tree.get(id)
                    .and_then(|n| n.as_element())
                    .is_some_and(|e| selector.matches(e))
            })
        };
        found.map(|id| NodeRef::new(self.clone(), id))
    }

    pub fn ready_state(&self) -> ReadyState {
        self.inner.ready_state.get()
    }

    /// Signal that parsing finished: fires `DOMContentLoaded` then `load`.
    /// Only the first call has any effect.
    pub fn finish_loading(&self) {
        if self.ready_state() != ReadyState::Loading {
            return;
        }
        tracing::debug!("Document {} loaded", self.url());
        self.inner.ready_state.set(ReadyState::Interactive);
        self.dispatch_event(NodeId::ROOT, DomEvent::new(EventType::DomContentLoaded));
        self.inner.ready_state.set(ReadyState::Complete);
        self.dispatch_event(NodeId::ROOT, DomEvent::new(EventType::Load));
    }

    /// Listen on the document node
    pub fn add_event_listener(&self, event_type: impl AsRef<str>, listener: EventListener, once: bool) {
        self.document_node().add_event_listener(event_type, listener, once);
    }

    pub fn remove_event_listener(&self, event_type: impl AsRef<str>, listener: &EventListener) {
        self.document_node().remove_event_listener(event_type, listener);
    }

    pub(crate) fn listen(&self, node: NodeId, event_type: &str, listener: EventListener, once: bool) {
        self.inner.listeners.borrow_mut().add(node, event_type, listener, once);
    }

    pub(crate) fn unlisten(&self, node: NodeId, event_type: &str, listener: &EventListener) -> bool {
        self.inner.listeners.borrow_mut().remove(node, event_type, listener)
    }

    pub(crate) fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.inner.listeners.borrow().count(node, event_type)
    }

    /// Deliver `event` to `target`, then up the ancestor chain if it bubbles.
    /// Returns false if a listener prevented the default action.
    pub(crate) fn dispatch_event(&self, target: NodeId, mut event: DomEvent) -> bool {
        event.target = target;
        event.timestamp = self.now();
        let path = if event.bubbles {
            self.tree().inclusive_ancestors(target)
        } else {
            vec![target]
        };
        tracing::trace!("Dispatching {} to {:?}", event.event_type, target);

        for node in path {
            event.set_current_target(node);
            let listeners = self
                .inner
                .listeners
                .borrow_mut()
                .take_snapshot(node, &event.event_type);
            for listener in listeners {
                listener(&event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        !event.is_default_prevented()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.inner.clock.borrow().now()
    }

    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let id = self.inner.clock.borrow_mut().set_timeout(delay, Box::new(callback));
        tracing::trace!("Scheduled timer {:?} in {:?}", id, delay);
        id
    }

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    pub fn clear_timeout(&self, id: TimerId) {
        if self.inner.clock.borrow_mut().clear_timeout(id) {
            tracing::trace!("Cleared timer {:?}", id);
        }
    }

    pub fn request_animation_frame(&self, callback: impl FnOnce(Duration) + 'static) -> FrameId {
        self.inner.clock.borrow_mut().request_frame(Box::new(callback))
    }

    pub fn cancel_animation_frame(&self, id: FrameId) {
        self.inner.clock.borrow_mut().cancel_frame(id);
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.clock.borrow().pending_timers()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.clock.borrow().pending_frames()
    }

    /// Move the clock forward, running due timers and animation frames in
    /// time order. Timers scheduled by callbacks run in the same call if
    /// they fall due before the new time.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next_frame = self.inner.clock.borrow().next_frame_time();
            let step = next_frame.min(target);
            self.run_timers_until(step);
            self.inner.clock.borrow_mut().set_now(step);

            if step == next_frame {
                let frames = self.inner.clock.borrow_mut().take_frames(step);
                for frame in frames {
                    frame(step);
                }
            }
            if step >= target {
                break;
            }
        }
    }

    fn run_timers_until(&self, deadline: Duration) {
        loop {
            let due = self.inner.clock.borrow_mut().pop_due(deadline);
            let Some((at, callback)) = due else {
                break;
            };
            self.inner.clock.borrow_mut().set_now(at);
            callback();
        }
    }

    /// Resolve a node handle against this document
    pub(crate) fn check_owner(&self, node: &NodeRef) -> DomResult<NodeId> {
        if node.document() != self {
            return Err(DomError::WrongDocument);
        }
        Ok(node.id())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Document {}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.inner.url)
            .field("ready_state", &self.ready_state())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("about:blank");
        assert!(doc.body().is_some());
        assert!(doc.head().is_some());
        assert_eq!(doc.ready_state(), ReadyState::Loading);
    }

    #[test]
    fn test_parse_locates_body() {
        let doc = Document::parse(
            "<html><body><div id=\"app\" class=\"shell\">x</div></body></html>",
            "about:test",
        )
        .unwrap();
        let app = doc.get_element_by_id("app").unwrap();
        assert_eq!(doc.query_selector(".shell"), Some(app.clone()));
        assert_eq!(app.parent(), doc.body());
        assert!(doc.query_selector("#missing").is_none());
    }

    #[test]
    fn test_finish_loading_fires_once() {
        let doc = Document::default();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        doc.add_event_listener(
            EventType::DomContentLoaded,
            Rc::new(move |_| counter.set(counter.get() + 1)),
            false,
        );
        doc.finish_loading();
        doc.finish_loading();
        assert_eq!(fired.get(), 1);
        assert_eq!(doc.ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_advance_runs_timers_in_order() {
        let doc = Document::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "b"), (10, "a"), (30, "c")] {
            let log = log.clone();
            doc.set_timeout(Duration::from_millis(delay), move || log.borrow_mut().push(tag));
        }
        doc.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["a"]);
        doc.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(doc.now(), Duration::from_millis(40));
    }

    #[test]
    fn test_nested_timer_uses_fire_time() {
        let doc = Document::default();
        let fired_at = Rc::new(Cell::new(Duration::ZERO));
        let inner_doc = doc.clone();
        let slot = fired_at.clone();
        doc.set_timeout(Duration::from_millis(10), move || {
            let at = inner_doc.clone();
            inner_doc.set_timeout(Duration::from_millis(5), move || slot.set(at.now()));
        });
        doc.advance(Duration::from_millis(100));
        assert_eq!(fired_at.get(), Duration::from_millis(15));
    }

    #[test]
    fn test_animation_frames_follow_interval() {
        let doc = Document::default();
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let record = stamps.clone();
        doc.request_animation_frame(move |at| record.borrow_mut().push(at));
        doc.advance(Duration::from_millis(10));
        assert!(stamps.borrow().is_empty());
        doc.advance(Duration::from_millis(10));
        assert_eq!(*stamps.borrow(), vec![FRAME]);
        assert_eq!(doc.pending_frames(), 0);
    }

    const FRAME: Duration = crate::FRAME_INTERVAL;
}
