//! View wrapper
//!
//! A view is bound to one root node carrying an `id`. It hooks the hosting
//! document's `DOMContentLoaded` once, accepts subviews under its root and
//! can be destroyed, after which every operation reports `Error::Destroyed`.

use crate::element::{live_child, AsNode, Element};
use crate::emitter::{CustomEvent, EventEmitter, Listener, ListenerOptions};
use crate::{Context, Error, Result};
use panekit_dom::{Document, DomEvent, EventListener, EventType, NodeRef};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Emitted after a child is appended to the root; detail is the child
pub const SUBVIEW_ADDED: &str = "subviewadded";

/// Emitted by `View::destroy` after the teardown callback
pub const DESTROY: &str = "destroy";

/// Where a view's root comes from
#[derive(Debug, Clone)]
pub enum Root<'a> {
    /// Resolved with `Document::query_selector`
    Selector(&'a str),
    Node(NodeRef),
}

impl<'a> From<&'a str> for Root<'a> {
    fn from(selector: &'a str) -> Self {
        Root::Selector(selector)
    }
}

impl From<NodeRef> for Root<'_> {
    fn from(node: NodeRef) -> Self {
        Root::Node(node)
    }
}

impl From<&NodeRef> for Root<'_> {
    fn from(node: &NodeRef) -> Self {
        Root::Node(node.clone())
    }
}

impl From<&Element> for Root<'_> {
    fn from(element: &Element) -> Self {
        Root::Node(element.node().clone())
    }
}

/// Hooks a view runs during its life
pub trait Lifecycle {
    /// Runs once when the hosting document fires `DOMContentLoaded`.
    /// Never runs if the view is bound after loading finished.
    fn content_loaded(&self, view: &View, document: &Document) {
        let _ = (view, document);
    }
}

impl Lifecycle for () {}

/// Closure adapter for `Lifecycle::content_loaded`
pub struct ContentLoaded<F>(pub F);

impl<F: Fn(&View, &Document)> Lifecycle for ContentLoaded<F> {
    fn content_loaded(&self, view: &View, document: &Document) {
        (self.0)(view, document)
    }
}

struct Bound {
    root: NodeRef,
    id: String,
    document: Document,
}

type OnDestroy = Box<dyn FnOnce(&View)>;

pub struct View {
    bound: RefCell<Option<Bound>>,
    lifecycle: Box<dyn Lifecycle>,
    on_destroy: RefCell<Option<OnDestroy>>,
    events: EventEmitter<View>,
}

impl View {
    /// Bind to `root` in the context's document
    pub fn new<'a>(ctx: &Context, root: impl Into<Root<'a>>) -> Result<Rc<Self>> {
        Self::with_options(ctx, Some(root.into()), None, ())
    }

    /// Bind to `root` resolved against `document`
    pub fn with_document<'a>(
        ctx: &Context,
        root: impl Into<Root<'a>>,
        document: &Document,
    ) -> Result<Rc<Self>> {
        Self::with_options(ctx, Some(root.into()), Some(document.clone()), ())
    }

    pub fn with_lifecycle<'a>(
        ctx: &Context,
        root: impl Into<Root<'a>>,
        lifecycle: impl Lifecycle + 'static,
    ) -> Result<Rc<Self>> {
        Self::with_options(ctx, Some(root.into()), None, lifecycle)
    }

    /// General constructor. Fails with `MissingRoot` if `root` is `None` or
    /// the selector matches nothing, and with `MissingIdentifier` if the root
    /// has no non-empty `id`.
    pub fn with_options(
        ctx: &Context,
        root: Option<Root<'_>>,
        document: Option<Document>,
        lifecycle: impl Lifecycle + 'static,
    ) -> Result<Rc<Self>> {
        let document = document.unwrap_or_else(|| ctx.document().clone());
        let root = match root.ok_or(Error::MissingRoot)? {
            Root::Selector(selector) => document
                .query_selector(selector)
                .ok_or(Error::MissingRoot)?,
            Root::Node(node) => node,
        };
        let id = root
            .get_attribute("id")
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingIdentifier)?;
        tracing::debug!("View {} bound to {:?}", id, root);

        let lifecycle: Box<dyn Lifecycle> = Box::new(lifecycle);
        let view = Rc::new_cyclic(|weak: &Weak<View>| {
            let weak = weak.clone();
            let on_loaded: EventListener = Rc::new(move |_: &DomEvent| {
                if let Some(view) = weak.upgrade() {
                    view.content_loaded();
                }
            });
            document.add_event_listener(EventType::DomContentLoaded, on_loaded, true);

            View {
                bound: RefCell::new(Some(Bound {
                    root,
                    id,
                    document: document.clone(),
                })),
                lifecycle,
                on_destroy: RefCell::new(None),
                events: EventEmitter::new(),
            }
        });
        Ok(view)
    }

    fn content_loaded(&self) {
        let Some(document) = self.document() else {
            return;
        };
        tracing::debug!("View {:?} content loaded", self.id());
        self.lifecycle.content_loaded(self, &document);
    }

    pub fn id(&self) -> Option<String> {
        self.bound.borrow().as_ref().map(|b| b.id.clone())
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.bound.borrow().as_ref().map(|b| b.root.clone())
    }

    pub fn document(&self) -> Option<Document> {
        self.bound.borrow().as_ref().map(|b| b.document.clone())
    }

    pub fn is_destroyed(&self) -> bool {
        self.bound.borrow().is_none()
    }

    fn live_root(&self) -> Result<NodeRef> {
        self.root().ok_or(Error::Destroyed)
    }

    /// Append `child` to the root and emit `subviewadded`
    pub fn add_subview(&self, child: &impl AsNode) -> Result<&Self> {
        let root = self.live_root()?;
        let node = live_child(&root, child)?.clone();
        root.append_child(&node)?;
        self.dispatch_event(&CustomEvent::with_detail(SUBVIEW_ADDED, node));
        Ok(self)
    }

    /// Teardown callback run by `destroy`, replacing any previous one
    pub fn set_on_destroy(&self, callback: impl FnOnce(&View) + 'static) -> &Self {
        *self.on_destroy.borrow_mut() = Some(Box::new(callback));
        self
    }

    /// Detach the root, run the teardown callback, emit `destroy`, then drop
    /// the root, identifier and document references
    pub fn destroy(&self) -> Result<()> {
        let root = self.live_root()?;
        root.remove();

        let on_destroy = self.on_destroy.borrow_mut().take();
        if let Some(callback) = on_destroy {
            callback(self);
        }
        self.dispatch_event(&CustomEvent::new(DESTROY));

        if let Some(bound) = self.bound.borrow_mut().take() {
            tracing::debug!("View {} destroyed", bound.id);
        }
        Ok(())
    }

    pub fn show(&self) -> Result<&Self> {
        self.live_root()?.set_hidden(false);
        Ok(self)
    }

    pub fn hide(&self) -> Result<&Self> {
        self.live_root()?.set_hidden(true);
        Ok(self)
    }

    /// False once destroyed
    pub fn is_visible(&self) -> bool {
        self.root().is_some_and(|root| !root.hidden())
    }

    // Emitter

    pub fn add_event_listener(
        &self,
        event_name: &str,
        callback: Listener<View>,
        options: ListenerOptions,
    ) -> &Self {
        self.events.add_event_listener(event_name, callback, options);
        self
    }

    pub fn remove_event_listener(&self, event_name: &str, callback: &Listener<View>) -> &Self {
        self.events.remove_event_listener(event_name, callback);
        self
    }

    pub fn dispatch_event(&self, event: &CustomEvent) -> &Self {
        self.events.dispatch_event(self, event);
        self
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.events.listener_count(event_name)
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.events.has_listeners(event_name)
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id())
            .field("root", &self.root())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fixture() -> Context {
        let doc = Document::parse(
            r#"<html><body><section id="main"></section><div class="anon"></div></body></html>"#,
            "about:blank",
        )
        .unwrap();
        Context::new(doc)
    }

    #[test]
    fn test_resolve_selector() {
        let ctx = fixture();
        let view = View::new(&ctx, "#main").unwrap();
        assert_eq!(view.id().as_deref(), Some("main"));
        assert_eq!(view.root().unwrap().tag_name().as_deref(), Some("section"));
    }

    #[test]
    fn test_missing_root() {
        let ctx = fixture();
        assert_eq!(View::new(&ctx, "#nowhere").err(), Some(Error::MissingRoot));
        assert_eq!(
            View::with_options(&ctx, None, None, ()).err(),
            Some(Error::MissingRoot)
        );
    }

    #[test]
    fn test_missing_identifier() {
        let ctx = fixture();
        assert_eq!(View::new(&ctx, ".anon").err(), Some(Error::MissingIdentifier));

        let blank = ctx.document().create_element("div");
        blank.set_attribute("id", "");
        assert_eq!(View::new(&ctx, &blank).err(), Some(Error::MissingIdentifier));
    }

    #[test]
    fn test_content_loaded_fires_once() {
        let ctx = fixture();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _view = View::with_lifecycle(
            &ctx,
            "#main",
            ContentLoaded(move |view: &View, _: &Document| {
                assert_eq!(view.id().as_deref(), Some("main"));
                counter.set(counter.get() + 1);
            }),
        )
        .unwrap();

        ctx.document().finish_loading();
        ctx.document().finish_loading();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_destroyed_view_rejects_operations() {
        let ctx = fixture();
        let view = View::new(&ctx, "#main").unwrap();
        view.destroy().unwrap();

        assert!(view.is_destroyed());
        assert!(view.id().is_none());
        assert!(!view.is_visible());
        assert_eq!(view.destroy(), Err(Error::Destroyed));
        assert_eq!(view.show().err(), Some(Error::Destroyed));
        let child = ctx.document().create_element("p");
        assert_eq!(view.add_subview(&child).err(), Some(Error::Destroyed));
    }
}
