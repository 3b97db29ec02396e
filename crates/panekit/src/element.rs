//! Element wrapper
//!
//! Chainable helpers over a single native node. Mutators return `&Self`
//! (or `Result<&Self>` where the host can refuse the operation).

use crate::emitter::{CustomEvent, EventEmitter, Listener, ListenerOptions};
use crate::{press, Context, Error, Result};
use panekit_dom::{DomEvent, EventListener, EventType, InsertPosition, NodeRef};
use std::rc::Rc;
use std::time::Duration;

/// Anything that resolves to a native node: a raw `NodeRef` or a wrapper
pub trait AsNode {
    fn as_node(&self) -> &NodeRef;
}

impl AsNode for NodeRef {
    fn as_node(&self) -> &NodeRef {
        self
    }
}

impl AsNode for Element {
    fn as_node(&self) -> &NodeRef {
        &self.node
    }
}

/// Resolve `child` for insertion under `parent`. A node from another
/// document counts as absent.
pub(crate) fn live_child<'a>(parent: &NodeRef, child: &'a impl AsNode) -> Result<&'a NodeRef> {
    let node = child.as_node();
    if node.document() != parent.document() {
        return Err(Error::MissingChild);
    }
    Ok(node)
}

pub struct Element {
    ctx: Context,
    node: NodeRef,
    /// `id` attribute as it was when wrapped
    id: Option<String>,
    events: EventEmitter<Element>,
}

impl Element {
    /// Create a new detached element
    pub fn create(ctx: &Context, tag: &str) -> Self {
        Self::wrap(ctx, ctx.document().create_element(tag))
    }

    /// Wrap an existing node
    pub fn wrap(ctx: &Context, node: NodeRef) -> Self {
        let id = node.get_attribute("id");
        Self {
            ctx: ctx.clone(),
            node,
            id,
            events: EventEmitter::new(),
        }
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Identifier captured at construction; later `id` changes are not seen
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    // Content

    /// Replace all content with plain text
    pub fn set_text(&self, text: &str) -> &Self {
        self.node.set_text_content(text);
        self
    }

    pub fn append_text(&self, text: &str) -> Result<&Self> {
        self.insert_text(text, InsertPosition::BeforeEnd)
    }

    pub fn insert_text(&self, text: &str, position: InsertPosition) -> Result<&Self> {
        self.node.insert_adjacent_text(position, text)?;
        Ok(self)
    }

    /// Replace all content with parsed markup
    pub fn set_html(&self, html: &str) -> Result<&Self> {
        self.node.set_inner_html(html)?;
        Ok(self)
    }

    pub fn append_html(&self, html: &str) -> Result<&Self> {
        self.insert_html(html, InsertPosition::BeforeEnd)
    }

    pub fn insert_html(&self, html: &str, position: InsertPosition) -> Result<&Self> {
        self.node.insert_adjacent_html(position, html)?;
        Ok(self)
    }

    pub fn text(&self) -> String {
        self.node.text_content()
    }

    pub fn html(&self) -> String {
        self.node.inner_html()
    }

    // Composition

    pub fn append_child(&self, child: &impl AsNode) -> Result<&Self> {
        self.node.append_child(live_child(&self.node, child)?)?;
        Ok(self)
    }

    pub fn insert_child(&self, child: &impl AsNode, position: InsertPosition) -> Result<&Self> {
        self.node
            .insert_adjacent_element(position, live_child(&self.node, child)?)?;
        Ok(self)
    }

    /// Detach from the parent
    pub fn remove(&self) -> &Self {
        self.node.remove();
        self
    }

    // Attributes

    pub fn set_attribute(&self, name: &str, value: &str) -> &Self {
        self.node.set_attribute(name, value);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }

    pub fn remove_attribute(&self, name: &str) -> &Self {
        self.node.remove_attribute(name);
        self
    }

    // Visibility

    pub fn hide(&self) -> &Self {
        self.node.set_hidden(true);
        self
    }

    pub fn show(&self) -> &Self {
        self.node.set_hidden(false);
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.node.hidden()
    }

    // Styling

    pub fn add_class(&self, class: &str) -> &Self {
        self.node.add_class(class);
        self
    }

    pub fn remove_class(&self, class: &str) -> &Self {
        self.node.remove_class(class);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.has_class(class)
    }

    /// Set an inline style property
    pub fn set_style(&self, property: &str, value: &str) -> &Self {
        self.node.set_style_property(property, value);
        self
    }

    /// Computed value of a style property
    pub fn style(&self, property: &str) -> String {
        self.node.computed_style(property)
    }

    pub fn set_padding(&self, value: &str) -> &Self {
        self.set_style("padding", value)
    }

    pub fn padding(&self) -> String {
        self.style("padding")
    }

    pub fn set_margin(&self, value: &str) -> &Self {
        self.set_style("margin", value)
    }

    pub fn margin(&self) -> String {
        self.style("margin")
    }

    pub fn set_background(&self, value: &str) -> &Self {
        self.set_style("background", value)
    }

    pub fn background(&self) -> String {
        self.style("background")
    }

    pub fn set_color(&self, value: &str) -> &Self {
        self.set_style("color", value)
    }

    pub fn color(&self) -> String {
        self.style("color")
    }

    // Native event shortcuts

    fn bind(&self, event_type: EventType, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        let listener: EventListener = Rc::new(handler);
        self.node.add_event_listener(event_type, listener, false);
        self
    }

    pub fn on_click(&self, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        self.bind(EventType::Click, handler)
    }

    pub fn on_double_click(&self, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        self.bind(EventType::DblClick, handler)
    }

    pub fn on_mouse_over(&self, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        self.bind(EventType::MouseOver, handler)
    }

    pub fn on_mouse_out(&self, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        self.bind(EventType::MouseOut, handler)
    }

    pub fn on_mouse_move(&self, handler: impl Fn(&DomEvent) + 'static) -> &Self {
        self.bind(EventType::MouseMove, handler)
    }

    /// Fire `handler` when a mouse or touch press is held for `delay`
    /// (the configured long-press delay when `None`)
    pub fn on_long_click(
        &self,
        handler: impl Fn(&DomEvent) + 'static,
        delay: Option<Duration>,
    ) -> &Self {
        let delay = delay.unwrap_or(self.ctx.config().long_press_delay);
        press::bind_long_press(&self.node, delay, Rc::new(handler));
        self
    }

    // Animation

    /// Tween numeric style properties to the given values; fire-and-forget
    pub fn animate(&self, props: &[(&str, &str)], duration: Option<Duration>) -> &Self {
        let duration = duration.unwrap_or(self.ctx.config().animation_duration);
        self.ctx.tweener().to(&self.node, props, duration, None);
        self
    }

    // Emitter

    pub fn add_event_listener(
        &self,
        event_name: &str,
        callback: Listener<Element>,
        options: ListenerOptions,
    ) -> &Self {
        self.events.add_event_listener(event_name, callback, options);
        self
    }

    pub fn remove_event_listener(&self, event_name: &str, callback: &Listener<Element>) -> &Self {
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

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("node", &self.node)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panekit_dom::Document;
    use std::cell::Cell;

    fn ctx() -> Context {
        Context::new(Document::default())
    }

    #[test]
    fn test_chaining() {
        let ctx = ctx();
        let el = Element::create(&ctx, "div");
        el.set_text("hello")
            .set_attribute("title", "t")
            .add_class("card")
            .set_padding("8px")
            .hide();

        assert_eq!(el.text(), "hello");
        assert_eq!(el.get_attribute("title").as_deref(), Some("t"));
        assert!(el.has_class("card"));
        assert_eq!(el.padding(), "8px");
        assert!(el.is_hidden());
        assert!(!el.show().is_hidden());
    }

    #[test]
    fn test_id_captured_once() {
        let ctx = ctx();
        let node = ctx.document().create_element("div");
        node.set_attribute("id", "first");
        let el = Element::wrap(&ctx, node);
        el.set_attribute("id", "second");
        assert_eq!(el.id(), Some("first"));
        assert_eq!(el.get_attribute("id").as_deref(), Some("second"));
    }

    #[test]
    fn test_style_getters_fall_back_to_computed() {
        let ctx = ctx();
        let el = Element::create(&ctx, "p");
        assert_eq!(el.margin(), "0px");
        assert_eq!(el.background(), "rgba(0, 0, 0, 0)");
        el.set_color("blue").set_margin("2px");
        assert_eq!(el.color(), "blue");
        assert_eq!(el.margin(), "2px");
    }

    #[test]
    fn test_foreign_child_is_missing() {
        let ctx = ctx();
        let parent = Element::create(&ctx, "div");
        let other = Document::default().create_element("span");
        assert_eq!(parent.append_child(&other).err(), Some(Error::MissingChild));
        assert_eq!(
            parent.insert_child(&other, InsertPosition::AfterBegin).err(),
            Some(Error::MissingChild)
        );
    }

    #[test]
    fn test_click_shortcut() {
        let ctx = ctx();
        let el = Element::create(&ctx, "button");
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        el.on_click(move |_| counter.set(counter.get() + 1));

        el.node().dispatch_event(DomEvent::new(EventType::Click));
        el.node().dispatch_event(DomEvent::new(EventType::DblClick));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_emitter_context_is_element() {
        let ctx = ctx();
        let node = ctx.document().create_element("div");
        node.set_attribute("id", "self");
        let el = Element::wrap(&ctx, node);
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        el.add_event_listener(
            "ready",
            Rc::new(move |this: &Element, _: &CustomEvent| flag.set(this.id() == Some("self"))),
            ListenerOptions::default(),
        )
        .dispatch_event(&CustomEvent::new("ready"));
        assert!(seen.get());
    }
}
