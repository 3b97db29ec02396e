//! Node handles
//!
//! `NodeRef` pairs a `Document` with a `NodeId` and exposes the element API
//! (attributes, classes, style, insertion, listeners). Attribute, class and
//! style operations on non-element nodes are silent no-ops, matching how the
//! DOM treats text nodes.

use crate::style::{initial_value, is_inherited};
use crate::{
    markup, ClassList, Document, DomError, DomEvent, DomResult, EventListener, NodeId,
    StyleDeclaration,
};
use std::str::FromStr;

/// Position argument of the `insertAdjacent*` family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Before the node itself
    BeforeBegin,
    /// First child
    AfterBegin,
    /// Last child
    #[default]
    BeforeEnd,
    /// After the node itself
    AfterEnd,
}

impl InsertPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            InsertPosition::BeforeBegin => "beforebegin",
            InsertPosition::AfterBegin => "afterbegin",
            InsertPosition::BeforeEnd => "beforeend",
            InsertPosition::AfterEnd => "afterend",
        }
    }
}

impl FromStr for InsertPosition {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beforebegin" => Ok(InsertPosition::BeforeBegin),
            "afterbegin" => Ok(InsertPosition::AfterBegin),
            "beforeend" => Ok(InsertPosition::BeforeEnd),
            "afterend" => Ok(InsertPosition::AfterEnd),
            _ => Err(DomError::InvalidPosition(s.to_string())),
        }
    }
}

/// Handle to one node of a document
#[derive(Clone, PartialEq, Eq)]
pub struct NodeRef {
    document: Document,
    id: NodeId,
}

impl NodeRef {
    pub(crate) fn new(document: Document, id: NodeId) -> Self {
        Self { document, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_element(&self) -> bool {
        self.document.tree().get(self.id).is_some_and(|n| n.is_element())
    }

    /// Lowercased tag name, for elements
    pub fn tag_name(&self) -> Option<String> {
        self.document
            .tree()
            .get(self.id)
            .and_then(|n| n.as_element())
            .map(|e| e.tag.clone())
    }

    pub fn parent(&self) -> Option<NodeRef> {
        let parent = self.document.tree().parent(self.id)?;
        Some(NodeRef::new(self.document.clone(), parent))
    }

    pub fn children(&self) -> Vec<NodeRef> {
        let ids: Vec<NodeId> = self.document.tree().children(self.id).collect();
        ids.into_iter()
            .map(|id| NodeRef::new(self.document.clone(), id))
            .collect()
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self) -> bool {
        self.document
            .tree()
            .is_inclusive_ancestor(NodeId::ROOT, self.id)
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.document
            .tree()
            .get(self.id)
            .and_then(|n| n.as_element())
            .and_then(|e| e.attrs.get_attribute(name))
            .map(str::to_string)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut tree = self.document.tree_mut();
        if let Some(element) = tree.get_mut(self.id).and_then(|n| n.as_element_mut()) {
            element.attrs.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        let mut tree = self.document.tree_mut();
        if let Some(element) = tree.get_mut(self.id).and_then(|n| n.as_element_mut()) {
            element.attrs.remove_attribute(name);
        }
    }

    // Class list

    pub fn class_list(&self) -> ClassList {
        self.get_attribute("class")
            .map(|value| ClassList::from_string(&value))
            .unwrap_or_default()
    }

    fn update_class_list(&self, update: impl FnOnce(&mut ClassList)) {
        if !self.is_element() {
            return;
        }
        let mut list = self.class_list();
        update(&mut list);
        self.set_attribute("class", &list.value());
    }

    pub fn add_class(&self, class: &str) {
        self.update_class_list(|list| {
            list.add(class);
        });
    }

    pub fn remove_class(&self, class: &str) {
        self.update_class_list(|list| {
            list.remove(class);
        });
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    // Style

    pub fn style(&self) -> StyleDeclaration {
        self.get_attribute("style")
            .map(|css| StyleDeclaration::parse(&css))
            .unwrap_or_default()
    }

    fn update_style(&self, update: impl FnOnce(&mut StyleDeclaration)) {
        if !self.is_element() {
            return;
        }
        let mut style = self.style();
        update(&mut style);
        if style.is_empty() {
            self.remove_attribute("style");
        } else {
            self.set_attribute("style", &style.to_css());
        }
    }

    /// Inline style value, if set
    pub fn style_property(&self, property: &str) -> Option<String> {
        self.style().get(property).map(str::to_string)
    }

    pub fn set_style_property(&self, property: &str, value: &str) {
        self.update_style(|style| style.set(property, value));
    }

    pub fn remove_style_property(&self, property: &str) {
        self.update_style(|style| {
            style.remove(property);
        });
    }

    /// Computed value: inline, else inherited (for inherited properties),
    /// else the property's initial value
    pub fn computed_style(&self, property: &str) -> String {
        if let Some(value) = self.style_property(property) {
            return value;
        }
        if is_inherited(property) {
            let mut ancestor = self.parent();
            while let Some(node) = ancestor {
                if let Some(value) = node.style_property(property) {
                    return value;
                }
                ancestor = node.parent();
            }
        }
        initial_value(property).to_string()
    }

    // Visibility

    pub fn hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    pub fn set_hidden(&self, hidden: bool) {
        if hidden {
            self.set_attribute("hidden", "");
        } else {
            self.remove_attribute("hidden");
        }
    }

    // Tree mutation

    /// Append `child`, moving it out of its current parent
    pub fn append_child(&self, child: &NodeRef) -> DomResult<()> {
        let child = self.document.check_owner(child)?;
        self.document.tree_mut().append_child(self.id, child)
    }

    /// Detach from the parent. No-op if already detached.
    pub fn remove(&self) {
        self.document.tree_mut().detach(self.id);
    }

    fn insert_nodes(&self, position: InsertPosition, nodes: &[NodeId]) -> DomResult<()> {
        let mut tree = self.document.tree_mut();
        let (parent, reference) = match position {
            InsertPosition::BeforeBegin => {
                let parent = tree.parent(self.id).ok_or(DomError::HierarchyRequest)?;
                (parent, Some(self.id))
            }
            InsertPosition::AfterBegin => {
                let first = tree.get(self.id).ok_or(DomError::NotFound)?.first_child;
                (self.id, first.is_valid().then_some(first))
            }
            InsertPosition::BeforeEnd => (self.id, None),
            InsertPosition::AfterEnd => {
                let parent = tree.parent(self.id).ok_or(DomError::HierarchyRequest)?;
                let next = tree.get(self.id).ok_or(DomError::NotFound)?.next_sibling;
                (parent, next.is_valid().then_some(next))
            }
        };
        for &node in nodes {
            tree.insert_before(parent, node, reference)?;
        }
        Ok(())
    }

    pub fn insert_adjacent_text(&self, position: InsertPosition, text: &str) -> DomResult<()> {
        let node = self.document.tree_mut().create_text(text);
        self.insert_nodes(position, &[node])
    }

    pub fn insert_adjacent_html(&self, position: InsertPosition, html: &str) -> DomResult<()> {
        let nodes = markup::parse_fragment(&mut self.document.tree_mut(), html)?;
        self.insert_nodes(position, &nodes)
    }

    pub fn insert_adjacent_element(&self, position: InsertPosition, element: &NodeRef) -> DomResult<()> {
        let node = self.document.check_owner(element)?;
        self.insert_nodes(position, &[node])
    }

    // Content

    pub fn text_content(&self) -> String {
        self.document.tree().text_content(self.id)
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&self, text: &str) {
        let mut tree = self.document.tree_mut();
        tree.remove_children(self.id);
        if !text.is_empty() {
            let node = tree.create_text(text);
            // A text child under an existing node is always a valid insertion
            let _ = tree.append_child(self.id, node);
        }
    }

    pub fn inner_html(&self) -> String {
        markup::serialize_inner(&self.document.tree(), self.id)
    }

    pub fn set_inner_html(&self, html: &str) -> DomResult<()> {
        let nodes = markup::parse_fragment(&mut self.document.tree_mut(), html)?;
        self.document.tree_mut().remove_children(self.id);
        self.insert_nodes(InsertPosition::BeforeEnd, &nodes)
    }

    // Events

    pub fn add_event_listener(&self, event_type: impl AsRef<str>, listener: EventListener, once: bool) {
        self.document.listen(self.id, event_type.as_ref(), listener, once);
    }

    /// Remove the first matching registration; unknown listeners are ignored
    pub fn remove_event_listener(&self, event_type: impl AsRef<str>, listener: &EventListener) {
        self.document.unlisten(self.id, event_type.as_ref(), listener);
    }

    pub fn listener_count(&self, event_type: impl AsRef<str>) -> usize {
        self.document.listener_count(self.id, event_type.as_ref())
    }

    /// Dispatch a native event at this node
    pub fn dispatch_event(&self, event: DomEvent) -> bool {
        self.document.dispatch_event(self.id, event)
    }
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = self.tag_name();
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &tag)
            .finish()
    }
}
