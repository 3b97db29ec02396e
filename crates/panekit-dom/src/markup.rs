//! Markup parsing and serialization
//!
//! Parsing goes through html5ever's RcDom and converts into arena nodes.
//! Fragments are parsed as the content of a `<body>`.

use crate::{DomError, DomResult, DomTree, Node, NodeData, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn parse(html: &str) -> DomResult<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|err| DomError::Markup(err.to_string()))
}

/// Parse `html` as body content. Returned nodes are detached.
pub(crate) fn parse_fragment(tree: &mut DomTree, html: &str) -> DomResult<Vec<NodeId>> {
    let dom = parse(&format!(
        "<!DOCTYPE html><html><head></head><body>{html}</body></html>"
    ))?;
    let body = find_element(&dom.document, "body")
        .ok_or_else(|| DomError::Markup("fragment produced no body".to_string()))?;

    let nodes: Vec<NodeId> = body
        .children
        .borrow()
        .iter()
        .filter_map(|child| convert(tree, child))
        .collect();
    tracing::trace!("Parsed fragment into {} nodes", nodes.len());
    Ok(nodes)
}

/// Parse a full document and attach it under the tree's document node
pub(crate) fn parse_document_into(tree: &mut DomTree, html: &str) -> DomResult<()> {
    let dom = parse(html)?;
    let root = tree.root();
    for child in dom.document.children.borrow().iter() {
        if let Some(id) = convert(tree, child) {
            tree.append_child(root, id)?;
        }
    }
    tracing::debug!("Parsed document into {} nodes", tree.len());
    Ok(())
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let RcNodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Convert an RcDom subtree into detached arena nodes
fn convert(tree: &mut DomTree, handle: &Handle) -> Option<NodeId> {
    let id = match &handle.data {
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
        RcNodeData::Comment { contents } => tree.create_comment(contents),
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(&name.local);
            if let Some(elem) = tree.get_mut(id).and_then(Node::as_element_mut) {
                for attr in attrs.borrow().iter() {
                    elem.attrs.set_attribute(&attr.name.local, &attr.value);
                }
            }
            id
        }
        // Doctype and processing instructions are dropped
        _ => return None,
    };

    for child in handle.children.borrow().iter() {
        if let Some(child_id) = convert(tree, child) {
            // Freshly created nodes cannot form a cycle
            let _ = tree.append_child(id, child_id);
        }
    }
    Some(id)
}

/// Serialize the children of `node_id`
pub(crate) fn serialize_inner(tree: &DomTree, node_id: NodeId) -> String {
    let mut output = String::new();
    for child in tree.children(node_id) {
        serialize_node(tree, child, &mut output);
    }
    output
}

fn serialize_node(tree: &DomTree, node_id: NodeId, output: &mut String) {
    let Some(node) = tree.get(node_id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in tree.children(node_id) {
                serialize_node(tree, child, output);
            }
        }
        NodeData::Element(elem) => {
            let tag = elem.tag.as_str();
            output.push('<');
            output.push_str(tag);
            for attr in elem.attrs.iter() {
                output.push(' ');
                output.push_str(&attr.name);
                if !attr.value.is_empty() {
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
            }
            output.push('>');
            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            if RAW_TEXT_ELEMENTS.contains(&tag) {
                output.push_str(&tree.text_content(node_id));
            } else {
                for child in tree.children(node_id) {
                    serialize_node(tree, child, output);
                }
            }
            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        NodeData::Text(text) => escape_text(text, output),
        NodeData::Comment(text) => {
            output.push_str("<!--");
            output.push_str(text);
            output.push_str("-->");
        }
    }
}

fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}
