//! Edge case tests for panekit-dom
//!
//! Hierarchy errors, foreign nodes, re-entrant callbacks and odd input.

use panekit_dom::{Document, DomError, DomEvent, EventListener, EventType, InsertPosition};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

// ============================================================================
// TREE EDGE CASES
// ============================================================================

#[test]
fn test_append_ancestor_is_rejected() {
    let doc = Document::default();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    outer.append_child(&inner).unwrap();

    assert_eq!(inner.append_child(&outer), Err(DomError::HierarchyRequest));
    assert_eq!(outer.append_child(&outer), Err(DomError::HierarchyRequest));
}

#[test]
fn test_append_moves_node() {
    let doc = Document::default();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    let child = doc.create_element("span");
    a.append_child(&child).unwrap();
    b.append_child(&child).unwrap();

    assert!(a.children().is_empty());
    assert_eq!(child.parent(), Some(b));
}

#[test]
fn test_foreign_node_rejected() {
    let doc = Document::default();
    let other = Document::default();
    let foreign = other.create_element("p");
    let body = doc.body().unwrap();

    assert_eq!(body.append_child(&foreign), Err(DomError::WrongDocument));
    assert_eq!(
        body.insert_adjacent_element(InsertPosition::AfterBegin, &foreign),
        Err(DomError::WrongDocument)
    );
}

#[test]
fn test_sibling_insert_on_detached_node() {
    let doc = Document::default();
    let loose = doc.create_element("div");
    assert_eq!(
        loose.insert_adjacent_text(InsertPosition::BeforeBegin, "x"),
        Err(DomError::HierarchyRequest)
    );
    assert_eq!(
        loose.insert_adjacent_html(InsertPosition::AfterEnd, "<b>x</b>"),
        Err(DomError::HierarchyRequest)
    );
    // Inside positions still work
    loose.insert_adjacent_text(InsertPosition::AfterBegin, "ok").unwrap();
    assert_eq!(loose.text_content(), "ok");
}

#[test]
fn test_remove_detached_is_noop() {
    let doc = Document::default();
    let loose = doc.create_element("div");
    loose.remove();
    loose.remove();
    assert!(loose.parent().is_none());
    assert!(!loose.is_connected());
}

#[test]
fn test_insert_position_parsing() {
    assert_eq!("beforebegin".parse::<InsertPosition>(), Ok(InsertPosition::BeforeBegin));
    assert_eq!("AfterBegin".parse::<InsertPosition>(), Ok(InsertPosition::AfterBegin));
    assert_eq!("BEFOREEND".parse::<InsertPosition>(), Ok(InsertPosition::BeforeEnd));
    assert_eq!("afterend".parse::<InsertPosition>(), Ok(InsertPosition::AfterEnd));
    assert!(matches!(
        "middle".parse::<InsertPosition>(),
        Err(DomError::InvalidPosition(_))
    ));
    assert_eq!(InsertPosition::default(), InsertPosition::BeforeEnd);
}

// ============================================================================
// NON-ELEMENT NODES
// ============================================================================

#[test]
fn test_text_node_ignores_element_operations() {
    let doc = Document::default();
    let text = doc.create_text_node("plain");
    text.set_attribute("id", "x");
    text.add_class("c");
    text.set_style_property("color", "red");

    assert!(text.get_attribute("id").is_none());
    assert!(!text.has_class("c"));
    assert!(text.style_property("color").is_none());
    assert!(!text.is_element());
    assert_eq!(text.text_content(), "plain");
}

#[test]
fn test_empty_content() {
    let doc = Document::default();
    let div = doc.create_element("div");
    div.set_text_content("something");
    div.set_text_content("");
    assert!(div.children().is_empty());
    div.set_inner_html("").unwrap();
    assert_eq!(div.inner_html(), "");
}

#[test]
fn test_unicode_text() {
    let doc = Document::default();
    let div = doc.create_element("div");
    for text in ["世界", "🚀🌍", "Ñoño", "مرحبا"] {
        div.set_text_content(text);
        assert_eq!(div.text_content(), text);
        assert_eq!(div.inner_html(), text);
    }
}

// ============================================================================
// RE-ENTRANCY
// ============================================================================

#[test]
fn test_listener_mutates_tree_during_dispatch() {
    let doc = Document::default();
    let body = doc.body().unwrap();
    let button = doc.create_element("button");
    body.append_child(&button).unwrap();

    let handle = button.clone();
    button.add_event_listener(
        EventType::Click,
        Rc::new(move |_: &DomEvent| {
            handle.remove();
            handle.set_text_content("gone");
        }),
        false,
    );

    button.dispatch_event(DomEvent::new(EventType::Click));
    assert!(body.children().is_empty());
    assert_eq!(button.text_content(), "gone");
}

#[test]
fn test_listener_added_during_dispatch_waits() {
    let doc = Document::default();
    let body = doc.body().unwrap();
    let count = Rc::new(Cell::new(0));

    let late: EventListener = {
        let count = count.clone();
        Rc::new(move |_: &DomEvent| count.set(count.get() + 1))
    };
    let handle = body.clone();
    body.add_event_listener(
        EventType::Click,
        Rc::new(move |_: &DomEvent| handle.add_event_listener(EventType::Click, late.clone(), false)),
        true,
    );

    body.dispatch_event(DomEvent::new(EventType::Click));
    assert_eq!(count.get(), 0);
    body.dispatch_event(DomEvent::new(EventType::Click));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_remove_listener_by_identity() {
    let doc = Document::default();
    let body = doc.body().unwrap();
    let count = Rc::new(Cell::new(0));
    let make = |count: Rc<Cell<u32>>| -> EventListener { Rc::new(move |_: &DomEvent| count.set(count.get() + 1)) };
    let kept = make(count.clone());
    let dropped = make(count.clone());
    body.add_event_listener("click", kept, false);
    body.add_event_listener("click", dropped.clone(), false);

    body.remove_event_listener("click", &dropped);
    body.remove_event_listener("click", &dropped);
    body.dispatch_event(DomEvent::new(EventType::Click));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_timer_scheduled_by_timer_runs_in_same_advance() {
    let doc = Document::default();
    let log = Rc::new(RefCell::new(Vec::new()));
    let weak = doc.downgrade();
    let outer_log = log.clone();
    doc.set_timeout(Duration::from_millis(10), move || {
        outer_log.borrow_mut().push("outer");
        if let Some(doc) = weak.upgrade() {
            let inner_log = outer_log.clone();
            doc.set_timeout(Duration::from_millis(10), move || inner_log.borrow_mut().push("inner"));
        }
    });

    doc.advance(Duration::from_millis(25));
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}

#[test]
fn test_zero_delay_timer_waits_for_advance() {
    let doc = Document::default();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    doc.set_timeout(Duration::ZERO, move || flag.set(true));
    assert!(!fired.get());
    doc.advance(Duration::ZERO);
    assert!(fired.get());
}

#[test]
fn test_listener_added_after_loading_never_fires() {
    let doc = Document::default();
    doc.finish_loading();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    doc.add_event_listener(EventType::DomContentLoaded, Rc::new(move |_: &DomEvent| flag.set(true)), true);
    doc.finish_loading();
    assert!(!fired.get());
}

#[test]
fn test_malformed_markup_is_recovered() {
    let doc = Document::default();
    let div = doc.create_element("div");
    div.set_inner_html("<p>open <b>bold</p> tail").unwrap();
    assert_eq!(div.text_content(), "open bold tail");
}
