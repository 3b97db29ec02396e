//! Edge case tests for panekit-tween

use panekit_dom::Document;
use panekit_tween::{Easing, TweenValue, Tweener};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn test_zero_duration_jumps_to_end() {
    let doc = Document::default();
    let node = doc.create_element("div");
    let tweener = Tweener::new(&doc);
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();
    tweener.to(&node, &[("padding", "12px")], Duration::ZERO, Some(Box::new(move || flag.set(true))));

    // Nothing renders before the first frame
    assert!(node.style_property("padding").is_none());
    doc.advance(Duration::from_millis(16));
    assert_eq!(node.style_property("padding").as_deref(), Some("12px"));
    assert!(done.get());
}

#[test]
fn test_empty_props_still_complete() {
    let doc = Document::default();
    let node = doc.create_element("div");
    let tweener = Tweener::new(&doc);
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();
    tweener.to(&node, &[], Duration::from_millis(30), Some(Box::new(move || flag.set(true))));
    doc.advance(Duration::from_millis(48));
    assert!(done.get());
}

#[test]
fn test_unit_follows_target() {
    let doc = Document::default();
    let node = doc.create_element("div");
    let tweener = Tweener::new(&doc);
    tweener.set_easing(Easing::Linear);
    node.set_style_property("width", "10");
    tweener.to(&node, &[("width", "50%")], Duration::from_millis(32), None);
    doc.advance(Duration::from_millis(16));
    assert_eq!(node.style_property("width").as_deref(), Some("30%"));
}

#[test]
fn test_dropped_tweener_stops_ticking() {
    let doc = Document::default();
    let node = doc.create_element("div");
    {
        let tweener = Tweener::new(&doc);
        tweener.to(&node, &[("opacity", "0")], Duration::from_millis(100), None);
    }
    doc.advance(Duration::from_millis(200));
    assert!(node.style_property("opacity").is_none());
}

#[test]
fn test_kill_leaves_values_in_place() {
    let doc = Document::default();
    let node = doc.create_element("div");
    let tweener = Tweener::new(&doc);
    tweener.set_easing(Easing::Linear);
    tweener.to(&node, &[("opacity", "0")], Duration::from_millis(160), None);
    doc.advance(Duration::from_millis(80));
    let frozen = node.style_property("opacity");

    assert_eq!(tweener.kill(&node), 1);
    assert_eq!(tweener.kill(&node), 0);
    doc.advance(Duration::from_millis(200));
    assert_eq!(node.style_property("opacity"), frozen);
}

#[test]
fn test_value_parsing_edge_cases() {
    assert_eq!(TweenValue::parse("+3px"), Some(TweenValue::new(3.0, "px")));
    assert_eq!(TweenValue::parse(".5"), Some(TweenValue::new(0.5, "")));
    assert_eq!(TweenValue::parse("px"), None);
    assert_eq!(TweenValue::parse("rgb(0, 0, 0)"), None);
}

#[test]
fn test_easing_clamps_input() {
    for easing in [Easing::Linear, Easing::Ease, Easing::EaseInOut] {
        assert_eq!(easing.evaluate(-1.0), easing.evaluate(0.0));
        assert!((easing.evaluate(2.0) - 1.0).abs() < 1e-6);
    }
}
