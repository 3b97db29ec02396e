//! Crossfade demo
//!
//! Builds two views, wires a long-press and a click, then switches between
//! the views while stepping the virtual clock.
//!
//! Run with `RUST_LOG=panekit=debug` to see lifecycle logging.

use anyhow::{Context as _, Result};
use panekit::{
    Context, ContentLoaded, CustomEvent, Document, DomEvent, Element, EventType, ListenerOptions,
    MultiViewManager, View, SUBVIEW_ADDED,
};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>panekit crossfade</title></head>
  <body>
    <section id="inbox"><h1>Inbox</h1></section>
    <section id="compose" hidden><h1>Compose</h1></section>
  </body>
</html>"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = Document::parse(PAGE, "demo://crossfade").context("parsing demo page")?;
    let ctx = Context::new(document.clone());

    let inbox = View::with_lifecycle(
        &ctx,
        "#inbox",
        ContentLoaded(|view: &View, document: &Document| {
            println!("{:?} ready in {}", view.id(), document.url());
        }),
    )?;
    let compose = View::new(&ctx, "#compose")?;

    inbox.add_event_listener(
        SUBVIEW_ADDED,
        Rc::new(|_: &View, event: &CustomEvent| {
            let text = event.detail.as_ref().map(|n| n.text_content()).unwrap_or_default();
            println!("subview added: {}", text);
        }),
        ListenerOptions::default(),
    );

    let message = Element::create(&ctx, "article");
    message
        .set_text("Hello from panekit")
        .add_class("message")
        .set_padding("8px")
        .on_click(|_| println!("message clicked"))
        .on_long_click(|event| println!("long press at {:?}", event.timestamp), None);
    inbox.add_subview(&message)?;

    let mut manager = MultiViewManager::new(&ctx);
    manager.add_view(inbox.clone())?;
    manager.add_view(compose.clone())?;

    document.finish_loading();
    manager.switch_to("inbox")?;
    document.advance(Duration::from_millis(600));

    message.node().dispatch_event(DomEvent::new(EventType::MouseDown));
    document.advance(Duration::from_millis(600));
    message.node().dispatch_event(DomEvent::new(EventType::MouseUp));
    message.node().dispatch_event(DomEvent::new(EventType::Click));

    manager.switch_to("compose")?;
    for step in 1..=6 {
        document.advance(Duration::from_millis(200));
        println!(
            "t={:>4}ms inbox visible={} compose visible={} compose opacity={}",
            step * 200,
            inbox.is_visible(),
            compose.is_visible(),
            compose.root().map(|r| r.computed_style("opacity")).unwrap_or_default(),
        );
    }

    manager.destroy_view("inbox")?;
    println!("registered views: {:?}", manager.view_ids());
    Ok(())
}
