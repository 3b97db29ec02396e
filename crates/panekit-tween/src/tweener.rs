//! Tween scheduler
//!
//! Tweens write inline style on every animation frame of the host document
//! until their duration has elapsed. Completion callbacks run after the
//! final values are written and after the tween list borrow is released.

use crate::{Easing, TweenValue};
use panekit_dom::{Document, NodeRef};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Callback run once a `to` tween reaches its end values
pub type OnComplete = Box<dyn FnOnce()>;

/// Handle to a running tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

struct Track {
    property: String,
    from: TweenValue,
    to: TweenValue,
}

struct Tween {
    id: TweenId,
    node: NodeRef,
    tracks: Vec<Track>,
    start: Duration,
    duration: Duration,
    easing: Easing,
    on_complete: Option<OnComplete>,
}

impl Tween {
    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (now.saturating_sub(self.start).as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn render(&self, progress: f64) {
        let eased = self.easing.evaluate(progress);
        for track in &self.tracks {
            let value = if progress >= 1.0 {
                track.to.clone()
            } else {
                track.from.lerp(&track.to, eased)
            };
            self.node.set_style_property(&track.property, &value.to_string());
        }
    }
}

struct TweenerInner {
    document: Document,
    tweens: RefCell<Vec<Tween>>,
    frame_pending: Cell<bool>,
    easing: Cell<Easing>,
    next_id: Cell<u64>,
}

/// Tween helper bound to one document
#[derive(Clone)]
pub struct Tweener {
    inner: Rc<TweenerInner>,
}

impl Tweener {
    pub fn new(document: &Document) -> Self {
        Self {
            inner: Rc::new(TweenerInner {
                document: document.clone(),
                tweens: RefCell::default(),
                frame_pending: Cell::new(false),
                easing: Cell::new(Easing::default()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// Easing applied to tweens created from now on
    pub fn set_easing(&self, easing: Easing) {
        self.inner.easing.set(easing);
    }

    /// Number of tweens still running
    pub fn active(&self) -> usize {
        self.inner.tweens.borrow().len()
    }

    /// Whether any running tween targets `node`
    pub fn is_tweening(&self, node: &NodeRef) -> bool {
        self.inner.tweens.borrow().iter().any(|t| t.node == *node)
    }

    /// Animate `props` from their current computed values to the given
    /// targets. `on_complete` runs once, after the end values are applied.
    pub fn to(
        &self,
        node: &NodeRef,
        props: &[(&str, &str)],
        duration: Duration,
        on_complete: Option<OnComplete>,
    ) -> TweenId {
        let tracks = props
            .iter()
            .filter_map(|&(property, target)| {
                let to = parse_or_warn(property, target)?;
                let from = TweenValue::parse(&node.computed_style(property))
                    .unwrap_or_else(|| TweenValue::new(0.0, &to.unit));
                Some(Track { property: property.to_string(), from, to })
            })
            .collect();
        self.start(node, tracks, duration, on_complete)
    }

    /// Animate `props` from the given values to their current computed
    /// values. The start values are applied immediately.
    pub fn from(&self, node: &NodeRef, props: &[(&str, &str)], duration: Duration) -> TweenId {
        let tracks: Vec<Track> = props
            .iter()
            .filter_map(|&(property, start)| {
                let from = parse_or_warn(property, start)?;
                let to = TweenValue::parse(&node.computed_style(property))
                    .unwrap_or_else(|| TweenValue::new(0.0, &from.unit));
                Some(Track { property: property.to_string(), from, to })
            })
            .collect();
        for track in &tracks {
            node.set_style_property(&track.property, &track.from.to_string());
        }
        self.start(node, tracks, duration, None)
    }

    /// Stop every tween on `node` where it stands, dropping callbacks
    pub fn kill(&self, node: &NodeRef) -> usize {
        let mut tweens = self.inner.tweens.borrow_mut();
        let before = tweens.len();
        tweens.retain(|t| t.node != *node);
        before - tweens.len()
    }

    fn start(
        &self,
        node: &NodeRef,
        tracks: Vec<Track>,
        duration: Duration,
        on_complete: Option<OnComplete>,
    ) -> TweenId {
        let id = TweenId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        tracing::trace!("Tween {:?} on {:?} for {:?}", id, node, duration);

        self.inner.tweens.borrow_mut().push(Tween {
            id,
            node: node.clone(),
            tracks,
            start: self.inner.document.now(),
            duration,
            easing: self.inner.easing.get(),
            on_complete,
        });
        self.schedule_frame();
        id
    }

    fn schedule_frame(&self) {
        if self.inner.frame_pending.replace(true) {
            return;
        }
        let weak: Weak<TweenerInner> = Rc::downgrade(&self.inner);
        self.inner.document.request_animation_frame(move |now| {
            if let Some(inner) = weak.upgrade() {
                Tweener { inner }.tick(now);
            }
        });
    }

    /// Render all tweens at `now`, retire finished ones, run their callbacks
    fn tick(&self, now: Duration) {
        self.inner.frame_pending.set(false);

        let finished: Vec<Tween> = {
            let mut tweens = self.inner.tweens.borrow_mut();
            let mut finished = Vec::new();
            let mut index = 0;
            while index < tweens.len() {
                let progress = tweens[index].progress(now);
                tweens[index].render(progress);
                if progress >= 1.0 {
                    finished.push(tweens.remove(index));
                } else {
                    index += 1;
                }
            }
            finished
        };

        if self.active() > 0 {
            self.schedule_frame();
        }
        for mut tween in finished {
            tracing::trace!("Tween {:?} complete", tween.id);
            if let Some(on_complete) = tween.on_complete.take() {
                on_complete();
            }
        }
    }
}

fn parse_or_warn(property: &str, value: &str) -> Option<TweenValue> {
    let parsed = TweenValue::parse(value);
    if parsed.is_none() {
        tracing::warn!("Skipping non-numeric tween value {}: {}", property, value);
    }
    parsed
}
