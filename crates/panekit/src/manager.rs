//! Multi-view manager
//!
//! Registry of views keyed by identifier with a single current view.
//! Switching crossfades: the outgoing view fades out, is hidden, then the
//! incoming view is shown and fades in.

use crate::view::View;
use crate::{Context, Error, Result};
use panekit_tween::{OnComplete, Tweener};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub struct MultiViewManager {
    ctx: Context,
    views: HashMap<String, Rc<View>>,
    /// Not cleared when the view is removed or destroyed
    current: Option<Rc<View>>,
}

impl MultiViewManager {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            views: HashMap::new(),
            current: None,
        }
    }

    /// Register `view` under its identifier, replacing any view already
    /// registered under it. Destroyed views are refused.
    pub fn add_view(&mut self, view: Rc<View>) -> Result<()> {
        let id = view.id().ok_or(Error::Destroyed)?;
        tracing::debug!("Registered view {}", id);
        self.views.insert(id, view);
        Ok(())
    }

    pub fn get_view_by_id(&self, view_id: &str) -> Result<Rc<View>> {
        self.views
            .get(view_id)
            .cloned()
            .ok_or_else(|| Error::UnknownView(view_id.to_string()))
    }

    /// Make `view_id` the current view.
    ///
    /// The current view pointer moves immediately; the visual transition
    /// plays out over the following animation frames.
    pub fn switch_to(&mut self, view_id: &str) -> Result<()> {
        let target = self.get_view_by_id(view_id)?;
        let fade = self.ctx.config().fade_duration;
        let outgoing = self.current.replace(target.clone());

        let Some(outgoing_root) = outgoing.as_ref().and_then(|view| view.root()) else {
            tracing::debug!("Switching to view {}", view_id);
            return fade_in(self.ctx.tweener(), &target, fade);
        };
        tracing::debug!("Switching from {:?} to view {}", outgoing.as_ref().and_then(|v| v.id()), view_id);

        let tweener = self.ctx.tweener().clone();
        let leaving = outgoing_root.clone();
        let done: OnComplete = Box::new(move || {
            leaving.set_hidden(true);
            leaving.remove_style_property("opacity");
            if let Err(err) = fade_in(&tweener, &target, fade) {
                tracing::warn!("Crossfade target unavailable: {}", err);
            }
        });
        self.ctx.tweener().to(&outgoing_root, &[("opacity", "0")], fade, Some(done));
        Ok(())
    }

    /// Unregister `view_id` and hand the view back
    pub fn remove_view(&mut self, view_id: &str) -> Result<Rc<View>> {
        let view = self
            .views
            .remove(view_id)
            .ok_or_else(|| Error::UnknownView(view_id.to_string()))?;
        tracing::debug!("Removed view {}", view_id);
        Ok(view)
    }

    /// Destroy the view, then unregister it
    pub fn destroy_view(&mut self, view_id: &str) -> Result<()> {
        self.get_view_by_id(view_id)?.destroy()?;
        self.views.remove(view_id);
        Ok(())
    }

    /// The view most recently switched to, even if since removed
    pub fn current_view(&self) -> Option<Rc<View>> {
        self.current.clone()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Registered identifiers, sorted
    pub fn view_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.views.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for MultiViewManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiViewManager")
            .field("views", &self.view_ids())
            .field("current", &self.current_view().and_then(|v| v.id()))
            .finish()
    }
}

/// Show `view` and fade its root in from transparent to its computed opacity
fn fade_in(tweener: &Tweener, view: &View, duration: Duration) -> Result<()> {
    view.show()?;
    let root = view.root().ok_or(Error::Destroyed)?;
    // A fade-out still running on this root leaves a partial inline value
    root.remove_style_property("opacity");
    tweener.from(&root, &[("opacity", "0")], duration);
    Ok(())
}
