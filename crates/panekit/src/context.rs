//! Shared context handed to every wrapper
//!
//! Carries the document handle, the tween helper bound to it, and the
//! configuration. Create one at startup and pass it to constructors.

use crate::Config;
use panekit_dom::Document;
use panekit_tween::Tweener;
use std::rc::Rc;

#[derive(Clone)]
pub struct Context {
    document: Document,
    tweener: Tweener,
    config: Rc<Config>,
}

impl Context {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, Config::default())
    }

    pub fn with_config(document: Document, config: Config) -> Self {
        let tweener = Tweener::new(&document);
        Self {
            document,
            tweener,
            config: Rc::new(config),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tweener(&self) -> &Tweener {
        &self.tweener
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("document", &self.document)
            .field("config", &self.config)
            .finish()
    }
}
