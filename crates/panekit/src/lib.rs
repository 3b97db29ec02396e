//! panekit
//!
//! Thin chainable wrappers over the host DOM: an `Element` helper, a `View`
//! bound to a root node, and a `MultiViewManager` that crossfades between
//! registered views.
//!
//! # Example
//! ```rust,ignore
//! use panekit::{Context, MultiViewManager, View};
//!
//! let ctx = Context::new(document);
//! let mut manager = MultiViewManager::new(&ctx);
//! manager.add_view(View::new(&ctx, "#home")?)?;
//! manager.switch_to("home")?;
//! ```

mod config;
mod context;
mod element;
mod emitter;
mod manager;
mod press;
mod view;

pub use config::Config;
pub use context::Context;
pub use element::{AsNode, Element};
pub use emitter::{CustomEvent, EventEmitter, Listener, ListenerOptions};
pub use manager::MultiViewManager;
pub use view::{ContentLoaded, Lifecycle, Root, View, DESTROY, SUBVIEW_ADDED};

pub use panekit_dom::{
    Document, DomError, DomEvent, EventType, InsertPosition, NodeRef, ReadyState,
};
pub use panekit_tween::{Easing, Tweener};

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for wrapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("View root is missing or did not resolve")]
    MissingRoot,

    #[error("View root has no id attribute")]
    MissingIdentifier,

    #[error("Child node is missing or belongs to another document")]
    MissingChild,

    #[error("No view registered as {0:?}")]
    UnknownView(String),

    #[error("View has been destroyed")]
    Destroyed,

    #[error(transparent)]
    Dom(#[from] DomError),
}
