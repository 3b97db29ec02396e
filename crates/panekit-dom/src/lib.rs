//! panekit DOM - in-process document host
//!
//! Arena-backed DOM tree with attributes, class lists, inline and computed
//! style, adjacent insertion, native event listeners and a virtual clock
//! driving timers and animation frames.
//!
//! All handles are single-threaded (`Rc` based). No `RefCell` borrow is held
//! while a listener, timer or frame callback runs, so callbacks may mutate
//! the document freely.

mod attributes;
mod classlist;
mod clock;
mod document;
mod events;
mod markup;
mod node;
mod node_ref;
mod selector;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::ClassList;
pub use clock::{FrameId, TimerId, FRAME_INTERVAL};
pub use document::{Document, ReadyState, WeakDocument};
pub use events::{DomEvent, EventListener, EventType};
pub use node::{ElementData, Node, NodeData};
pub use node_ref::{InsertPosition, NodeRef};
pub use selector::SimpleSelector;
pub use style::StyleDeclaration;
pub use tree::{Children, DomTree};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found")]
    NotFound,

    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Node belongs to another document")]
    WrongDocument,

    #[error("Invalid insertion position: {0}")]
    InvalidPosition(String),

    #[error("Markup error: {0}")]
    Markup(String),
}
