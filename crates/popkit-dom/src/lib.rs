//! popkit DOM - Document model for popup interaction
//!
//! Arena-based element tree with parent links, the root's native listener
//! slots, and the interaction events popups react to.

mod node;
mod tree;
mod document;
mod dom_events;
mod subtree;

pub use node::{Node, NodeData, ElementData};
pub use tree::{DomTree, Ancestors};
pub use document::{Document, RootListeners};
pub use dom_events::{EventCategory, InteractionEvent};
pub use subtree::{occurred_within_subtree, node_within_subtree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),

    #[error("Invalid node: {0:?}")]
    InvalidNode(NodeId),

    #[error("Cannot append {child:?} to its own descendant {parent:?}")]
    HierarchyCycle { parent: NodeId, child: NodeId },
}
