//! formbind DOM - Document Object Model
//!
//! Arena-based document tree used by the template binder. Nodes live in a
//! single `Vec` owned by the tree and are addressed by [`NodeId`], so callers
//! can hold on to elements without borrowing the tree.

mod document;
mod generation;
mod interner;
mod node;
mod query;
mod query_cache;
mod tree;

pub use document::Document;
pub use generation::Generation;
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use query::{ElementQuery, Selector, SelectorError};
pub use query_cache::{CacheStats, QueryCache};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Position of the node in the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
