//! IR Handles
//!
//! Defines the index type used to address nodes in a `NodeTree`.

use serde::{Deserialize, Serialize};

/// Index of a node inside its owning `NodeTree` arena.
///
/// Ids are only meaningful for the tree that allocated them; the pass treats an id
/// that does not resolve as a structural defect in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
