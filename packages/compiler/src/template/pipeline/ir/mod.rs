//! Template IR
//!
//! Node model consumed and rewritten by the field declaration pass.

pub mod handle;
pub mod node;
pub mod tree;

pub use handle::NodeId;
pub use node::{AttributeEntry, Node, NodeKind};
pub use tree::{NodeTree, NodeTreeBuilder};
