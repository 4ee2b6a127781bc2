//! IR Nodes
//!
//! The closed set of node kinds produced by the template parser.

use crate::template::pipeline::ir::handle::NodeId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One `name="value"` entry on a helper usage, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub name: String,
    /// `None` for minimized attributes such as `<input disabled>`.
    #[serde(default)]
    pub value: Option<NodeId>,
}

impl AttributeEntry {
    pub fn new(name: impl Into<String>, value: Option<NodeId>) -> Self {
        AttributeEntry {
            name: name.into(),
            value,
        }
    }

    pub fn minimized(name: impl Into<String>) -> Self {
        AttributeEntry::new(name, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    /// Literal markup or text
    Literal { text: String },
    /// Host-language expression emitted as-is
    Expression { code: String },
    /// Container with no semantics of its own (blocks, attribute value parts, ...)
    #[serde(rename_all = "camelCase")]
    TransparentParent { children: Vec<NodeId> },
    /// Element bound to one or more helper types
    #[serde(rename_all = "camelCase")]
    HelperUsage {
        tag_name: String,
        attributes: Vec<AttributeEntry>,
        bound_type_names: IndexSet<String>,
        children: Vec<NodeId>,
    },
    /// Attribute value replaced by a shared, statically constructed field.
    /// Only valid as the value of an `AttributeEntry`.
    PreallocatedAttributeRef { symbol: String },
}

/// Discriminant of a [`Node`], used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Literal,
    Expression,
    TransparentParent,
    HelperUsage,
    PreallocatedAttributeRef,
}

impl Node {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal { text: text.into() }
    }

    pub fn expression(code: impl Into<String>) -> Self {
        Node::Expression { code: code.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Literal { .. } => NodeKind::Literal,
            Node::Expression { .. } => NodeKind::Expression,
            Node::TransparentParent { .. } => NodeKind::TransparentParent,
            Node::HelperUsage { .. } => NodeKind::HelperUsage,
            Node::PreallocatedAttributeRef { .. } => NodeKind::PreallocatedAttributeRef,
        }
    }

    /// Children in document order; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::TransparentParent { children } | Node::HelperUsage { children, .. } => children,
            _ => &[],
        }
    }
}
