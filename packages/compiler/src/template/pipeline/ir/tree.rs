//! IR Tree
//!
//! Arena holding every node of a template. Passes mutate slots in place
//! instead of holding references into the live tree.

use crate::error::{CompilerError, Result};
use crate::template::pipeline::ir::handle::NodeId;
use crate::template::pipeline::ir::node::{AttributeEntry, Node};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTree {
    nodes: Vec<Node>,
    #[serde(default)]
    root: Option<NodeId>,
}

impl NodeTree {
    pub fn new() -> Self {
        NodeTree::default()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CompilerError::invalid_argument("tree", e.to_string()))
    }

    /// Allocate a node. The node is not attached anywhere until referenced.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_usize())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_usize())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attribute entries of a helper usage node.
    pub fn attributes(&self, id: NodeId) -> Option<&[AttributeEntry]> {
        match self.get(id)? {
            Node::HelperUsage { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Replace the value of the `index`-th attribute of helper usage `id` with a new node.
    /// The node keeps its identity and position; the previous value node is left detached.
    pub fn replace_attribute_value(
        &mut self,
        id: NodeId,
        index: usize,
        value: Node,
    ) -> Result<NodeId> {
        let in_range = matches!(
            self.get(id),
            Some(Node::HelperUsage { attributes, .. }) if index < attributes.len()
        );
        if !in_range {
            return Err(CompilerError::structural(
                id,
                format!("no attribute entry {} on a helper usage", index),
            ));
        }

        let value_id = self.push(value);
        if let Some(Node::HelperUsage { attributes, .. }) = self.get_mut(id) {
            attributes[index].value = Some(value_id);
        }
        Ok(value_id)
    }
}

/// Convenience builder used by the parser front-end and by tests.
#[derive(Debug, Default)]
pub struct NodeTreeBuilder {
    tree: NodeTree,
}

impl NodeTreeBuilder {
    pub fn new() -> Self {
        NodeTreeBuilder::default()
    }

    pub fn literal(&mut self, text: impl Into<String>) -> NodeId {
        self.tree.push(Node::literal(text))
    }

    pub fn expression(&mut self, code: impl Into<String>) -> NodeId {
        self.tree.push(Node::expression(code))
    }

    pub fn parent(&mut self, children: Vec<NodeId>) -> NodeId {
        self.tree.push(Node::TransparentParent { children })
    }

    pub fn helper_usage<S: Into<String>>(
        &mut self,
        tag_name: impl Into<String>,
        bound_type_names: impl IntoIterator<Item = S>,
        attributes: Vec<AttributeEntry>,
        children: Vec<NodeId>,
    ) -> NodeId {
        let bound_type_names: IndexSet<String> =
            bound_type_names.into_iter().map(Into::into).collect();
        self.tree.push(Node::HelperUsage {
            tag_name: tag_name.into(),
            attributes,
            bound_type_names,
            children,
        })
    }

    /// `name="text"` with a plain literal value
    pub fn literal_attribute(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> AttributeEntry {
        let value = self.literal(text);
        AttributeEntry::new(name, Some(value))
    }

    /// `name="@code"` with a dynamic value
    pub fn expression_attribute(
        &mut self,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> AttributeEntry {
        let value = self.expression(code);
        AttributeEntry::new(name, Some(value))
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.tree.push(node)
    }

    pub fn build(mut self, root: NodeId) -> NodeTree {
        self.tree.set_root(root);
        self.tree
    }

    /// Finish without a root, e.g. when the parser produced nothing.
    pub fn build_detached(self) -> NodeTree {
        self.tree
    }
}
