//! Field Declaration Phase
//!
//! Walks the template tree once and declares the class members generated code
//! needs for helper usages: runtime support fields (first usage only), one field
//! per distinct helper type, and shared attribute instances.
//!
//! Declarations and attribute rewrites are collected against an immutable tree and
//! only applied once the whole walk has succeeded, so a malformed tree leaves both
//! the writer and the tree untouched.

use crate::config::CompilerConfig;
use crate::error::{CompilerError, Result};
use crate::helper_descriptors::DescriptorCatalog;
use crate::output::{CodeWriter, Declaration};
use crate::template::pipeline::emit::emit_declarations;
use crate::template::pipeline::ir::{Node, NodeId, NodeTree};
use crate::template::pipeline::phases::attribute_preallocation::{
    AttributePreallocationCache, AttributeRewrite,
};
use crate::util::helper_field_name;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// What a completed pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutput {
    /// Every declaration written, in order
    pub declarations: Vec<Declaration>,
    /// Helper types that received a field, in first-seen order
    pub declared_types: Vec<String>,
    /// Generated shared attribute symbols, in creation order
    pub attribute_symbols: Vec<String>,
    /// Number of attribute entries replaced by a shared field reference
    pub rewritten_attributes: usize,
}

/// Single-use pass over one tree. `run` consumes it.
pub struct FieldDeclarationPass<'a, C: DescriptorCatalog> {
    catalog: &'a C,
    config: &'a CompilerConfig,
    declared_types: IndexSet<String>,
    found_helper_usage: bool,
    attribute_cache: AttributePreallocationCache,
    declarations: Vec<Declaration>,
    rewrites: Vec<AttributeRewrite>,
    visited: FxHashSet<NodeId>,
}

impl<'a, C: DescriptorCatalog> FieldDeclarationPass<'a, C> {
    pub fn new(catalog: &'a C, config: &'a CompilerConfig) -> Result<Self> {
        config.symbols.validate()?;
        Ok(FieldDeclarationPass {
            catalog,
            config,
            declared_types: IndexSet::new(),
            found_helper_usage: false,
            attribute_cache: AttributePreallocationCache::new(&config.symbols),
            declarations: Vec::new(),
            rewrites: Vec::new(),
            visited: FxHashSet::default(),
        })
    }

    pub fn run<W: CodeWriter>(mut self, tree: &mut NodeTree, writer: &mut W) -> Result<PassOutput> {
        let root = tree
            .root()
            .ok_or_else(|| CompilerError::invalid_argument("tree", "tree has no root node"))?;

        let span =
            tracing::debug_span!("field_declarations", design_time = self.config.design_time);
        let _enter = span.enter();

        self.accept(tree, root)?;

        for rewrite in &self.rewrites {
            tree.replace_attribute_value(
                rewrite.node,
                rewrite.index,
                Node::PreallocatedAttributeRef {
                    symbol: rewrite.symbol.clone(),
                },
            )?;
        }
        emit_declarations(writer, &self.declarations);

        let attribute_symbols = self
            .declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::PreallocatedAttribute { symbol, .. } => Some(symbol.clone()),
                _ => None,
            })
            .collect();

        tracing::debug!(
            types = self.declared_types.len(),
            attributes = self.attribute_cache.len(),
            rewrites = self.rewrites.len(),
            "field declarations complete"
        );

        Ok(PassOutput {
            rewritten_attributes: self.rewrites.len(),
            declared_types: self.declared_types.into_iter().collect(),
            attribute_symbols,
            declarations: self.declarations,
        })
    }

    /// Depth-first walk from `root` over an explicit stack; nesting depth is bounded
    /// only by memory.
    fn accept(&mut self, tree: &NodeTree, root: NodeId) -> Result<()> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = tree.get(id).ok_or_else(|| {
                CompilerError::structural(id, "node does not resolve in this tree")
            })?;
            if !self.visited.insert(id) {
                return Err(CompilerError::structural(
                    id,
                    "node reached more than once; the tree shares or cycles a subtree",
                ));
            }
            tracing::trace!(node = %id, kind = ?node.kind(), "visiting");

            match node {
                Node::TransparentParent { children } => {
                    stack.extend(children.iter().rev().copied());
                }
                Node::HelperUsage { children, .. } => {
                    self.visit_helper_usage(tree, id, node)?;
                    // Nested helper usages live among the children.
                    stack.extend(children.iter().rev().copied());
                }
                Node::Literal { .. } | Node::Expression { .. } => {}
                Node::PreallocatedAttributeRef { .. } => {
                    return Err(CompilerError::structural(
                        id,
                        "pre-allocated attribute reference outside an attribute value",
                    ))
                }
            }
        }
        Ok(())
    }

    fn visit_helper_usage(&mut self, tree: &NodeTree, id: NodeId, node: &Node) -> Result<()> {
        let (attributes, bound_type_names) = match node {
            Node::HelperUsage {
                attributes,
                bound_type_names,
                ..
            } => (attributes, bound_type_names),
            _ => return Err(CompilerError::structural(id, "expected a helper usage node")),
        };

        // Attribute values must resolve in either mode, hoisted or not.
        for attribute in attributes {
            if let Some(value) = attribute.value {
                check_attribute_value(tree, value)?;
            }
        }

        if !self.found_helper_usage {
            self.found_helper_usage = true;
            self.declare_runtime_support();
        }

        for type_name in bound_type_names {
            if self.declared_types.insert(type_name.clone()) {
                tracing::debug!(type_name = %type_name, "declaring helper field");
                self.declarations
                    .push(Declaration::field(type_name.clone(), helper_field_name(type_name)));
            }
        }

        if !self.config.design_time {
            let rewrites =
                self.attribute_cache
                    .preallocate(tree, self.catalog, id, &mut self.declarations)?;
            self.rewrites.extend(rewrites);
        }
        Ok(())
    }

    fn declare_runtime_support(&mut self) {
        self.declarations.push(Declaration::LineHidden);
        if self.config.design_time {
            return;
        }

        let symbols = &self.config.symbols;
        self.declarations.extend([
            Declaration::pragma(format!("warning disable {}", symbols.unused_field_warning)),
            Declaration::field(
                symbols.string_value_buffer_type_name.clone(),
                symbols.string_value_buffer_variable_name.clone(),
            ),
            Declaration::pragma(format!("warning restore {}", symbols.unused_field_warning)),
            Declaration::field(
                symbols.execution_context_type_name.clone(),
                symbols.execution_context_variable_name.clone(),
            ),
            Declaration::field(
                symbols.runner_type_name.clone(),
                symbols.runner_variable_name.clone(),
            ),
            Declaration::constructed_field(
                symbols.scope_manager_type_name.clone(),
                symbols.scope_manager_variable_name.clone(),
            ),
        ]);
    }
}

/// An attribute value and, for containers, its parts must resolve in `tree`.
fn check_attribute_value(tree: &NodeTree, value: NodeId) -> Result<()> {
    let node = tree
        .get(value)
        .ok_or_else(|| CompilerError::structural(value, "attribute value does not resolve"))?;
    for &part in node.children() {
        if tree.get(part).is_none() {
            return Err(CompilerError::structural(
                part,
                "attribute value part does not resolve",
            ));
        }
    }
    Ok(())
}
