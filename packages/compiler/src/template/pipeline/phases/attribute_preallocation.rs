//! Attribute Pre-allocation Phase
//!
//! Replaces attribute values that are known at compile time with references to
//! shared `static readonly` attribute instances, so identical name/value pairs are
//! constructed once per generated class instead of once per render.

use crate::config::GeneratedSymbols;
use crate::error::{CompilerError, Result};
use crate::helper_descriptors::DescriptorCatalog;
use crate::output::Declaration;
use crate::template::pipeline::ir::{Node, NodeId, NodeTree};
use crate::util::fold_case;
use rustc_hash::{FxHashMap, FxHashSet};

/// Identity of a shareable attribute. Both parts compare byte for byte;
/// `value` is `None` for minimized attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeCacheKey {
    pub name: String,
    pub value: Option<String>,
}

impl AttributeCacheKey {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        AttributeCacheKey {
            name: name.into(),
            value,
        }
    }
}

/// Pending replacement of one attribute value with a shared field reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRewrite {
    pub node: NodeId,
    pub index: usize,
    pub symbol: String,
}

/// Symbols generated for shared attributes over the lifetime of one pass.
///
/// Entries are never evicted and the counter never goes back, so a symbol
/// always names exactly one key.
#[derive(Debug)]
pub struct AttributePreallocationCache {
    attribute_type_name: String,
    encoded_string_type_name: String,
    prefix: String,
    entries: FxHashMap<AttributeCacheKey, String>,
    next_index: usize,
}

impl AttributePreallocationCache {
    pub fn new(symbols: &GeneratedSymbols) -> Self {
        AttributePreallocationCache {
            attribute_type_name: symbols.attribute_type_name.clone(),
            encoded_string_type_name: symbols.encoded_string_type_name.clone(),
            prefix: symbols.attribute_symbol_prefix.clone(),
            entries: FxHashMap::default(),
            next_index: 0,
        }
    }

    pub fn get(&self, key: &AttributeCacheKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbol for `key`, declaring a new shared field on a miss.
    pub fn get_or_declare(
        &mut self,
        key: AttributeCacheKey,
        declarations: &mut Vec<Declaration>,
    ) -> String {
        if let Some(symbol) = self.entries.get(&key) {
            tracing::trace!(name = %key.name, symbol = %symbol, "reusing pre-allocated attribute");
            return symbol.clone();
        }

        let symbol = self.fresh_name();
        tracing::debug!(
            name = %key.name,
            value = ?key.value,
            symbol = %symbol,
            "pre-allocating attribute"
        );
        declarations.push(Declaration::PreallocatedAttribute {
            attribute_type_name: self.attribute_type_name.clone(),
            encoded_string_type_name: self.encoded_string_type_name.clone(),
            symbol: symbol.clone(),
            attribute_name: key.name.clone(),
            value: key.value.clone(),
        });
        self.entries.insert(key, symbol.clone());
        symbol
    }

    /// Decide, for each attribute of helper usage `node`, whether its value can be
    /// shared, and return the rewrites for those that can.
    ///
    /// An attribute no bound descriptor declares is never consumed by binding. A
    /// bound attribute seen earlier on the same node is overwritten before use.
    /// Both are safe to share; the first bound occurrence of a name is not.
    pub fn preallocate<C: DescriptorCatalog>(
        &mut self,
        tree: &NodeTree,
        catalog: &C,
        node: NodeId,
        declarations: &mut Vec<Declaration>,
    ) -> Result<Vec<AttributeRewrite>> {
        let (attributes, bound_type_names) = match tree.get(node) {
            Some(Node::HelperUsage {
                attributes,
                bound_type_names,
                ..
            }) => (attributes, bound_type_names),
            _ => {
                return Err(CompilerError::structural(
                    node,
                    "attribute pre-allocation requires a helper usage node",
                ))
            }
        };

        let mut bound_attributes: FxHashSet<String> = FxHashSet::default();
        let mut rewrites = Vec::new();

        for (index, attribute) in attributes.iter().enumerate() {
            let has_match = catalog.any_declares_attribute(bound_type_names, &attribute.name);
            let first_occurrence = bound_attributes.insert(fold_case(&attribute.name));
            if has_match && first_occurrence {
                continue;
            }

            let value = match attribute.value {
                None => None,
                Some(value_id) => match literal_value(tree, value_id)? {
                    Some(text) => Some(text),
                    None => {
                        tracing::trace!(name = %attribute.name, "attribute value is dynamic");
                        continue;
                    }
                },
            };

            let key = AttributeCacheKey::new(attribute.name.clone(), value);
            let symbol = self.get_or_declare(key, declarations);
            rewrites.push(AttributeRewrite {
                node,
                index,
                symbol,
            });
        }

        Ok(rewrites)
    }

    fn fresh_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next_index);
        self.next_index += 1;
        name
    }
}

/// The compile-time text of an attribute value, or `None` if it is dynamic.
///
/// A value is constant when it is a literal, or a container holding exactly one
/// literal. Empty and mixed containers are dynamic.
pub fn literal_value(tree: &NodeTree, value: NodeId) -> Result<Option<String>> {
    let node = tree
        .get(value)
        .ok_or_else(|| CompilerError::structural(value, "attribute value does not resolve"))?;
    match node {
        Node::Literal { text } => Ok(Some(text.clone())),
        Node::TransparentParent { children } => match children.as_slice() {
            [only] => match tree.get(*only) {
                Some(Node::Literal { text }) => Ok(Some(text.clone())),
                Some(_) => Ok(None),
                None => Err(CompilerError::structural(
                    *only,
                    "attribute value part does not resolve",
                )),
            },
            _ => Ok(None),
        },
        Node::Expression { .. }
        | Node::HelperUsage { .. }
        | Node::PreallocatedAttributeRef { .. } => Ok(None),
    }
}
