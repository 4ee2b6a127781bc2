//! Helper Descriptors
//!
//! Describes which attribute names each helper type binds. The field declaration
//! pass only asks one question of the catalog: does a given bound type declare a
//! given attribute name.

use crate::util::{names_match, starts_with_ignore_case};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An attribute a helper type consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,
    /// Dictionary-style attribute: binds every name starting with `name`
    /// (e.g. `asp-route-` binds `asp-route-id`).
    #[serde(default)]
    pub is_prefix: bool,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        AttributeDescriptor {
            name: name.into(),
            is_prefix: false,
        }
    }

    pub fn prefix(name: impl Into<String>) -> Self {
        AttributeDescriptor {
            name: name.into(),
            is_prefix: true,
        }
    }

    /// Case-insensitive match against an attribute name from the template.
    pub fn is_name_match(&self, name: &str) -> bool {
        if self.is_prefix {
            starts_with_ignore_case(name, &self.name)
        } else {
            names_match(name, &self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperDescriptor {
    /// Fully-qualified helper type name
    pub type_name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
}

impl HelperDescriptor {
    pub fn new(type_name: impl Into<String>, attributes: Vec<AttributeDescriptor>) -> Self {
        HelperDescriptor {
            type_name: type_name.into(),
            attributes,
        }
    }

    pub fn declares_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is_name_match(name))
    }
}

/// Lookup of helper descriptors by bound type name.
pub trait DescriptorCatalog {
    /// Whether `type_name` declares an attribute matching `attribute_name`.
    /// Unknown types declare nothing.
    fn declares_attribute(&self, type_name: &str, attribute_name: &str) -> bool;

    /// Whether any of `type_names` declares `attribute_name`.
    fn any_declares_attribute<'a, I>(&self, type_names: I, attribute_name: &str) -> bool
    where
        I: IntoIterator<Item = &'a String>,
        Self: Sized,
    {
        type_names
            .into_iter()
            .any(|type_name| self.declares_attribute(type_name, attribute_name))
    }
}

/// In-memory catalog keyed by type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelperCatalog {
    descriptors: IndexMap<String, HelperDescriptor>,
}

impl HelperCatalog {
    pub fn new() -> Self {
        HelperCatalog::default()
    }

    /// Register a descriptor, replacing any previous one for the same type.
    pub fn register(&mut self, descriptor: HelperDescriptor) -> &mut Self {
        self.descriptors
            .insert(descriptor.type_name.clone(), descriptor);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&HelperDescriptor> {
        self.descriptors.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<HelperDescriptor> for HelperCatalog {
    fn from_iter<T: IntoIterator<Item = HelperDescriptor>>(iter: T) -> Self {
        let mut catalog = HelperCatalog::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}

impl DescriptorCatalog for HelperCatalog {
    fn declares_attribute(&self, type_name: &str, attribute_name: &str) -> bool {
        self.get(type_name)
            .is_some_and(|d| d.declares_attribute(attribute_name))
    }
}
