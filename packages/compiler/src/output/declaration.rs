//! Declarations
//!
//! Class-level statements produced by the field declaration pass. They are
//! collected first and rendered once the whole tree has been processed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Declaration {
    /// `#line hidden`
    LineHidden,
    /// `#pragma <value>`
    Pragma { value: String },
    /// `private global::<type_name> <name>;`, or `= new global::<constructed_type>();`
    /// when `constructed_type` is set.
    #[serde(rename_all = "camelCase")]
    Field {
        type_name: String,
        name: String,
        constructed_type: Option<String>,
    },
    /// `private static readonly` attribute instance shared by every occurrence of
    /// the same name/value pair.
    #[serde(rename_all = "camelCase")]
    PreallocatedAttribute {
        attribute_type_name: String,
        encoded_string_type_name: String,
        symbol: String,
        attribute_name: String,
        /// `None` for minimized attributes
        value: Option<String>,
    },
}

impl Declaration {
    pub fn pragma(value: impl Into<String>) -> Self {
        Declaration::Pragma {
            value: value.into(),
        }
    }

    pub fn field(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Declaration::Field {
            type_name: type_name.into(),
            name: name.into(),
            constructed_type: None,
        }
    }

    /// A field initialized with the type's default constructor
    pub fn constructed_field(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Declaration::Field {
            constructed_type: Some(type_name.clone()),
            type_name,
            name: name.into(),
        }
    }
}
