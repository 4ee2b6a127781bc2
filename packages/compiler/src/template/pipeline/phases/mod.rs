//! Pipeline Phases Module
//!
//! Transformation phases over the template IR

pub mod attribute_preallocation;
pub mod field_declarations;

pub use attribute_preallocation::{AttributeCacheKey, AttributePreallocationCache, AttributeRewrite};
pub use field_declarations::{FieldDeclarationPass, PassOutput};
