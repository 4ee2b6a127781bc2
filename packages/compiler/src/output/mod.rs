//! Output Module
//!
//! Structured declarations produced by the pipeline and the writer that renders them.

pub mod code_writer;
pub mod declaration;

pub use code_writer::{escape_string_literal, CodeWriter, SourceWriter};
pub use declaration::Declaration;
