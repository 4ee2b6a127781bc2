//! Template Pipeline
//!
//! IR for parsed templates and the phases that run over it.

pub mod emit;
pub mod ir;
pub mod phases;
