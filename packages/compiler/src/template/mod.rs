//! Template Module
//!
//! Template compilation pipeline

pub mod pipeline;
