//! Compiler Errors
//!
//! Error type shared by the field declaration pass and its collaborators.

use crate::template::pipeline::ir::NodeId;
use thiserror::Error;

/// Errors raised while generating field declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompilerError {
    /// A required collaborator or input is missing or unusable.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The traversal reached a node it cannot classify.
    #[error("Malformed template tree at node {node:?}: {message}")]
    Structural {
        /// Node being visited when the problem was found
        node: NodeId,
        /// Description of the defect
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("Invalid compiler configuration: {0}")]
    Config(String),
}

impl CompilerError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CompilerError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn structural(node: NodeId, message: impl Into<String>) -> Self {
        CompilerError::Structural {
            node,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
