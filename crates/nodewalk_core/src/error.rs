//! Engine error types.

use nodewalk_node::NodeType;
use thiserror::Error;

use crate::registry::Selector;

/// Errors raised while defining an engine's handler table.
///
/// These are programmer errors: they surface when the registry is built,
/// never during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The same (node type, selector) pair was registered twice by one
    /// engine.
    #[error("engine '{engine}' already has a {selector} handler for '{node_type}'")]
    Duplicate {
        /// Engine whose table holds the conflict.
        engine: &'static str,
        /// Target node type.
        node_type: NodeType,
        /// The conflicting selector.
        selector: Selector,
    },
}

/// Errors that can occur while configuring traversal options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// No option with this name exists.
    #[error("Unknown option '{0}'")]
    Unknown(String),

    /// The value could not be parsed for the option's type.
    #[error("Invalid value '{value}' for option '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// `+=` or `-=` was used on an option that is not a list.
    #[error("Operator '{op}' is only supported for list options, not '{key}'")]
    UnsupportedOperator { key: String, op: &'static str },

    /// Reading the options file failed.
    #[error("Failed to read options: {0}")]
    Io(#[from] std::io::Error),

    /// The options file is not valid JSON(C).
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// The options file does not match the schema.
    #[error("Options validation failed: {0}")]
    Validation(String),
}
