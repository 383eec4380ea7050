//! Node conversion error types.

use thiserror::Error;

/// Errors that can occur while building nodes from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A type tag was present but was not a string.
    #[error("'{tag}' must be a string")]
    InvalidTag {
        /// The offending tag member.
        tag: &'static str,
    },

    /// An object carried both a record and an enum tag.
    #[error("object cannot carry both '$type' and '$enum'")]
    AmbiguousTags,

    /// An enum object had no string `name` member.
    #[error("enum '{type_name}' is missing a string 'name'")]
    MissingEnumLabel {
        /// The enum type name.
        type_name: String,
    },

    /// An enum object's `value` member was not a scalar.
    #[error("enum '{type_name}' value must be a scalar")]
    EnumValueNotScalar {
        /// The enum type name.
        type_name: String,
    },

    /// An enum object carried a member other than its tag, `name` and
    /// `value`.
    #[error("enum '{type_name}' has unexpected member '{member}'")]
    UnexpectedEnumMember {
        /// The enum type name.
        type_name: String,
        /// The first unexpected member.
        member: String,
    },
}
