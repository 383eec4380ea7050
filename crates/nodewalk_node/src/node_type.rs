//! Exact runtime-type keys for nodes.

use std::fmt;
use std::sync::Arc;

/// The exact runtime type of a [`Node`](crate::Node).
///
/// Handler tables are keyed by this type. Lookup is exact: a handler
/// registered for `Record("Glyph")` never fires for `Record("Component")`,
/// and there is no notion of one node type being a subtype of another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    /// A record of the named type.
    Record(Arc<str>),
    /// An enumerated constant of the named type.
    Enum(Arc<str>),
    /// An ordered sequence.
    Sequence,
    /// A key-value mapping.
    Mapping,
    /// The null leaf.
    Null,
    /// A boolean leaf.
    Bool,
    /// An integer leaf.
    Int,
    /// A floating point leaf.
    Float,
    /// A string leaf.
    Str,
}

impl NodeType {
    /// Creates the key for a named record type.
    pub fn record(name: impl Into<Arc<str>>) -> Self {
        Self::Record(name.into())
    }

    /// Creates the key for a named enum type.
    pub fn enumeration(name: impl Into<Arc<str>>) -> Self {
        Self::Enum(name.into())
    }

    /// Returns the type name as displayed in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            NodeType::Record(name) | NodeType::Enum(name) => name,
            NodeType::Sequence => "sequence",
            NodeType::Mapping => "mapping",
            NodeType::Null => "null",
            NodeType::Bool => "bool",
            NodeType::Int => "int",
            NodeType::Float => "float",
            NodeType::Str => "str",
        }
    }

    /// Returns true for record types.
    #[inline]
    pub const fn is_record(&self) -> bool {
        matches!(self, NodeType::Record(_))
    }

    /// Returns true for types whose values are leaves, enums included.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        !matches!(
            self,
            NodeType::Record(_) | NodeType::Sequence | NodeType::Mapping
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::record(NodeType::record("Glyph"), "Glyph", false)]
    #[case::enumeration(NodeType::enumeration("Color"), "Color", true)]
    #[case::sequence(NodeType::Sequence, "sequence", false)]
    #[case::mapping(NodeType::Mapping, "mapping", false)]
    #[case::int(NodeType::Int, "int", true)]
    #[case::null(NodeType::Null, "null", true)]
    fn test_name_and_leafness(#[case] ty: NodeType, #[case] name: &str, #[case] leaf: bool) {
        assert_eq!(ty.name(), name);
        assert_eq!(ty.to_string(), name);
        assert_eq!(ty.is_leaf(), leaf);
    }

    #[test]
    fn test_record_and_enum_with_same_name_differ() {
        assert_ne!(NodeType::record("Color"), NodeType::enumeration("Color"));
        assert!(NodeType::record("Color").is_record());
        assert!(!NodeType::enumeration("Color").is_record());
        assert_eq!(NodeType::record("Color"), NodeType::record(String::from("Color")));
    }
}
