//! Scalar leaf values.

use std::fmt;
use std::sync::Arc;

use crate::NodeType;

/// A scalar value at the bottom of a node graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Leaf {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(EnumValue),
}

/// A labeled constant of a named enum type.
///
/// Enum values carry attributes (their label and inner value) but are never
/// record-shaped: traversal treats them as leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    type_name: Arc<str>,
    label: String,
    value: Box<Leaf>,
}

impl EnumValue {
    /// Creates a new enum value.
    pub fn new(type_name: impl Into<Arc<str>>, label: impl Into<String>, value: Leaf) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            value: Box::new(value),
        }
    }

    /// The enum type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The constant's label, e.g. `Red` in `Color.Red`.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The constant's underlying value.
    #[inline]
    pub fn value(&self) -> &Leaf {
        &self.value
    }

    pub(crate) fn shared_type_name(&self) -> &Arc<str> {
        &self.type_name
    }
}

impl Leaf {
    /// Returns the exact type of this leaf.
    pub fn node_type(&self) -> NodeType {
        match self {
            Leaf::Null => NodeType::Null,
            Leaf::Bool(_) => NodeType::Bool,
            Leaf::Int(_) => NodeType::Int,
            Leaf::Float(_) => NodeType::Float,
            Leaf::Str(_) => NodeType::Str,
            Leaf::Enum(value) => NodeType::Enum(Arc::clone(value.shared_type_name())),
        }
    }

    /// Returns the string value, if this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Leaf::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer leaf.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Leaf::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Null => f.write_str("null"),
            Leaf::Bool(b) => write!(f, "{b}"),
            Leaf::Int(i) => write!(f, "{i}"),
            Leaf::Float(x) => write!(f, "{x}"),
            Leaf::Str(s) => write!(f, "{s:?}"),
            Leaf::Enum(e) => write!(f, "{}.{}", e.type_name(), e.label()),
        }
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::Bool(value)
    }
}

impl From<i64> for Leaf {
    fn from(value: i64) -> Self {
        Leaf::Int(value)
    }
}

impl From<f64> for Leaf {
    fn from(value: f64) -> Self {
        Leaf::Float(value)
    }
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf::Str(value.to_string())
    }
}

impl From<String> for Leaf {
    fn from(value: String) -> Self {
        Leaf::Str(value)
    }
}

impl From<EnumValue> for Leaf {
    fn from(value: EnumValue) -> Self {
        Leaf::Enum(value)
    }
}
