//! Node definitions.
//!
//! Every value reachable by the traversal engine is a [`Node`]. Its shape is
//! fixed at construction time by the variant, so the engine never has to
//! probe a value to decide how to descend into it.

use std::sync::Arc;

use crate::{Leaf, NodeType};

/// Prefix marking a record field as private. Private fields are never
/// traversed.
pub const PRIVATE_PREFIX: char = '_';

/// Returns true if `name` is a private field name.
#[inline]
pub fn is_private(name: &str) -> bool {
    name.starts_with(PRIVATE_PREFIX)
}

/// A node in a traversable object graph.
///
/// # Example
///
/// ```rust
/// use nodewalk_node::{Leaf, Mapping, Node, NodeType, Record};
///
/// let glyph = Record::new("Glyph")
///     .with_field("name", "a")
///     .with_field("width", 500)
///     .with_field("_cache", Node::Sequence(vec![]));
///
/// let node = Node::from(glyph);
/// assert_eq!(node.node_type(), NodeType::record("Glyph"));
///
/// let names: Vec<_> = node
///     .as_record()
///     .map(|r| r.public_fields().into_iter().map(|(name, _)| name).collect())
///     .unwrap_or_default();
/// assert_eq!(names, vec!["name", "width"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A record with named fields.
    Record(Record),
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),
    /// An ordered key-value mapping.
    Mapping(Mapping),
    /// A scalar leaf.
    Leaf(Leaf),
}

impl Node {
    /// Returns the exact runtime type of this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Record(record) => record.node_type(),
            Node::Sequence(_) => NodeType::Sequence,
            Node::Mapping(_) => NodeType::Mapping,
            Node::Leaf(leaf) => leaf.node_type(),
        }
    }

    /// Creates a sequence node from an iterator of nodes.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        Node::Sequence(items.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    #[inline]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Returns true if this node is a leaf (enums included).
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

/// A record-shaped node: a named type with named fields.
///
/// Fields are kept in declaration order. Traversal order is independent of
/// declaration order; see [`Record::public_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: Arc<str>,
    fields: Vec<(String, Node)>,
}

impl Record {
    /// Creates an empty record of the given type.
    pub fn new(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field, builder style. Replaces an existing field of the same
    /// name in place.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Sets a field. Replaces an existing field of the same name in place.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Node>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Appends a field without checking for an existing one. The caller
    /// guarantees `name` is new.
    pub(crate) fn push_field(&mut self, name: String, value: Node) {
        self.fields.push((name, value));
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the exact runtime type of this record.
    #[inline]
    pub fn node_type(&self) -> NodeType {
        NodeType::Record(Arc::clone(&self.type_name))
    }

    /// Looks up a field by name, private fields included.
    pub fn field(&self, name: &str) -> Option<&Node> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterates all fields in declaration order, private fields included.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the traversable fields: public names only, sorted
    /// lexicographically.
    pub fn public_fields(&self) -> Vec<(&str, &Node)> {
        let mut fields: Vec<_> = self.fields().filter(|(name, _)| !is_private(name)).collect();
        fields.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A key-value mapping node.
///
/// Entries iterate in insertion order. Keys are plain strings and are never
/// used for dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value. An existing key keeps its position and gets the new
    /// value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Appends an entry without checking for an existing key. The caller
    /// guarantees `key` is new.
    pub(crate) fn push(&mut self, key: String, value: Node) {
        self.entries.push((key, value));
    }

    /// Builder-style [`Mapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<Record> for Node {
    fn from(value: Record) -> Self {
        Node::Record(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl From<Leaf> for Node {
    fn from(value: Leaf) -> Self {
        Node::Leaf(value)
    }
}

impl From<crate::EnumValue> for Node {
    fn from(value: crate::EnumValue) -> Self {
        Node::Leaf(Leaf::Enum(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Leaf(Leaf::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Leaf(Leaf::Int(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Leaf(Leaf::Int(i64::from(value)))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Leaf(Leaf::Float(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(Leaf::Str(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(Leaf::Str(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnumValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_public_fields_sorted_regardless_of_declaration_order() {
        let record = Record::new("Point")
            .with_field("z", 3)
            .with_field("x", 1)
            .with_field("y", 2);

        let names: Vec<_> = record.public_fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "z"]);

        let declared: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(declared, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_public_fields_skip_private_prefix() {
        let record = Record::new("Glyph")
            .with_field("_parent", Node::Leaf(Leaf::Null))
            .with_field("name", "a")
            .with_field("__dict", Mapping::new());

        let names: Vec<_> = record.public_fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name"]);
        assert!(record.field("_parent").is_some());
        assert_eq!(record.len(), 3);
        assert!(!record.is_empty());
        assert!(Record::new("Empty").is_empty());
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let record = Record::new("T")
            .with_field("b", 1)
            .with_field("B", 2)
            .with_field("a", 3);
        let names: Vec<_> = record.public_fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }

    #[test]
    fn test_set_field_replaces_in_place() {
        let mut record = Record::new("T").with_field("a", 1).with_field("b", 2);
        record.set_field("a", 10);
        assert_eq!(record.field("a"), Some(&Node::from(10)));
        let declared: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(declared, vec!["a", "b"]);
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let mapping: Mapping = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
        let keys: Vec<_> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let mut mapping = mapping;
        mapping.insert("b", 10);
        assert_eq!(mapping.values().next(), Some(&Node::from(10)));
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn test_node_types() {
        let sequence = Node::sequence([1, 2]);
        assert_eq!(sequence.node_type(), NodeType::Sequence);
        assert_eq!(sequence.as_sequence().map(<[Node]>::len), Some(2));
        assert_eq!(Node::from(1).as_sequence(), None);
        assert_eq!(Node::from(Mapping::new()).node_type(), NodeType::Mapping);
        assert_eq!(Node::from("s").node_type(), NodeType::Str);
        assert_eq!(
            Node::from(EnumValue::new("Color", "Red", Leaf::Int(1))).node_type(),
            NodeType::enumeration("Color")
        );
        assert!(Node::from(EnumValue::new("Color", "Red", Leaf::Int(1))).is_leaf());
    }
}
