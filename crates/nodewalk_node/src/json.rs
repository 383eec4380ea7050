//! JSON conversion for node graphs.
//!
//! Plain JSON has no notion of records or enums, so two tag members are
//! recognised on objects:
//!
//! - `{"$type": "Glyph", ...}` becomes a [`Record`] of type `Glyph` whose
//!   fields are the remaining members.
//! - `{"$enum": "Color", "name": "Red", "value": 1}` becomes an enum leaf.
//!
//! Every other object becomes a [`Mapping`], arrays become sequences and
//! scalars become leaves. Serialization produces the same shape, so
//! `Node::from_json(serde_json::to_value(&node)?)` reproduces `node`.

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq};
use serde_json::{Map, Value};

use crate::{EnumValue, Leaf, Mapping, Node, NodeError, Record};

/// Object member naming a record type.
pub const TYPE_TAG: &str = "$type";

/// Object member naming an enum type.
pub const ENUM_TAG: &str = "$enum";

impl Node {
    /// Converts a JSON value into a node graph.
    pub fn from_json(value: Value) -> Result<Self, NodeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(Node::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            Value::Object(object) => object_to_node(object),
            scalar => Ok(Node::Leaf(scalar_to_leaf(scalar))),
        }
    }
}

fn object_to_node(mut object: Map<String, Value>) -> Result<Node, NodeError> {
    let type_tag = object.shift_remove(TYPE_TAG);
    let enum_tag = object.shift_remove(ENUM_TAG);

    match (type_tag, enum_tag) {
        (Some(_), Some(_)) => Err(NodeError::AmbiguousTags),
        (Some(Value::String(type_name)), None) => {
            let mut record = Record::new(type_name);
            // Object keys are unique, so fields can be appended unchecked.
            for (name, value) in object {
                record.push_field(name, Node::from_json(value)?);
            }
            Ok(Node::Record(record))
        }
        (Some(_), None) => Err(NodeError::InvalidTag { tag: TYPE_TAG }),
        (None, Some(Value::String(type_name))) => enum_to_node(type_name, object),
        (None, Some(_)) => Err(NodeError::InvalidTag { tag: ENUM_TAG }),
        (None, None) => {
            let mut mapping = Mapping::new();
            for (key, value) in object {
                mapping.push(key, Node::from_json(value)?);
            }
            Ok(Node::Mapping(mapping))
        }
    }
}

fn enum_to_node(type_name: String, mut object: Map<String, Value>) -> Result<Node, NodeError> {
    let Some(Value::String(label)) = object.shift_remove("name") else {
        return Err(NodeError::MissingEnumLabel { type_name });
    };
    let value = match object.shift_remove("value") {
        None => Leaf::Null,
        Some(Value::Array(_) | Value::Object(_)) => {
            return Err(NodeError::EnumValueNotScalar { type_name });
        }
        Some(scalar) => scalar_to_leaf(scalar),
    };
    if let Some(member) = object.keys().next() {
        return Err(NodeError::UnexpectedEnumMember {
            type_name,
            member: member.clone(),
        });
    }
    Ok(Node::Leaf(Leaf::Enum(EnumValue::new(type_name, label, value))))
}

fn scalar_to_leaf(value: Value) -> Leaf {
    match value {
        Value::Null => Leaf::Null,
        Value::Bool(b) => Leaf::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Leaf::Int(i),
            None => Leaf::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Leaf::Str(s),
        // Containers are handled by the caller.
        Value::Array(_) | Value::Object(_) => Leaf::Null,
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Node::Record(record) => record.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(mapping) => mapping.serialize(serializer),
            Node::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len() + 1))?;
        map.serialize_entry(TYPE_TAG, self.type_name())?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Mapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Leaf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Leaf::Null => serializer.serialize_unit(),
            Leaf::Bool(b) => serializer.serialize_bool(*b),
            Leaf::Int(i) => serializer.serialize_i64(*i),
            Leaf::Float(x) => serializer.serialize_f64(*x),
            Leaf::Str(s) => serializer.serialize_str(s),
            Leaf::Enum(e) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry(ENUM_TAG, e.type_name())?;
                map.serialize_entry("name", e.label())?;
                map.serialize_entry("value", e.value())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_type_tag_becomes_record() {
        let node = Node::from_json(json!({
            "$type": "Glyph",
            "name": "a",
            "contours": [1, 2]
        }))
        .unwrap();

        let record = node.as_record().unwrap();
        assert_eq!(record.type_name(), "Glyph");
        assert_eq!(record.field("name"), Some(&Node::from("a")));
        assert_eq!(record.field("contours"), Some(&Node::sequence([1, 2])));
        assert!(record.field(TYPE_TAG).is_none());
    }

    #[test]
    fn test_enum_tag_becomes_leaf() {
        let node = Node::from_json(json!({"$enum": "Color", "name": "Red", "value": 1})).unwrap();
        assert_eq!(node.node_type(), NodeType::enumeration("Color"));
        match node.as_leaf() {
            Some(Leaf::Enum(e)) => {
                assert_eq!(e.label(), "Red");
                assert_eq!(e.value(), &Leaf::Int(1));
            }
            other => panic!("expected enum leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_untagged_object_becomes_mapping() {
        let node = Node::from_json(json!({"a": 1, "b": {"c": null}})).unwrap();
        let mapping = node.as_mapping().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some(&Node::from(1)));
        assert_eq!(mapping.get("b").map(Node::node_type), Some(NodeType::Mapping));
    }

    #[rstest]
    #[case::null(json!(null), Leaf::Null)]
    #[case::bool(json!(true), Leaf::Bool(true))]
    #[case::int(json!(-7), Leaf::Int(-7))]
    #[case::float(json!(1.5), Leaf::Float(1.5))]
    #[case::string(json!("x"), Leaf::Str("x".to_string()))]
    fn test_scalars(#[case] value: Value, #[case] expected: Leaf) {
        assert_eq!(Node::from_json(value).unwrap(), Node::Leaf(expected));
    }

    #[rstest]
    #[case::non_string_type(json!({"$type": 1}), NodeError::InvalidTag { tag: TYPE_TAG })]
    #[case::non_string_enum(json!({"$enum": false}), NodeError::InvalidTag { tag: ENUM_TAG })]
    #[case::both_tags(json!({"$type": "A", "$enum": "B"}), NodeError::AmbiguousTags)]
    #[case::missing_label(
        json!({"$enum": "Color", "value": 1}),
        NodeError::MissingEnumLabel { type_name: "Color".to_string() }
    )]
    #[case::container_value(
        json!({"$enum": "Color", "name": "Red", "value": [1]}),
        NodeError::EnumValueNotScalar { type_name: "Color".to_string() }
    )]
    #[case::extra_member(
        json!({"$enum": "Color", "name": "Red", "value": 1, "hex": "#f00"}),
        NodeError::UnexpectedEnumMember {
            type_name: "Color".to_string(),
            member: "hex".to_string(),
        }
    )]
    fn test_malformed_tags(#[case] value: Value, #[case] expected: NodeError) {
        assert_eq!(Node::from_json(value).unwrap_err(), expected);
    }

    #[test]
    fn test_wide_objects_keep_member_order() {
        const WIDTH: usize = 20_000;
        let members: Map<String, Value> =
            (0..WIDTH).map(|i| (format!("k{i}"), json!(i))).collect();

        let node = Node::from_json(Value::Object(members.clone())).unwrap();
        let mapping = node.as_mapping().unwrap();
        assert_eq!(mapping.len(), WIDTH);
        assert_eq!(mapping.iter().nth(1).map(|(k, _)| k), Some("k1"));
        assert_eq!(mapping.get("k19999"), Some(&Node::from(19_999)));

        let mut tagged = members;
        tagged.insert(TYPE_TAG.to_string(), json!("Wide"));
        let node = Node::from_json(Value::Object(tagged)).unwrap();
        let record = node.as_record().unwrap();
        assert_eq!(record.len(), WIDTH);
        assert!(record.node_type().is_record());
        assert_eq!(record.fields().last().map(|(n, _)| n), Some("k19999"));
    }

    #[test]
    fn test_serialize_reproduces_input_shape() {
        let input = json!([
            {"$type": "Glyph", "name": "a", "_cache": {"k": 1.5}},
            {"$enum": "Color", "name": "Red", "value": 1},
            {"plain": [true, null]}
        ]);
        let node = Node::from_json(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }
}
