//! Walk functions for node traversal.
//!
//! These provide the default behavior of the [`Visitor`] hooks. Call them
//! from an overridden hook to keep default recursion after custom logic.

use nodewalk_node::{Mapping, Node, Record};
use tracing::trace;

use crate::Visitor;

/// Runs the whole-node handler for `node`, then dispatches on its shape.
pub fn walk_node<V: Visitor>(
    visitor: &mut V,
    node: &Node,
    cx: &mut V::Context,
) -> Result<(), V::Error> {
    let node_type = node.node_type();
    let resolved = V::registry().resolve(&node_type);

    if let Some(handler) = resolved.node_handler() {
        let signal = handler(visitor, node, cx)?;
        if !signal.descends(visitor.default_stop()) {
            trace!(node_type = %node_type, ?signal, "Handler stopped descent into node");
            return Ok(());
        }
    }

    match node {
        Node::Record(record) => visitor.visit_record(record, cx),
        Node::Sequence(items) => visitor.visit_sequence(items, cx),
        Node::Mapping(mapping) => visitor.visit_mapping(mapping, cx),
        Node::Leaf(leaf) => visitor.visit_leaf(leaf, cx),
    }
}

/// Visits the public fields of `record` in lexicographic order.
///
/// Each field's handler (exact name, else wildcard) runs first; the field
/// is passed to [`Visitor::visit_field`] unless the handler stopped it.
pub fn walk_record<V: Visitor>(
    visitor: &mut V,
    record: &Record,
    cx: &mut V::Context,
) -> Result<(), V::Error> {
    let resolved = V::registry().resolve(&record.node_type());

    for (name, value) in record.public_fields() {
        if let Some(handler) = resolved.field_handler(name) {
            let signal = handler(visitor, record, name, value, cx)?;
            if !signal.descends(visitor.default_stop()) {
                trace!(
                    record = record.type_name(),
                    field = name,
                    ?signal,
                    "Handler stopped descent into field"
                );
                continue;
            }
        }
        visitor.visit_field(record, name, value, cx)?;
    }
    Ok(())
}

/// Visits every element of a sequence in order.
#[inline]
pub fn walk_sequence<V: Visitor>(
    visitor: &mut V,
    items: &[Node],
    cx: &mut V::Context,
) -> Result<(), V::Error> {
    for item in items {
        visitor.visit(item, cx)?;
    }
    Ok(())
}

/// Visits every value of a mapping in iteration order.
#[inline]
pub fn walk_mapping<V: Visitor>(
    visitor: &mut V,
    mapping: &Mapping,
    cx: &mut V::Context,
) -> Result<(), V::Error> {
    for value in mapping.values() {
        visitor.visit(value, cx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::OnceLock;

    use nodewalk_node::{EnumValue, Leaf, NodeType};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Registry, Signal};

    /// Records every event in visiting order.
    #[derive(Default)]
    struct Tracer {
        events: Vec<String>,
        leaves: usize,
        default_stop: bool,
    }

    impl Visitor for Tracer {
        type Context = ();
        type Error = Infallible;

        fn registry() -> &'static Registry<Self> {
            static REGISTRY: OnceLock<Registry<Tracer>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                Registry::builder("Tracer")
                    .register([NodeType::record("Opaque")], |v: &mut Tracer, _, _| {
                        v.events.push("Opaque".to_string());
                        Ok(Signal::Stop)
                    })
                    .and_then(|b| {
                        b.register([NodeType::record("Quiet")], |v: &mut Tracer, _, _| {
                            v.events.push("Quiet".to_string());
                            Ok(Signal::Unspecified)
                        })
                    })
                    .and_then(|b| {
                        b.register_attr(
                            [NodeType::record("B")],
                            ["x"],
                            |v: &mut Tracer, _, name, _, _| {
                                v.events.push(format!("handler:{name}"));
                                Ok(Signal::Stop)
                            },
                        )
                    })
                    .and_then(|b| {
                        b.register_attr(
                            [NodeType::record("W")],
                            ["*"],
                            |v: &mut Tracer, _, name, _, _| {
                                v.events.push(format!("wild:{name}"));
                                Ok(Signal::Continue)
                            },
                        )
                    })
                    .and_then(|b| {
                        b.register_attr(
                            [NodeType::record("W")],
                            ["keep"],
                            |v: &mut Tracer, _, name, _, _| {
                                v.events.push(format!("named:{name}"));
                                Ok(Signal::Unspecified)
                            },
                        )
                    })
                    .expect("Tracer handlers are unique")
                    .build()
            })
        }

        fn default_stop(&self) -> bool {
            self.default_stop
        }

        fn visit_record(&mut self, record: &Record, cx: &mut ()) -> Result<(), Infallible> {
            self.events.push(format!("record:{}", record.type_name()));
            walk_record(self, record, cx)
        }

        fn visit_field(
            &mut self,
            _: &Record,
            name: &str,
            value: &Node,
            cx: &mut (),
        ) -> Result<(), Infallible> {
            self.events.push(format!("field:{name}"));
            self.visit(value, cx)
        }

        fn visit_leaf(&mut self, leaf: &Leaf, _: &mut ()) -> Result<(), Infallible> {
            self.leaves += 1;
            self.events.push(format!("leaf:{leaf}"));
            Ok(())
        }
    }

    fn run(tracer: &mut Tracer, node: impl Into<Node>) -> Vec<String> {
        let node = node.into();
        match tracer.visit(&node, &mut ()) {
            Ok(()) => std::mem::take(&mut tracer.events),
            Err(never) => match never {},
        }
    }

    #[test]
    fn test_whole_node_stop_skips_children() {
        let inner = Record::new("Leafy").with_field("deep", 1);
        let opaque = Record::new("Opaque").with_field("child", inner).with_field("n", 2);
        let root = Node::sequence([Node::from(opaque), Node::from(3)]);

        let mut tracer = Tracer::default();
        assert_eq!(run(&mut tracer, root), vec!["Opaque", "leaf:3"]);
        assert_eq!(tracer.leaves, 1);
    }

    #[test]
    fn test_field_handler_only_for_named_field() {
        let b = Record::new("B").with_field("y", 2).with_field("x", 1);

        let mut tracer = Tracer::default();
        assert_eq!(
            run(&mut tracer, b),
            vec!["record:B", "handler:x", "field:y", "leaf:2"]
        );
    }

    #[test]
    fn test_fields_visited_in_lexicographic_order() {
        let record = Record::new("Plain")
            .with_field("gamma", 3)
            .with_field("alpha", 1)
            .with_field("_hidden", 0)
            .with_field("beta", 2);

        let mut tracer = Tracer::default();
        assert_eq!(
            run(&mut tracer, record),
            vec![
                "record:Plain",
                "field:alpha",
                "leaf:1",
                "field:beta",
                "leaf:2",
                "field:gamma",
                "leaf:3",
            ]
        );
    }

    #[test]
    fn test_exact_field_beats_wildcard() {
        let w = Record::new("W").with_field("keep", 1).with_field("other", 2);

        let mut tracer = Tracer::default();
        assert_eq!(
            run(&mut tracer, w),
            vec![
                "record:W",
                "named:keep",
                "field:keep",
                "leaf:1",
                "wild:other",
                "field:other",
                "leaf:2",
            ]
        );
    }

    #[test]
    fn test_unspecified_descends_without_default_stop() {
        let quiet = Record::new("Quiet").with_field("a", 1);

        let mut tracer = Tracer::default();
        assert_eq!(
            run(&mut tracer, quiet),
            vec!["Quiet", "record:Quiet", "field:a", "leaf:1"]
        );
    }

    #[test]
    fn test_unspecified_stops_with_default_stop() {
        let quiet = Record::new("Quiet").with_field("a", 1);
        let w = Record::new("W").with_field("keep", 1).with_field("other", 2);

        let mut tracer = Tracer {
            default_stop: true,
            ..Tracer::default()
        };
        assert_eq!(run(&mut tracer, quiet), vec!["Quiet"]);
        // Explicit continue still descends.
        assert_eq!(
            run(&mut tracer, w),
            vec!["record:W", "named:keep", "wild:other", "field:other", "leaf:2"]
        );
    }

    #[test]
    fn test_enum_leaf_is_not_record_shaped() {
        let color = EnumValue::new("Color", "Red", Leaf::Int(1));

        let mut tracer = Tracer::default();
        assert_eq!(run(&mut tracer, color), vec!["leaf:Color.Red"]);
    }

    #[test]
    fn test_list_of_mappings_counts_leaves_in_order() {
        let root = Node::sequence([
            Mapping::new().with("a", 1),
            Mapping::new().with("b", 2),
        ]);

        let mut tracer = Tracer::default();
        assert_eq!(run(&mut tracer, root), vec!["leaf:1", "leaf:2"]);
        assert_eq!(tracer.leaves, 2);
    }

    #[test]
    fn test_mapping_keys_are_not_visited() {
        let root = Mapping::new().with("key", "value");

        let mut tracer = Tracer::default();
        assert_eq!(run(&mut tracer, root), vec!["leaf:\"value\""]);
    }
}
