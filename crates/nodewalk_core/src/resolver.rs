//! Handler resolution along an engine's registry chain.

use nodewalk_node::NodeType;

use crate::registry::{FieldHandler, HandlerSet, NodeHandler, Registry};
use crate::Visitor;

/// The handler set that applies to one node type, or nothing.
pub struct Resolved<'r, V: Visitor> {
    hit: Option<(&'static str, &'r HandlerSet<V>)>,
}

impl<V: Visitor> Registry<V> {
    /// Finds the handlers for a node of exactly `node_type`.
    ///
    /// Levels are searched most-derived first and the first level with any
    /// entry for the type wins as a whole: its set shadows every ancestor's
    /// set for that type, whole-node handler included. A type nobody
    /// registered resolves to an empty result, meaning default traversal
    /// only.
    pub fn resolve(&self, node_type: &NodeType) -> Resolved<'_, V> {
        let hit = self.levels.iter().find_map(|level| {
            level
                .table
                .get(node_type)
                .filter(|set| !set.is_empty())
                .map(|set| (level.engine, set))
        });
        Resolved { hit }
    }
}

impl<'r, V: Visitor> Resolved<'r, V> {
    /// The engine level the handlers came from.
    pub fn engine(&self) -> Option<&'static str> {
        self.hit.map(|(engine, _)| engine)
    }

    pub fn is_empty(&self) -> bool {
        self.hit.is_none()
    }

    /// The whole-node handler.
    pub fn node_handler(&self) -> Option<&'r NodeHandler<V>> {
        self.hit.and_then(|(_, set)| set.node.as_ref())
    }

    /// The handler for `field`: an exact match, else the wildcard.
    pub fn field_handler(&self, field: &str) -> Option<&'r FieldHandler<V>> {
        let (_, set) = self.hit?;
        set.fields.get(field).or(set.wildcard.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::OnceLock;

    use super::*;
    use crate::Signal;

    struct Parent;
    struct Child {
        parent: Parent,
    }

    fn parent_of(child: &mut Child) -> &mut Parent {
        &mut child.parent
    }

    impl Visitor for Parent {
        type Context = ();
        type Error = Infallible;

        fn registry() -> &'static Registry<Self> {
            static REGISTRY: OnceLock<Registry<Parent>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                Registry::builder("Parent")
                    .register([NodeType::record("A"), NodeType::record("B")], |_, _, _| {
                        Ok(Signal::Continue)
                    })
                    .expect("unique")
                    .build()
            })
        }
    }

    impl Visitor for Child {
        type Context = ();
        type Error = Infallible;

        fn registry() -> &'static Registry<Self> {
            static REGISTRY: OnceLock<Registry<Child>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                Registry::builder("Child")
                    .extends(Parent::registry(), parent_of)
                    .register_attr([NodeType::record("B")], ["x", "*"], |_, _, _, _, _| {
                        Ok(Signal::Stop)
                    })
                    .expect("unique")
                    .build()
            })
        }
    }

    #[test]
    fn test_unregistered_type_resolves_empty() {
        let resolved = Child::registry().resolve(&NodeType::Int);
        assert!(resolved.is_empty());
        assert!(resolved.node_handler().is_none());
        assert!(resolved.field_handler("x").is_none());
        assert_eq!(resolved.engine(), None);
    }

    #[test]
    fn test_ancestor_level_found_when_child_has_no_entry() {
        let resolved = Child::registry().resolve(&NodeType::record("A"));
        assert_eq!(resolved.engine(), Some("Parent"));
        assert!(resolved.node_handler().is_some());
    }

    #[test]
    fn test_nearest_level_shadows_ancestor_entirely() {
        let resolved = Child::registry().resolve(&NodeType::record("B"));
        assert_eq!(resolved.engine(), Some("Child"));
        assert!(resolved.node_handler().is_none());
        assert!(resolved.field_handler("x").is_some());
    }

    #[test]
    fn test_wildcard_covers_unnamed_fields() {
        let resolved = Child::registry().resolve(&NodeType::record("B"));
        assert!(resolved.field_handler("anything").is_some());

        let resolved = Parent::registry().resolve(&NodeType::record("B"));
        assert!(resolved.field_handler("anything").is_none());
    }

    #[test]
    fn test_chain_order() {
        let engines: Vec<_> = Child::registry().engines().collect();
        assert_eq!(engines, vec!["Child", "Parent"]);
        assert_eq!(Child::registry().entry_count(), 4);
    }
}
