//! Handler registration tables.
//!
//! Each engine type owns one [`Registry`], assembled once by a
//! [`RegistryBuilder`] and immutable afterwards. A registry is a chain of
//! levels, most-derived first: the engine's own table followed by the
//! tables of every engine it [extends](RegistryBuilder::extends).
//!
//! ```rust
//! use std::convert::Infallible;
//! use std::sync::OnceLock;
//!
//! use nodewalk_core::{Node, NodeType, Record, Registry, Signal, Visitor};
//!
//! #[derive(Default)]
//! struct NameCollector {
//!     names: Vec<String>,
//! }
//!
//! impl Visitor for NameCollector {
//!     type Context = ();
//!     type Error = Infallible;
//!
//!     fn registry() -> &'static Registry<Self> {
//!         static REGISTRY: OnceLock<Registry<NameCollector>> = OnceLock::new();
//!         REGISTRY.get_or_init(|| {
//!             Registry::builder("NameCollector")
//!                 .register_attr(
//!                     [NodeType::record("Glyph")],
//!                     ["name"],
//!                     |v: &mut Self, _, _, value, _| {
//!                         if let Some(name) = value.as_leaf().and_then(|l| l.as_str()) {
//!                             v.names.push(name.to_string());
//!                         }
//!                         Ok(Signal::Stop)
//!                     },
//!                 )
//!                 .expect("handlers are unique")
//!                 .build()
//!         })
//!     }
//! }
//!
//! let glyph = Node::from(Record::new("Glyph").with_field("name", "a"));
//! let mut collector = NameCollector::default();
//! collector.visit(&glyph, &mut ()).unwrap();
//! assert_eq!(collector.names, vec!["a"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nodewalk_node::{Node, NodeType, Record};
use tracing::debug;

use crate::{RegistrationError, Signal, Visitor};

/// Field name that selects every field without a specific handler.
pub const WILDCARD: &str = "*";

/// Whole-node handler: `(engine, node, context)`.
pub type NodeHandler<V> = Arc<
    dyn Fn(&mut V, &Node, &mut <V as Visitor>::Context) -> Result<Signal, <V as Visitor>::Error>
        + Send
        + Sync,
>;

/// Field handler: `(engine, record, field name, field value, context)`.
pub type FieldHandler<V> = Arc<
    dyn Fn(
            &mut V,
            &Record,
            &str,
            &Node,
            &mut <V as Visitor>::Context,
        ) -> Result<Signal, <V as Visitor>::Error>
        + Send
        + Sync,
>;

/// Selects which fields of a record a field handler applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSelector {
    /// Exactly the named field.
    Named(String),
    /// Any field lacking a named handler.
    Wildcard,
}

impl From<&str> for FieldSelector {
    /// `"*"` is the wildcard, anything else a field name.
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            FieldSelector::Wildcard
        } else {
            FieldSelector::Named(value.to_string())
        }
    }
}

impl From<String> for FieldSelector {
    fn from(value: String) -> Self {
        if value == WILDCARD {
            FieldSelector::Wildcard
        } else {
            FieldSelector::Named(value)
        }
    }
}

/// The slot a handler occupies for one node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// The whole node, before field-by-field recursion.
    Node,
    /// A field or the field wildcard.
    Field(FieldSelector),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Node => f.write_str("whole-node"),
            Selector::Field(FieldSelector::Named(name)) => write!(f, "field '{name}'"),
            Selector::Field(FieldSelector::Wildcard) => write!(f, "field '{WILDCARD}'"),
        }
    }
}

/// Handlers registered by one engine for one node type.
pub struct HandlerSet<V: Visitor> {
    pub(crate) node: Option<NodeHandler<V>>,
    pub(crate) fields: HashMap<String, FieldHandler<V>>,
    pub(crate) wildcard: Option<FieldHandler<V>>,
}

impl<V: Visitor> Default for HandlerSet<V> {
    fn default() -> Self {
        Self {
            node: None,
            fields: HashMap::new(),
            wildcard: None,
        }
    }
}

impl<V: Visitor> HandlerSet<V> {
    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.fields.is_empty() && self.wildcard.is_none()
    }

    fn len(&self) -> usize {
        usize::from(self.node.is_some()) + self.fields.len() + usize::from(self.wildcard.is_some())
    }

    fn lift<D>(&self, project: fn(&mut D) -> &mut V) -> HandlerSet<D>
    where
        D: Visitor<Context = V::Context>,
        D::Error: From<V::Error>,
    {
        HandlerSet {
            node: self.node.as_ref().map(|h| lift_node(Arc::clone(h), project)),
            fields: self
                .fields
                .iter()
                .map(|(name, h)| (name.clone(), lift_field(Arc::clone(h), project)))
                .collect(),
            wildcard: self
                .wildcard
                .as_ref()
                .map(|h| lift_field(Arc::clone(h), project)),
        }
    }
}

fn lift_node<P, D>(handler: NodeHandler<P>, project: fn(&mut D) -> &mut P) -> NodeHandler<D>
where
    P: Visitor,
    D: Visitor<Context = P::Context>,
    D::Error: From<P::Error>,
{
    Arc::new(move |visitor: &mut D, node: &Node, cx: &mut D::Context| {
        handler(project(visitor), node, cx).map_err(<D::Error as From<P::Error>>::from)
    })
}

fn lift_field<P, D>(handler: FieldHandler<P>, project: fn(&mut D) -> &mut P) -> FieldHandler<D>
where
    P: Visitor,
    D: Visitor<Context = P::Context>,
    D::Error: From<P::Error>,
{
    Arc::new(
        move |visitor: &mut D, record: &Record, name: &str, value: &Node, cx: &mut D::Context| {
            handler(project(visitor), record, name, value, cx)
                .map_err(<D::Error as From<P::Error>>::from)
        },
    )
}

/// One engine's own table.
pub(crate) struct Level<V: Visitor> {
    pub(crate) engine: &'static str,
    pub(crate) table: HashMap<NodeType, HandlerSet<V>>,
}

impl<V: Visitor> Level<V> {
    fn lift<D>(&self, project: fn(&mut D) -> &mut V) -> Level<D>
    where
        D: Visitor<Context = V::Context>,
        D::Error: From<V::Error>,
    {
        Level {
            engine: self.engine,
            table: self
                .table
                .iter()
                .map(|(ty, set)| (ty.clone(), set.lift(project)))
                .collect(),
        }
    }

    fn entry_count(&self) -> usize {
        self.table.values().map(HandlerSet::len).sum()
    }
}

/// The immutable handler table of an engine type.
///
/// Levels are ordered most-derived first. See
/// [`Registry::resolve`](crate::Registry::resolve) for lookup.
pub struct Registry<V: Visitor> {
    pub(crate) levels: Vec<Level<V>>,
}

impl<V: Visitor> Registry<V> {
    /// Starts defining the table of the engine named `engine`.
    pub fn builder(engine: &'static str) -> RegistryBuilder<V> {
        RegistryBuilder::new(engine)
    }

    /// A registry with no handlers: every node gets default traversal.
    pub fn empty(engine: &'static str) -> Self {
        RegistryBuilder::new(engine).build()
    }

    /// Engine names along the chain, most-derived first.
    pub fn engines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.levels.iter().map(|level| level.engine)
    }

    /// Total number of registered handlers across all levels.
    pub fn entry_count(&self) -> usize {
        self.levels.iter().map(Level::entry_count).sum()
    }
}

impl<V: Visitor> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for level in &self.levels {
            let mut types: Vec<_> = level.table.keys().map(NodeType::name).collect();
            types.sort_unstable();
            list.entry(&(level.engine, types));
        }
        list.finish()
    }
}

/// Builder for a [`Registry`].
///
/// Registration methods consume and return the builder so definitions chain
/// with `?`. A duplicate (node type, selector) pair within this builder's
/// own table fails immediately; pairs already handled by an extended engine
/// are overridden.
pub struct RegistryBuilder<V: Visitor> {
    engine: &'static str,
    own: HashMap<NodeType, HandlerSet<V>>,
    ancestors: Vec<Level<V>>,
}

impl<V: Visitor> RegistryBuilder<V> {
    pub fn new(engine: &'static str) -> Self {
        Self {
            engine,
            own: HashMap::new(),
            ancestors: Vec::new(),
        }
    }

    /// Inherits the handlers of another engine.
    ///
    /// `parent`'s levels are appended behind this engine's own level, in
    /// call order for repeated calls. Inherited handlers run against the
    /// parent engine state reached through `project`.
    ///
    /// Only registered handlers are inherited. [`Visitor::default_stop`] and
    /// the default hooks belong to each engine type; a derived engine that
    /// should share its parent's flag delegates to it:
    ///
    /// ```rust,ignore
    /// fn default_stop(&self) -> bool {
    ///     self.base.default_stop()
    /// }
    /// ```
    pub fn extends<P>(mut self, parent: &Registry<P>, project: fn(&mut V) -> &mut P) -> Self
    where
        P: Visitor<Context = V::Context>,
        V::Error: From<P::Error>,
    {
        self.ancestors
            .extend(parent.levels.iter().map(|level| level.lift(project)));
        self
    }

    /// Registers a whole-node handler for each of `types`.
    pub fn register<F>(
        mut self,
        types: impl IntoIterator<Item = NodeType>,
        handler: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(&mut V, &Node, &mut V::Context) -> Result<Signal, V::Error> + Send + Sync + 'static,
    {
        let handler: NodeHandler<V> = Arc::new(handler);
        for node_type in types {
            let set = self.own.entry(node_type.clone()).or_default();
            if set.node.is_some() {
                return Err(self.duplicate(node_type, Selector::Node));
            }
            set.node = Some(Arc::clone(&handler));
        }
        Ok(self)
    }

    /// Registers a field handler for every combination of `types` and
    /// `fields`. A field may be [`WILDCARD`].
    pub fn register_attr<F, S>(
        self,
        types: impl IntoIterator<Item = NodeType>,
        fields: impl IntoIterator<Item = S>,
        handler: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(&mut V, &Record, &str, &Node, &mut V::Context) -> Result<Signal, V::Error>
            + Send
            + Sync
            + 'static,
        S: Into<FieldSelector>,
    {
        let fields: Vec<FieldSelector> = fields.into_iter().map(Into::into).collect();
        let pairs: Vec<(NodeType, FieldSelector)> = types
            .into_iter()
            .flat_map(|node_type| {
                fields
                    .iter()
                    .map(move |field| (node_type.clone(), field.clone()))
            })
            .collect();
        self.register_attrs(pairs, handler)
    }

    /// Registers a field handler for each explicit (type, field) pair.
    pub fn register_attrs<F, S>(
        mut self,
        pairs: impl IntoIterator<Item = (NodeType, S)>,
        handler: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(&mut V, &Record, &str, &Node, &mut V::Context) -> Result<Signal, V::Error>
            + Send
            + Sync
            + 'static,
        S: Into<FieldSelector>,
    {
        let handler: FieldHandler<V> = Arc::new(handler);
        for (node_type, field) in pairs {
            let field = field.into();
            let set = self.own.entry(node_type.clone()).or_default();
            let slot = match &field {
                FieldSelector::Named(name) => set.fields.get(name),
                FieldSelector::Wildcard => set.wildcard.as_ref(),
            };
            if slot.is_some() {
                return Err(self.duplicate(node_type, Selector::Field(field)));
            }
            match field {
                FieldSelector::Named(name) => {
                    set.fields.insert(name, Arc::clone(&handler));
                }
                FieldSelector::Wildcard => set.wildcard = Some(Arc::clone(&handler)),
            }
        }
        Ok(self)
    }

    /// Freezes the table.
    pub fn build(self) -> Registry<V> {
        let mut levels = Vec::with_capacity(1 + self.ancestors.len());
        levels.push(Level {
            engine: self.engine,
            table: self.own,
        });
        levels.extend(self.ancestors);

        let registry = Registry { levels };
        debug!(
            engine = registry.levels[0].engine,
            levels = registry.levels.len(),
            handlers = registry.entry_count(),
            "Built visitor registry"
        );
        registry
    }

    fn duplicate(&self, node_type: NodeType, selector: Selector) -> RegistrationError {
        RegistrationError::Duplicate {
            engine: self.engine,
            node_type,
            selector,
        }
    }
}
