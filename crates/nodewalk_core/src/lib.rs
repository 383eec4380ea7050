//! # nodewalk_core
//!
//! A type-dispatched traversal engine for heterogeneous node graphs.
//!
//! Engines implement [`Visitor`] and own an immutable [`Registry`] of
//! handlers keyed by exact node type and, optionally, field name. Handlers
//! run before default recursion and steer it with a [`Signal`]:
//!
//! - [`Signal::Stop`] - skip default traversal of the node or field
//! - [`Signal::Continue`] - descend
//! - [`Signal::Unspecified`] - descend unless [`Visitor::default_stop`]
//!
//! Registries chain: an engine can [extend](RegistryBuilder::extends)
//! another engine's registry and override any of its entries.
//!
//! ## Modules
//!
//! - [`registry`] - registration tables and the builder
//! - [`resolver`] - handler lookup along the registry chain
//! - [`walk`] - default traversal for each node shape
//! - [`options`] - traversal options shared by passes
//! - [`diagnostic`] - message + location carrier for passes

pub mod diagnostic;
mod error;
pub mod options;
pub mod registry;
pub mod resolver;
mod signal;
mod visitor;
pub mod walk;

pub use diagnostic::Diagnostic;
pub use error::{OptionsError, RegistrationError};
pub use options::{IgnoreUnknown, WalkOptions};
pub use registry::{FieldSelector, Registry, RegistryBuilder, Selector, WILDCARD};
pub use resolver::Resolved;
pub use signal::Signal;
pub use visitor::Visitor;
pub use walk::{walk_mapping, walk_node, walk_record, walk_sequence};

// Node model re-exported for engine implementors.
pub use nodewalk_node::{EnumValue, Leaf, Mapping, Node, NodeType, Record};
