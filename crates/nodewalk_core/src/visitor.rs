//! The `Visitor` trait.
//!
//! A visitor is an engine type with a [`Registry`] of handlers and a set of
//! overridable default hooks. [`Visitor::visit`] is the single entry point,
//! used for the root and for every nested value.
//!
//! # Traversal
//!
//! For every node:
//!
//! 1. The whole-node handler registered for the node's exact type (if any)
//!    runs first. If its [`Signal`](crate::Signal) does not descend, the node
//!    is done.
//! 2. Otherwise the node's shape picks the hook: [`Visitor::visit_record`],
//!    [`Visitor::visit_sequence`], [`Visitor::visit_mapping`] or
//!    [`Visitor::visit_leaf`].
//!
//! Record fields are visited in lexicographic order, private fields
//! excluded. Each field first goes through its field handler (exact name,
//! else wildcard) and then, unless that handler stopped it,
//! [`Visitor::visit_field`].
//!
//! Recursion depth equals graph depth; very deep graphs can exhaust the
//! stack. Cycles cannot be expressed by [`Node`], which owns its children.

use nodewalk_node::{Leaf, Mapping, Node, Record};

use crate::Registry;
use crate::walk::{walk_mapping, walk_node, walk_record, walk_sequence};

/// A traversal engine.
///
/// # Context
///
/// `Context` is caller-supplied state passed unchanged through every
/// recursive call. The engine keeps no per-call state of its own, so one
/// instance can drive several traversals in a row.
///
/// # Errors
///
/// Handlers and hooks return `Result<_, Self::Error>`. The first error
/// aborts the traversal and is returned from the outermost `visit`.
pub trait Visitor: Sized + 'static {
    /// Extra state threaded through the traversal.
    type Context;

    /// Error raised by handlers and hooks.
    type Error;

    /// The engine type's handler table.
    fn registry() -> &'static Registry<Self>;

    /// Whether a handler returning [`Signal::Unspecified`](crate::Signal)
    /// stops descent. Defaults to `false`.
    #[inline]
    fn default_stop(&self) -> bool {
        false
    }

    /// Visits any node.
    #[inline]
    fn visit(&mut self, node: &Node, cx: &mut Self::Context) -> Result<(), Self::Error> {
        walk_node(self, node, cx)
    }

    /// Visits a record's public fields.
    fn visit_record(&mut self, record: &Record, cx: &mut Self::Context) -> Result<(), Self::Error> {
        walk_record(self, record, cx)
    }

    /// Visits one field value after its field handler, if any, continued.
    fn visit_field(
        &mut self,
        _record: &Record,
        _name: &str,
        value: &Node,
        cx: &mut Self::Context,
    ) -> Result<(), Self::Error> {
        self.visit(value, cx)
    }

    /// Visits each element of a sequence in order.
    fn visit_sequence(
        &mut self,
        items: &[Node],
        cx: &mut Self::Context,
    ) -> Result<(), Self::Error> {
        walk_sequence(self, items, cx)
    }

    /// Visits each value of a mapping in iteration order. Keys are not
    /// visited.
    fn visit_mapping(
        &mut self,
        mapping: &Mapping,
        cx: &mut Self::Context,
    ) -> Result<(), Self::Error> {
        walk_mapping(self, mapping, cx)
    }

    /// Visits a scalar leaf. Does nothing by default.
    fn visit_leaf(&mut self, _leaf: &Leaf, _cx: &mut Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
