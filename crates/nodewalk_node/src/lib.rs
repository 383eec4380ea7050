//! # nodewalk_node
//!
//! Node model for the nodewalk traversal engine.
//!
//! Every value the engine can visit is a [`Node`], a closed tagged variant
//! describing its shape at construction time:
//!
//! - [`Record`] - a named type with named fields
//! - a sequence of nodes
//! - [`Mapping`] - ordered key-value entries
//! - [`Leaf`] - a scalar, including enum constants ([`EnumValue`])
//!
//! Each node has an exact runtime type, [`NodeType`], used as the key for
//! handler registration.
//!
//! ## Example
//!
//! ```rust
//! use nodewalk_node::{Node, NodeType, Record};
//!
//! let node = Node::from(Record::new("Glyph").with_field("name", "a"));
//! assert_eq!(node.node_type(), NodeType::record("Glyph"));
//! ```

mod error;
mod json;
mod leaf;
mod node;
mod node_type;

pub use error::NodeError;
pub use json::{ENUM_TAG, TYPE_TAG};
pub use leaf::{EnumValue, Leaf};
pub use node::{Mapping, Node, PRIVATE_PREFIX, Record, is_private};
pub use node_type::NodeType;
