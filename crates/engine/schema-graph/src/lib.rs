//! The reference graph of a schema.
//!
//! Fields point at types, arguments point at input types and types own fields, so a schema forms a
//! graph which may contain cycles. [`GraphNode::children`] exposes the outgoing edges of one node,
//! [`walk`] and [`validate`] traverse the whole graph and fail on the first reference which does
//! not resolve.

mod error;
mod node;
mod registry;
mod walk;

pub use error::{IntegrityError, Referrer};
pub use node::{GraphNode, Node, TraversalContext};
pub use registry::TypeRegistry;
pub use walk::{validate, walk};
