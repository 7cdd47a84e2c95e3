//! Linking capability and composable graph adapters.
//!
//! [`Linkable`] is the mutation surface shared by the plain directed
//! [`Graph`] and the wrappers in this module. Wrappers delegate to the graph
//! they wrap and change only how links are recorded; every traversal runs
//! unchanged on the underlying directed graph returned by
//! [`Linkable::graph`].
//!
//! - [`Undirected`]: mirrors every link in both directions
//! - [`Weighted`]: stores a weight next to every edge
//!
//! Wrappers compose: `Undirected<Weighted<Graph>>` is an undirected
//! weighted graph.

mod undirected;
mod weighted;

use crate::error::GraphResult;
use crate::graph::Graph;
use crate::node::NodeKey;

pub use self::undirected::{ConnectedComponents, Undirected};
pub use self::weighted::{DEFAULT_WEIGHT, Weighted};

/// Node creation and edge mutation.
pub trait Linkable {
    /// The underlying directed graph, for lookups and traversals.
    fn graph(&self) -> &Graph;

    /// Create a node
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::DuplicateId`] if the id exists.
    fn add_node(&mut self, id: String) -> GraphResult<NodeKey>;

    /// Link `from` to `to`; `Ok(true)` if any edge was recorded.
    ///
    /// # Errors
    ///
    /// Fails if the nodes belong to different graphs or were removed.
    fn link(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool>;

    /// Unlink `from` from `to`; `Ok(true)` if any edge was removed.
    ///
    /// # Errors
    ///
    /// Fails if a node does not belong to this graph or was removed.
    fn unlink(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool>;

    /// Remove a node and all of its edges.
    ///
    /// # Errors
    ///
    /// Fails if the node does not belong to this graph or was removed.
    fn remove(&mut self, node: NodeKey) -> GraphResult<()>;

    /// Key of the node named `id`, creating the node if needed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Linkable::add_node`].
    fn key_or_insert(&mut self, id: &str) -> GraphResult<NodeKey> {
        match self.graph().find(id) {
            Some(node) => Ok(node.key()),
            None => self.add_node(id.to_string()),
        }
    }
}

impl Linkable for Graph {
    fn graph(&self) -> &Graph {
        self
    }

    fn add_node(&mut self, id: String) -> GraphResult<NodeKey> {
        Self::add_node(self, id)
    }

    fn link(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        Self::link(self, from, to)
    }

    fn unlink(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        Self::unlink(self, from, to)
    }

    fn remove(&mut self, node: NodeKey) -> GraphResult<()> {
        Self::remove(self, node)
    }
}
