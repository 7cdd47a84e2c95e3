//! Undirected adapter: every link is recorded in both directions.
//!
//! Edge classification on the mirrored graph reports each undirected edge
//! twice, once per direction. [`Undirected::has_cycle`] accounts for that;
//! raw [`crate::Node::edges_iter`] output does not.

use std::iter::FusedIterator;

use tracing::trace;

use super::{Linkable, Weighted};
use crate::analysis::CyclePolicy;
use crate::error::GraphResult;
use crate::graph::{Graph, Nodes};
use crate::node::{Direction, Node, NodeKey};
use crate::traversal::Visited;

/// Wraps a [`Linkable`] graph and mirrors `link`/`unlink`.
#[derive(Debug, Default)]
pub struct Undirected<G = Graph> {
    inner: G,
}

impl<G: Linkable> Undirected<G> {
    /// Wrap an existing graph. Edges already present are not mirrored.
    #[must_use]
    pub const fn new(inner: G) -> Self {
        Self { inner }
    }

    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Connected components, one `Vec` per component in DFS post-order.
    #[must_use]
    pub fn connected_components(&self) -> ConnectedComponents<'_> {
        ConnectedComponents {
            roots: self.inner.graph().nodes(),
            visited: Visited::new(),
        }
    }

    /// Whether the undirected graph contains a cycle.
    ///
    /// Uses [`CyclePolicy::undirected`], so the mirrored copy of an edge is
    /// not mistaken for a two-node cycle.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.inner.graph().has_cycle_with(CyclePolicy::undirected())
    }
}

impl<G: Linkable> Linkable for Undirected<G> {
    fn graph(&self) -> &Graph {
        self.inner.graph()
    }

    fn add_node(&mut self, id: String) -> GraphResult<NodeKey> {
        self.inner.add_node(id)
    }

    fn link(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        let forward = self.inner.link(from, to)?;
        let backward = self.inner.link(to, from)?;
        trace!(%from, %to, "mirrored link");
        Ok(forward || backward)
    }

    fn unlink(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        let forward = self.inner.unlink(from, to)?;
        let backward = self.inner.unlink(to, from)?;
        Ok(forward || backward)
    }

    fn remove(&mut self, node: NodeKey) -> GraphResult<()> {
        self.inner.remove(node)
    }
}

impl<G: Linkable> Undirected<Weighted<G>> {
    /// Link both directions with the same weight
    ///
    /// # Errors
    ///
    /// Fails if the nodes belong to different graphs or were removed.
    pub fn link_weighted(&mut self, from: NodeKey, to: NodeKey, weight: f64) -> GraphResult<bool> {
        let forward = self.inner.link_weighted(from, to, weight)?;
        let backward = self.inner.link_weighted(to, from, weight)?;
        Ok(forward || backward)
    }
}

/// Iterator returned by [`Undirected::connected_components`].
pub struct ConnectedComponents<'g> {
    roots: Nodes<'g>,
    visited: Visited,
}

impl<'g> Iterator for ConnectedComponents<'g> {
    type Item = Vec<Node<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        let visited = &mut self.visited;
        let root = self.roots.find(|node| !visited.contains(&node.key()))?;
        Some(root.dfs_with(Direction::Forward, visited).collect())
    }
}

impl FusedIterator for ConnectedComponents<'_> {}
