//! Weighted adapter: a numeric payload per edge.
//!
//! Weights live next to the wrapped graph, keyed by `(from, to)`. Traversal
//! and analysis ignore them.

use std::collections::HashMap;

use super::Linkable;
use crate::error::GraphResult;
use crate::graph::Graph;
use crate::node::{Direction, Node, NodeKey};

/// Weight recorded by a plain [`Linkable::link`].
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Wraps a [`Linkable`] graph and records a weight for every edge.
#[derive(Debug, Default)]
pub struct Weighted<G = Graph> {
    inner: G,
    weights: HashMap<(NodeKey, NodeKey), f64>,
}

impl<G: Linkable> Weighted<G> {
    /// Wrap an existing graph. Edges already present weigh [`DEFAULT_WEIGHT`].
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            weights: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Link `from -> to` carrying `weight`
    ///
    /// Like the unweighted link this is idempotent: linking an existing edge
    /// keeps the weight it was created with.
    ///
    /// # Errors
    ///
    /// Fails if the nodes belong to different graphs or were removed.
    pub fn link_weighted(&mut self, from: NodeKey, to: NodeKey, weight: f64) -> GraphResult<bool> {
        let before = [self.has_edge(from, to), self.has_edge(to, from)];
        let added = self.inner.link(from, to)?;
        // The inner graph may create more than the requested edge (mirroring).
        for (pair, existed) in [(from, to), (to, from)].into_iter().zip(before) {
            if !existed && self.has_edge(pair.0, pair.1) {
                self.weights.insert(pair, weight);
            }
        }
        Ok(added)
    }

    fn has_edge(&self, from: NodeKey, to: NodeKey) -> bool {
        self.inner
            .graph()
            .node(from)
            .is_ok_and(|source| source.links_to(to))
    }

    /// Weight of the edge `from -> to`, `None` if there is no such edge.
    #[must_use]
    pub fn weight(&self, from: NodeKey, to: NodeKey) -> Option<f64> {
        let source = self.inner.graph().node(from).ok()?;
        source
            .links_to(to)
            .then(|| self.weight_or_default(from, to))
    }

    /// Outgoing edges as `(weight, successor)` in link order
    ///
    /// # Errors
    ///
    /// Fails if the node does not belong to this graph or was removed.
    pub fn out_edges(&self, node: NodeKey) -> GraphResult<Vec<(f64, Node<'_>)>> {
        self.weighted_neighbors(node, Direction::Forward)
    }

    /// Incoming edges as `(weight, predecessor)` in link order
    ///
    /// # Errors
    ///
    /// Fails if the node does not belong to this graph or was removed.
    pub fn in_edges(&self, node: NodeKey) -> GraphResult<Vec<(f64, Node<'_>)>> {
        self.weighted_neighbors(node, Direction::Reverse)
    }

    fn weighted_neighbors(
        &self,
        node: NodeKey,
        direction: Direction,
    ) -> GraphResult<Vec<(f64, Node<'_>)>> {
        let node = self.inner.graph().node(node)?;
        Ok(node
            .neighbors(direction)
            .map(|other| {
                let weight = match direction {
                    Direction::Forward => self.weight_or_default(node.key(), other.key()),
                    Direction::Reverse => self.weight_or_default(other.key(), node.key()),
                };
                (weight, other)
            })
            .collect())
    }

    fn weight_or_default(&self, from: NodeKey, to: NodeKey) -> f64 {
        self.weights
            .get(&(from, to))
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }
}

impl<G: Linkable> Linkable for Weighted<G> {
    fn graph(&self) -> &Graph {
        self.inner.graph()
    }

    fn add_node(&mut self, id: String) -> GraphResult<NodeKey> {
        self.inner.add_node(id)
    }

    fn link(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        self.link_weighted(from, to, DEFAULT_WEIGHT)
    }

    fn unlink(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        let removed = self.inner.unlink(from, to)?;
        for pair in [(from, to), (to, from)] {
            if !self.has_edge(pair.0, pair.1) {
                self.weights.remove(&pair);
            }
        }
        Ok(removed)
    }

    fn remove(&mut self, node: NodeKey) -> GraphResult<()> {
        self.inner.remove(node)?;
        self.weights
            .retain(|(from, to), _| *from != node && *to != node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::adapters::Undirected;

    fn ids_and_weights(edges: &[(f64, Node<'_>)]) -> Vec<(f64, String)> {
        edges
            .iter()
            .map(|(weight, node)| (*weight, node.id().to_string()))
            .collect()
    }

    #[test]
    fn test_link_weighted_records_weight() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;
        let c = graph.add_node("c".to_string())?;

        graph.link_weighted(a, b, 0.5)?;
        graph.link(a, c)?;

        assert_eq!(graph.weight(a, b), Some(0.5));
        assert_eq!(graph.weight(a, c), Some(DEFAULT_WEIGHT));
        assert_eq!(graph.weight(b, a), None);
        assert_eq!(
            ids_and_weights(&graph.out_edges(a)?),
            vec![(0.5, "b".to_string()), (1.0, "c".to_string())]
        );
        assert_eq!(ids_and_weights(&graph.in_edges(b)?), vec![(0.5, "a".to_string())]);
        Ok(())
    }

    #[test]
    fn test_relink_keeps_first_weight() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;

        assert!(graph.link_weighted(a, b, 3.0)?);
        assert!(!graph.link_weighted(a, b, 7.0)?);

        assert_eq!(graph.weight(a, b), Some(3.0));
        assert_eq!(graph.out_edges(a)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_self_loop_records_no_weight() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;

        assert!(!graph.link_weighted(a, a, 2.0)?);
        assert_eq!(graph.weight(a, a), None);
        Ok(())
    }

    #[test]
    fn test_unlink_then_relink_uses_new_weight() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;

        graph.link_weighted(a, b, 3.0)?;
        graph.unlink(a, b)?;
        assert_eq!(graph.weight(a, b), None);

        graph.link_weighted(a, b, 9.0)?;
        assert_eq!(graph.weight(a, b), Some(9.0));
        Ok(())
    }

    #[test]
    fn test_remove_drops_weights() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;
        let c = graph.add_node("c".to_string())?;
        graph.link_weighted(a, b, 2.0)?;
        graph.link_weighted(b, c, 4.0)?;

        graph.remove(b)?;

        assert!(graph.out_edges(a)?.is_empty());
        assert!(graph.in_edges(c)?.is_empty());
        assert!(graph.out_edges(b).is_err());
        Ok(())
    }

    #[test]
    fn test_traversals_ignore_weights() -> GraphResult<()> {
        let mut graph = Weighted::new(Graph::new());
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;
        graph.link_weighted(a, b, 100.0)?;
        graph.link_weighted(b, a, 0.1)?;

        assert!(graph.graph().has_cycle());
        assert_eq!(graph.graph().strongly_connected_components().count(), 1);
        Ok(())
    }

    #[test]
    fn test_weighted_over_undirected_weighs_both_directions() -> GraphResult<()> {
        let mut graph = Weighted::new(Undirected::new(Graph::new()));
        let a = graph.add_node("a".to_string())?;
        let b = graph.add_node("b".to_string())?;

        assert!(graph.link_weighted(a, b, 5.0)?);

        assert_eq!(graph.weight(a, b), Some(5.0));
        assert_eq!(graph.weight(b, a), Some(5.0));
        assert_eq!(ids_and_weights(&graph.in_edges(a)?), vec![(5.0, "b".to_string())]);
        assert_eq!(ids_and_weights(&graph.out_edges(b)?), vec![(5.0, "a".to_string())]);

        graph.unlink(b, a)?;
        assert_eq!(graph.weight(a, b), None);
        graph.link_weighted(a, b, 2.0)?;
        assert_eq!(graph.weight(b, a), Some(2.0));
        Ok(())
    }
}
