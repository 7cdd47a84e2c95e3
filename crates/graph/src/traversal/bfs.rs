//! Breadth-first search with layering and path reconstruction.

use std::collections::VecDeque;
use std::iter::{FusedIterator, Peekable};

use super::Visited;
use crate::node::{Direction, Node};
use crate::search::SearchNode;

/// BFS yielding [`SearchNode`]s in nondecreasing distance order.
///
/// Nodes are marked when enqueued, so each node is yielded once and its
/// distance is the shortest hop count from the root.
pub struct BfsPath<'g> {
    queue: VecDeque<SearchNode<'g>>,
    visited: Visited,
    max_depth: Option<usize>,
    direction: Direction,
}

impl<'g> BfsPath<'g> {
    fn new(root: Node<'g>, max_depth: Option<usize>, direction: Direction) -> Self {
        let mut visited = Visited::new();
        visited.insert(root.key());
        Self {
            queue: VecDeque::from([SearchNode::root(root)]),
            visited,
            max_depth,
            direction,
        }
    }
}

impl<'g> Iterator for BfsPath<'g> {
    type Item = SearchNode<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let search = self.queue.pop_front()?;

        // Nodes at the depth limit are yielded but not expanded
        if self.max_depth.is_none_or(|max| search.dist() < max) {
            for next in search.node().neighbors(self.direction) {
                if self.visited.insert(next.key()) {
                    self.queue.push_back(search.next(next));
                }
            }
        }

        Some(search)
    }
}

impl FusedIterator for BfsPath<'_> {}

/// BFS grouped by distance: `[root]`, then every node one hop away, and so on.
pub struct BfsLayers<'g> {
    inner: Peekable<BfsPath<'g>>,
}

impl<'g> Iterator for BfsLayers<'g> {
    type Item = Vec<Node<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.inner.next()?;
        let dist = first.dist();
        let mut layer = vec![first.node()];
        while let Some(search) = self.inner.next_if(|search| search.dist() == dist) {
            layer.push(search.node());
        }
        Some(layer)
    }
}

impl FusedIterator for BfsLayers<'_> {}

impl<'g> Node<'g> {
    /// Breadth-first search with path reconstruction
    ///
    /// The first item is the root at distance 0. With `max_depth` set, nodes
    /// at that distance are still yielded but not expanded.
    #[must_use]
    pub fn bfs_path(self, max_depth: Option<usize>, direction: Direction) -> BfsPath<'g> {
        BfsPath::new(self, max_depth, direction)
    }

    /// Breadth-first search yielding one `Vec` per distance
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::{Direction, Graph, GraphResult};
    ///
    /// # fn main() -> GraphResult<()> {
    /// let mut graph = Graph::new();
    /// let a = graph.add_node("a")?;
    /// let b = graph.add_node("b")?;
    /// let c = graph.add_node("c")?;
    /// graph.link(a, b)?;
    /// graph.link(a, c)?;
    ///
    /// let layers: Vec<Vec<&str>> = graph
    ///     .node(a)?
    ///     .bfs(None, Direction::Forward)
    ///     .map(|layer| layer.iter().map(|n| n.id()).collect())
    ///     .collect();
    /// assert_eq!(layers, vec![vec!["a"], vec!["b", "c"]]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn bfs(self, max_depth: Option<usize>, direction: Direction) -> BfsLayers<'g> {
        BfsLayers {
            inner: self.bfs_path(max_depth, direction).peekable(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::{Graph, GraphResult, NodeKey};

    fn layer_ids<'g>(layers: impl Iterator<Item = Vec<Node<'g>>>) -> Vec<Vec<&'g str>> {
        layers
            .map(|layer| layer.iter().map(|node| node.id()).collect())
            .collect()
    }

    fn chain(ids: &[&str]) -> GraphResult<(Graph, Vec<NodeKey>)> {
        let mut graph = Graph::new();
        let keys = ids
            .iter()
            .map(|id| graph.add_node(*id))
            .collect::<GraphResult<Vec<_>>>()?;
        for pair in keys.windows(2) {
            if let [from, to] = pair {
                graph.link(*from, *to)?;
            }
        }
        Ok((graph, keys))
    }

    #[test]
    fn test_bfs_chain_layers() -> GraphResult<()> {
        let (graph, keys) = chain(&["a", "b", "c", "d"])?;
        let root = graph.node(keys[0])?;

        let layers = layer_ids(root.bfs(None, Direction::Forward));
        let dists: Vec<usize> = root
            .bfs_path(None, Direction::Forward)
            .map(|search| search.dist())
            .collect();

        assert_eq!(layers, vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]);
        assert_eq!(dists, vec![0, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_bfs_reports_shortest_distance() -> GraphResult<()> {
        // a -> b -> c -> d and a shortcut a -> d
        let (mut graph, keys) = chain(&["a", "b", "c", "d"])?;
        graph.link(keys[0], keys[3])?;

        let found: Vec<_> = graph
            .node(keys[0])?
            .bfs_path(None, Direction::Forward)
            .collect();
        let d = found
            .iter()
            .find(|search| search.node().id() == "d")
            .expect("d is reachable");

        assert_eq!(d.dist(), 1);
        assert_eq!(d.path().len(), 2);
        assert_eq!(found.len(), 4);
        Ok(())
    }

    #[test]
    fn test_bfs_max_depth_prunes_expansion() -> GraphResult<()> {
        let (graph, keys) = chain(&["a", "b", "c", "d"])?;
        let root = graph.node(keys[0])?;

        assert_eq!(
            layer_ids(root.bfs(Some(1), Direction::Forward)),
            vec![vec!["a"], vec!["b"]]
        );
        assert_eq!(layer_ids(root.bfs(Some(0), Direction::Forward)), vec![vec!["a"]]);
        Ok(())
    }

    #[test]
    fn test_bfs_layer_order_follows_discovery() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;
        let c = graph.add_node("c")?;
        let d = graph.add_node("d")?;
        let e = graph.add_node("e")?;
        graph.link(a, c)?;
        graph.link(a, b)?;
        graph.link(b, d)?;
        graph.link(c, e)?;
        graph.link(c, d)?;

        assert_eq!(
            layer_ids(graph.node(a)?.bfs(None, Direction::Forward)),
            vec![vec!["a"], vec!["c", "b"], vec!["e", "d"]]
        );
        Ok(())
    }

    #[test]
    fn test_bfs_reverse_walks_predecessors() -> GraphResult<()> {
        let (graph, keys) = chain(&["a", "b", "c"])?;

        assert_eq!(
            layer_ids(graph.node(keys[2])?.bfs(None, Direction::Reverse)),
            vec![vec!["c"], vec!["b"], vec!["a"]]
        );
        Ok(())
    }
}
