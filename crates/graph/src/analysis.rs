//! # Whole-graph analysis
//!
//! Cycle detection, topological ordering, tree-root detection and strongly
//! connected components, all built on the traversals in [`crate::traversal`].
//!
//! # Complexity
//!
//! Every analysis is O(V + E): each node is entered once across all DFS
//! roots thanks to a shared visited set or mark map.

use std::iter::{FusedIterator, Rev};
use std::vec;

use tracing::debug;

use crate::graph::{Graph, Nodes};
use crate::node::{Direction, Node};
use crate::search::SearchNode;
use crate::traversal::{DfsState, EdgeType, Marks, Visited};

/// Which non-tree edges count as evidence of a cycle.
///
/// [`EdgeType::Back`] edges always count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePolicy {
    /// Do not count edges into finished nodes.
    pub allow_cross_edges: bool,
    /// Do not count edges back to the immediate DFS parent.
    pub allow_trivial_back_edges: bool,
}

impl CyclePolicy {
    /// Directed cycles only: cross edges allowed, two-node cycles counted.
    #[must_use]
    pub const fn directed() -> Self {
        Self {
            allow_cross_edges: true,
            allow_trivial_back_edges: false,
        }
    }

    /// Anything but a tree edge counts. Used to recognise trees.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            allow_cross_edges: false,
            allow_trivial_back_edges: false,
        }
    }

    /// For graphs whose edges are mirrored in both directions.
    ///
    /// Each undirected edge shows up once as a tree edge and once as a
    /// trivial back edge, and each cycle-closing back edge is seen again as
    /// a cross edge from the other end. Only back edges count.
    #[must_use]
    pub const fn undirected() -> Self {
        Self {
            allow_cross_edges: true,
            allow_trivial_back_edges: true,
        }
    }

    #[must_use]
    pub const fn counts(&self, kind: EdgeType) -> bool {
        match kind {
            EdgeType::Tree => false,
            EdgeType::Back => true,
            EdgeType::Cross => !self.allow_cross_edges,
            EdgeType::TrivialBack => !self.allow_trivial_back_edges,
        }
    }
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self::directed()
    }
}

impl Graph {
    /// Whether the graph contains a directed cycle
    ///
    /// Equivalent to `has_cycle_with(CyclePolicy::directed())`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::{Graph, GraphResult};
    ///
    /// # fn main() -> GraphResult<()> {
    /// let mut graph = Graph::new();
    /// let a = graph.add_node("a")?;
    /// let b = graph.add_node("b")?;
    /// graph.link(a, b)?;
    /// assert!(!graph.has_cycle());
    ///
    /// graph.link(b, a)?;
    /// assert!(graph.has_cycle());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.has_cycle_with(CyclePolicy::default())
    }

    /// Whether DFS over the whole graph explores an edge that `policy`
    /// counts as a cycle.
    ///
    /// One mark map is shared by all roots, so each node is explored once.
    #[must_use]
    pub fn has_cycle_with(&self, policy: CyclePolicy) -> bool {
        let mut marks = Marks::new();
        let witness = self.nodes().find_map(|node| {
            node.edges_iter_with(Direction::Forward, &mut marks)
                .find(|(kind, _)| policy.counts(*kind))
        });

        match witness {
            Some((kind, search)) => {
                debug!(
                    edge = %kind,
                    from = search.parent().map(|p| p.node().id()).unwrap_or_default(),
                    to = search.node().id(),
                    "cycle witness found"
                );
                true
            }
            None => false,
        }
    }

    /// Nodes in topological order
    ///
    /// `Direction::Forward` puts `u` before `v` for every edge `u -> v`;
    /// `Direction::Reverse` produces the opposite order. Only meaningful for
    /// acyclic graphs: on cyclic input every node still appears exactly once
    /// but the order is unspecified.
    #[must_use]
    pub fn topological_order(&self, direction: Direction) -> TopologicalOrder<'_> {
        // Post-order over the inverse graph emits all predecessors first
        TopologicalOrder {
            roots: self.nodes(),
            visited: Visited::new(),
            state: DfsState::new(direction.reversed()),
        }
    }

    /// Root of the graph if it is a single rooted tree
    ///
    /// Returns `None` when the graph is empty, has a cycle, has a node with
    /// several parents, or has more than one root.
    ///
    /// The candidate root is the first node of the topological order; the
    /// graph is a tree iff a DFS from it reaches every node through tree
    /// edges only.
    #[must_use]
    pub fn tree_root(&self) -> Option<Node<'_>> {
        let candidate = self.topological_order(Direction::Forward).next()?;

        let mut marks = Marks::new();
        let strict = CyclePolicy::strict();
        let rejected = candidate
            .edges_iter_with(Direction::Forward, &mut marks)
            .any(|(kind, _)| strict.counts(kind));

        if rejected || marks.len() != self.len() {
            debug!(
                candidate = candidate.id(),
                reached = marks.len(),
                nodes = self.len(),
                "graph is not a tree"
            );
            return None;
        }
        Some(candidate)
    }

    /// Strongly connected components
    ///
    /// Kosaraju's algorithm. Pass 1 records the DFS finish order over the
    /// inverse graph; pass 2 walks that order from the last finished node
    /// to the first, and every forward DFS from a node not yet visited
    /// yields exactly one component.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::{Graph, GraphResult};
    ///
    /// # fn main() -> GraphResult<()> {
    /// let mut graph = Graph::new();
    /// let a = graph.add_node("a")?;
    /// let b = graph.add_node("b")?;
    /// let c = graph.add_node("c")?;
    /// graph.link(a, b)?;
    /// graph.link(b, a)?;
    /// graph.link(b, c)?;
    ///
    /// let sizes: Vec<usize> = graph.strongly_connected_components().map(|c| c.len()).collect();
    /// assert_eq!(sizes, vec![1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_> {
        let finish_order: Vec<Node<'_>> = self.topological_order(Direction::Forward).collect();
        debug!(nodes = finish_order.len(), "scc finish order computed");

        StronglyConnectedComponents {
            order: finish_order.into_iter().rev(),
            visited: Visited::new(),
        }
    }
}

/// Iterator returned by [`Graph::topological_order`].
pub struct TopologicalOrder<'g> {
    roots: Nodes<'g>,
    visited: Visited,
    state: DfsState<'g>,
}

impl<'g> Iterator for TopologicalOrder<'g> {
    type Item = Node<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(search) = self.state.next_finished(&mut self.visited) {
                return Some(search.node());
            }
            let root = self.roots.next()?;
            self.state.start(SearchNode::root(root), &mut self.visited);
        }
    }
}

impl FusedIterator for TopologicalOrder<'_> {}

/// Iterator returned by [`Graph::strongly_connected_components`].
///
/// Each item is one component in DFS post-order.
pub struct StronglyConnectedComponents<'g> {
    order: Rev<vec::IntoIter<Node<'g>>>,
    visited: Visited,
}

impl<'g> Iterator for StronglyConnectedComponents<'g> {
    type Item = Vec<Node<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        let visited = &mut self.visited;
        let leader = self.order.find(|node| !visited.contains(&node.key()))?;
        Some(leader.dfs_with(Direction::Forward, visited).collect())
    }
}

impl FusedIterator for StronglyConnectedComponents<'_> {}
