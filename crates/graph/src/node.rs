//! Node handles and borrowed node views.
//!
//! A [`Graph`] owns all node storage. Callers address nodes through
//! [`NodeKey`] handles, which are plain `Copy` values carrying the identity
//! token of the owning graph, and read them through [`Node`] views that
//! borrow the graph immutably.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::graph::{Graph, NodeData};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity token of a [`Graph`].
///
/// Every graph receives a fresh token on construction. Nodes carry the token
/// of the graph that created them, which is how links across graphs are
/// rejected without a pointer back to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle to a node stored in a [`Graph`].
///
/// Keys stay valid until the node is removed. A freed slot is reused by a
/// later node under a new generation, so a key to a removed node is reported
/// as not found instead of aliasing the newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub(crate) graph: GraphId,
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl NodeKey {
    /// Identity token of the graph that created this node.
    #[must_use]
    pub const fn graph_id(&self) -> GraphId {
        self.graph
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}v{}@{}", self.slot, self.generation, self.graph)
    }
}

/// Which adjacency list a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow outgoing edges.
    #[default]
    Forward,
    /// Follow incoming edges, i.e. search the inverse graph.
    Reverse,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    #[must_use]
    pub const fn from_reverse_flag(reverse: bool) -> Self {
        if reverse { Self::Reverse } else { Self::Forward }
    }
}

/// Borrowed view of a live node.
///
/// Equality and hashing use the node's key, so two views of the same node
/// compare equal.
#[derive(Clone, Copy)]
pub struct Node<'g> {
    graph: &'g Graph,
    key: NodeKey,
    data: &'g NodeData,
}

impl<'g> Node<'g> {
    pub(crate) const fn new(graph: &'g Graph, key: NodeKey, data: &'g NodeData) -> Self {
        Self { graph, key, data }
    }

    /// The node's name, unique within its graph.
    #[must_use]
    pub fn id(&self) -> &'g str {
        &self.data.id
    }

    #[must_use]
    pub const fn key(&self) -> NodeKey {
        self.key
    }

    /// The graph this node lives in.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Successors in link order.
    pub fn out_nodes(self) -> impl Iterator<Item = Node<'g>> + 'g {
        self.neighbors(Direction::Forward)
    }

    /// Predecessors in link order.
    pub fn in_nodes(self) -> impl Iterator<Item = Node<'g>> + 'g {
        self.neighbors(Direction::Reverse)
    }

    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.data.out_nodes.len()
    }

    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.data.in_nodes.len()
    }

    /// Whether an edge `self -> other` exists.
    #[must_use]
    pub fn links_to(&self, other: NodeKey) -> bool {
        self.data.out_nodes.contains(&other)
    }

    /// Neighbors in the given direction, in link order.
    pub fn neighbors(self, direction: Direction) -> impl Iterator<Item = Node<'g>> + 'g {
        let graph = self.graph;
        self.adjacency(direction)
            .iter()
            .filter_map(move |key| graph.resolve(*key))
    }

    pub(crate) fn adjacency(&self, direction: Direction) -> &'g [NodeKey] {
        match direction {
            Direction::Forward => &self.data.out_nodes,
            Direction::Reverse => &self.data.in_nodes,
        }
    }

    pub(crate) fn neighbor_at(&self, direction: Direction, position: usize) -> Option<Node<'g>> {
        self.adjacency(direction)
            .get(position)
            .and_then(|key| self.graph.resolve(*key))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.id())
    }
}
