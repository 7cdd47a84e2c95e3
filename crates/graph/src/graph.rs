//! # Graph
//!
//! Owning registry of uniquely named nodes with ordered, duplicate-free
//! adjacency lists in both directions.
//!
//! Nodes live in a slot arena. Removing a node frees its slot for reuse and
//! bumps the slot's generation, which invalidates every outstanding key to
//! it. Live slots are threaded on a doubly linked list in insertion order, so
//! iteration never visits freed slots.

use std::collections::HashMap;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::node::{GraphId, Node, NodeKey};

/// Storage for a single node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) id: String,
    pub(crate) out_nodes: Vec<NodeKey>,
    pub(crate) in_nodes: Vec<NodeKey>,
}

impl NodeData {
    fn new(id: String) -> Self {
        Self {
            id,
            out_nodes: Vec::new(),
            in_nodes: Vec::new(),
        }
    }
}

/// A live node and its neighbours on the insertion-order list.
#[derive(Debug)]
struct Entry {
    data: NodeData,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Directed graph owning its nodes.
///
/// Nodes are created through [`Graph::add_node`] and addressed by the
/// returned [`NodeKey`]. Iteration follows insertion order, which makes every
/// whole-graph traversal reproducible.
///
/// Invariants:
/// - no self-loops, no duplicate entries in either adjacency list
/// - `b` is in `a`'s out-list iff `a` is in `b`'s in-list
/// - storage is bounded by the peak number of live nodes
#[derive(Debug)]
pub struct Graph {
    token: GraphId,
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    index: HashMap<String, NodeKey>,
}

impl Graph {
    /// Create a new empty graph
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::Graph;
    ///
    /// let graph = Graph::new();
    /// assert!(graph.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: GraphId::fresh(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::new(),
        }
    }

    /// Identity token shared by every node of this graph.
    #[must_use]
    pub const fn graph_id(&self) -> GraphId {
        self.token
    }

    /// Create a node
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateId`] if a node with this id exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add_node("a").is_ok());
    /// assert!(graph.add_node("a").is_err());
    /// ```
    pub fn add_node(&mut self, id: impl Into<String>) -> GraphResult<NodeKey> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(GraphError::duplicate_id(id));
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                self.slots.len().saturating_sub(1)
            }
        };
        let tail = self.tail;
        let Some(cell) = self.slots.get_mut(slot) else {
            return Err(GraphError::node_not_found(id));
        };
        let key = NodeKey {
            graph: self.token,
            slot,
            generation: cell.generation,
        };
        cell.entry = Some(Entry {
            data: NodeData::new(id.clone()),
            prev: tail,
            next: None,
        });

        match tail.and_then(|tail| self.entry_mut(tail)) {
            Some(last) => last.next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);

        debug!(node = %id, %key, "node created");
        self.index.insert(id, key);
        Ok(key)
    }

    /// Look up a node by id
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if no node has this id.
    pub fn get(&self, id: &str) -> GraphResult<Node<'_>> {
        self.find(id).ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Look up a node by id, `None` if absent.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<Node<'_>> {
        self.index.get(id).and_then(|key| self.resolve(*key))
    }

    /// Key of the node with this id
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if no node has this id.
    pub fn key(&self, id: &str) -> GraphResult<NodeKey> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    /// View of the node behind `key`
    ///
    /// # Errors
    ///
    /// - [`GraphError::ForeignNode`] if the key belongs to another graph
    /// - [`GraphError::NodeNotFound`] if the node was removed
    pub fn node(&self, key: NodeKey) -> GraphResult<Node<'_>> {
        let data = self.data(key)?;
        Ok(Node::new(self, key, data))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether `key` refers to a live node of this graph.
    #[must_use]
    pub fn contains_key(&self, key: NodeKey) -> bool {
        self.resolve(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes().map(|node| node.out_degree()).sum()
    }

    /// All live nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            graph: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// All edges as `(from, to)` pairs, grouped by source in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Node<'_>, Node<'_>)> {
        self.nodes()
            .flat_map(|from| from.out_nodes().map(move |to| (from, to)))
    }

    /// Add the directed edge `from -> to`
    ///
    /// Linking a node to itself and linking an existing edge again are both
    /// no-ops.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if a new edge was recorded
    /// * `Ok(false)` for a self-loop or an existing edge
    ///
    /// # Errors
    ///
    /// - [`GraphError::CrossGraphLink`] if the nodes belong to different graphs
    /// - [`GraphError::ForeignNode`] if the nodes do not belong to this graph
    /// - [`GraphError::NodeNotFound`] if either node was removed
    pub fn link(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        if from.graph != to.graph {
            return Err(GraphError::cross_graph_link(from.to_string(), to.to_string()));
        }
        self.data(from)?;
        self.data(to)?;

        if from == to {
            trace!(%from, "self-loop ignored");
            return Ok(false);
        }

        let mut added = false;
        if let Some(source) = self.data_mut(from) {
            if !source.out_nodes.contains(&to) {
                source.out_nodes.push(to);
                added = true;
            }
        }
        if let Some(target) = self.data_mut(to) {
            if !target.in_nodes.contains(&from) {
                target.in_nodes.push(from);
            }
        }

        trace!(%from, %to, added, "link");
        Ok(added)
    }

    /// Remove the edge `from -> to` if there is one
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if an edge was removed
    ///
    /// # Errors
    ///
    /// - [`GraphError::ForeignNode`] if either node belongs to another graph
    /// - [`GraphError::NodeNotFound`] if either node was removed
    pub fn unlink(&mut self, from: NodeKey, to: NodeKey) -> GraphResult<bool> {
        self.data(from)?;
        self.data(to)?;

        let mut removed = false;
        if let Some(source) = self.data_mut(from) {
            let before = source.out_nodes.len();
            source.out_nodes.retain(|key| *key != to);
            removed = source.out_nodes.len() != before;
        }
        if let Some(target) = self.data_mut(to) {
            target.in_nodes.retain(|key| *key != from);
        }

        trace!(%from, %to, removed, "unlink");
        Ok(removed)
    }

    /// Remove a node and every edge touching it
    ///
    /// The id becomes free for a new node and the slot is recycled. The key
    /// of the removed node is dead: every later use of it reports
    /// [`GraphError::NodeNotFound`], even once the slot holds a new node.
    ///
    /// # Errors
    ///
    /// - [`GraphError::ForeignNode`] if the key belongs to another graph
    /// - [`GraphError::NodeNotFound`] if the node was already removed
    pub fn remove(&mut self, key: NodeKey) -> GraphResult<()> {
        self.data(key)?;
        let Entry { data, prev, next } = self
            .slots
            .get_mut(key.slot)
            .and_then(|cell| {
                cell.generation = cell.generation.wrapping_add(1);
                cell.entry.take()
            })
            .ok_or_else(|| GraphError::node_not_found(key.to_string()))?;
        self.free.push(key.slot);

        match prev.and_then(|prev| self.entry_mut(prev)) {
            Some(before) => before.next = next,
            None => self.head = next,
        }
        match next.and_then(|next| self.entry_mut(next)) {
            Some(after) => after.prev = prev,
            None => self.tail = prev,
        }

        for predecessor in &data.in_nodes {
            if let Some(node) = self.data_mut(*predecessor) {
                node.out_nodes.retain(|k| *k != key);
            }
        }
        for successor in &data.out_nodes {
            if let Some(node) = self.data_mut(*successor) {
                node.in_nodes.retain(|k| *k != key);
            }
        }

        self.index.remove(&data.id);
        debug!(node = %data.id, %key, "node removed");
        Ok(())
    }

    /// Remove the node with this id
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if no node has this id.
    pub fn remove_id(&mut self, id: &str) -> GraphResult<()> {
        let key = self.key(id)?;
        self.remove(key)
    }

    /// View of a live node of this graph, `None` otherwise.
    pub(crate) fn resolve(&self, key: NodeKey) -> Option<Node<'_>> {
        self.data(key).ok().map(|data| Node::new(self, key, data))
    }

    fn data(&self, key: NodeKey) -> GraphResult<&NodeData> {
        if key.graph != self.token {
            return Err(GraphError::foreign_node(key.to_string()));
        }
        self.slots
            .get(key.slot)
            .filter(|cell| cell.generation == key.generation)
            .and_then(|cell| cell.entry.as_ref())
            .map(|entry| &entry.data)
            .ok_or_else(|| GraphError::node_not_found(key.to_string()))
    }

    fn data_mut(&mut self, key: NodeKey) -> Option<&mut NodeData> {
        self.slots
            .get_mut(key.slot)
            .filter(|cell| cell.generation == key.generation)
            .and_then(|cell| cell.entry.as_mut())
            .map(|entry| &mut entry.data)
    }

    fn entry_mut(&mut self, slot: usize) -> Option<&mut Entry> {
        self.slots.get_mut(slot).and_then(|cell| cell.entry.as_mut())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the live nodes of a graph in insertion order.
#[derive(Debug, Clone)]
pub struct Nodes<'g> {
    graph: &'g Graph,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'g> Iterator for Nodes<'g> {
    type Item = Node<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        let slot = self.cursor?;
        let cell = graph.slots.get(slot)?;
        let entry = cell.entry.as_ref()?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        let key = NodeKey {
            graph: graph.token,
            slot,
            generation: cell.generation,
        };
        Some(Node::new(graph, key, &entry.data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Nodes<'_> {}

impl FusedIterator for Nodes<'_> {}

impl<'g> IntoIterator for &'g Graph {
    type Item = Node<'g>;
    type IntoIter = Nodes<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    fn ids<'g>(nodes: impl Iterator<Item = Node<'g>>) -> Vec<&'g str> {
        nodes.map(|node| node.id()).collect()
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_duplicate_node_fails() -> GraphResult<()> {
        let mut graph = Graph::new();
        graph.add_node("a")?;

        match graph.add_node("a") {
            Err(GraphError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("Expected DuplicateId, got {other:?}"),
        }
        assert_eq!(graph.len(), 1);
        Ok(())
    }

    #[test]
    fn test_lookup_missing_id_fails() {
        let graph = Graph::new();
        assert!(matches!(graph.get("nope"), Err(GraphError::NodeNotFound(_))));
        assert!(graph.find("nope").is_none());
        assert!(!graph.contains("nope"));
    }

    #[test]
    fn test_link_records_both_directions() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;

        assert!(graph.link(a, b)?);

        assert_eq!(ids(graph.node(a)?.out_nodes()), vec!["b"]);
        assert_eq!(ids(graph.node(b)?.in_nodes()), vec!["a"]);
        assert_eq!(graph.edge_count(), 1);
        Ok(())
    }

    #[test]
    fn test_link_is_idempotent() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;

        graph.link(a, b)?;
        assert!(!graph.link(a, b)?);

        assert_eq!(graph.node(a)?.out_degree(), 1);
        assert_eq!(graph.node(b)?.in_degree(), 1);
        Ok(())
    }

    #[test]
    fn test_self_loop_is_ignored() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;

        assert!(!graph.link(a, a)?);

        let node = graph.node(a)?;
        assert_eq!(node.out_degree(), 0);
        assert_eq!(node.in_degree(), 0);
        Ok(())
    }

    #[test]
    fn test_link_across_graphs_fails() -> GraphResult<()> {
        let mut left = Graph::new();
        let mut right = Graph::new();
        let a = left.add_node("a")?;
        let b = right.add_node("b")?;

        assert!(matches!(left.link(a, b), Err(GraphError::CrossGraphLink { .. })));
        assert!(matches!(right.link(b, a), Err(GraphError::CrossGraphLink { .. })));
        assert_eq!(left.edge_count(), 0);
        assert_eq!(right.edge_count(), 0);
        Ok(())
    }

    #[test]
    fn test_link_foreign_pair_fails() -> GraphResult<()> {
        let mut left = Graph::new();
        let mut right = Graph::new();
        let a = right.add_node("a")?;
        let b = right.add_node("b")?;

        assert!(matches!(left.link(a, b), Err(GraphError::ForeignNode(_))));
        assert!(left.node(a).is_err());
        Ok(())
    }

    #[test]
    fn test_unlink_removes_edge() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;
        graph.link(a, b)?;
        graph.link(b, a)?;

        assert!(graph.unlink(a, b)?);
        assert!(!graph.unlink(a, b)?);

        assert_eq!(graph.node(a)?.out_degree(), 0);
        assert_eq!(ids(graph.node(a)?.in_nodes()), vec!["b"]);
        assert_eq!(graph.node(b)?.in_degree(), 0);
        Ok(())
    }

    #[test]
    fn test_remove_severs_neighbors() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;
        let c = graph.add_node("c")?;
        graph.link(a, b)?;
        graph.link(b, c)?;

        graph.remove(b)?;

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.node(a)?.out_degree(), 0);
        assert_eq!(graph.node(c)?.in_degree(), 0);
        assert!(!graph.contains("b"));
        assert!(matches!(graph.node(b), Err(GraphError::NodeNotFound(_))));
        assert!(matches!(graph.link(a, b), Err(GraphError::NodeNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_removed_id_can_be_reused() -> GraphResult<()> {
        let mut graph = Graph::new();
        let old = graph.add_node("a")?;
        graph.add_node("b")?;
        graph.remove_id("a")?;

        let new = graph.add_node("a")?;

        assert_ne!(old, new);
        assert!(!graph.contains_key(old));
        assert!(graph.contains_key(new));
        assert_eq!(ids(graph.nodes()), vec!["b", "a"]);
        Ok(())
    }

    #[test]
    fn test_nodes_iterate_in_insertion_order() -> GraphResult<()> {
        let mut graph = Graph::new();
        for id in ["d", "b", "a", "c"] {
            graph.add_node(id)?;
        }

        assert_eq!(ids(graph.nodes()), vec!["d", "b", "a", "c"]);
        assert_eq!(ids((&graph).into_iter()), vec!["d", "b", "a", "c"]);
        Ok(())
    }

    #[test]
    fn test_edges_iterator() -> GraphResult<()> {
        let mut graph = Graph::new();
        let a = graph.add_node("a")?;
        let b = graph.add_node("b")?;
        let c = graph.add_node("c")?;
        graph.link(a, c)?;
        graph.link(a, b)?;
        graph.link(c, b)?;

        let edges: Vec<(&str, &str)> = graph.edges().map(|(u, v)| (u.id(), v.id())).collect();
        assert_eq!(edges, vec![("a", "c"), ("a", "b"), ("c", "b")]);
        Ok(())
    }

    #[test]
    fn test_add_remove_churn_reuses_slots() -> GraphResult<()> {
        let mut graph = Graph::new();
        let first = graph.add_node("n")?;
        graph.remove(first)?;

        let mut last = first;
        for _ in 0..10_000 {
            last = graph.add_node("n")?;
            graph.remove(last)?;
        }
        let current = graph.add_node("n")?;

        assert_eq!(graph.slots.len(), 1);
        assert_eq!(current.slot, first.slot);
        assert_ne!(current, first);
        assert_ne!(current, last);
        assert!(matches!(graph.node(first), Err(GraphError::NodeNotFound(_))));
        assert!(matches!(graph.node(last), Err(GraphError::NodeNotFound(_))));
        assert_eq!(graph.node(current)?.id(), "n");
        Ok(())
    }

    #[test]
    fn test_reused_slot_keeps_insertion_order() -> GraphResult<()> {
        let mut graph = Graph::new();
        graph.add_node("a")?;
        let b = graph.add_node("b")?;
        graph.add_node("c")?;
        graph.remove(b)?;

        let d = graph.add_node("d")?;

        assert_eq!(d.slot, b.slot);
        assert_eq!(ids(graph.nodes()), vec!["a", "c", "d"]);
        assert_eq!(graph.nodes().len(), 3);
        assert!(matches!(graph.link(d, b), Err(GraphError::NodeNotFound(_))));
        Ok(())
    }
}
