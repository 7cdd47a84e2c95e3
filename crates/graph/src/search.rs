//! Search records with parent links for path reconstruction.

use std::fmt;
use std::rc::Rc;

use crate::error::{GraphError, GraphResult};
use crate::node::Node;

/// A node reached by a single-source search.
///
/// Holds the node, its distance from the search root and the record that
/// discovered it. Records are immutable and cheap to clone; the parent links
/// form a shared singly linked list back to the root.
#[derive(Clone)]
pub struct SearchNode<'g>(Rc<Frame<'g>>);

struct Frame<'g> {
    node: Node<'g>,
    dist: usize,
    parent: Option<SearchNode<'g>>,
}

// Unlink the chain iteratively so that dropping the tail of a very deep
// search does not recurse once per ancestor.
impl Drop for Frame<'_> {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(search) = next {
            next = match Rc::try_unwrap(search.0) {
                Ok(mut frame) => frame.parent.take(),
                Err(_) => None,
            };
        }
    }
}

impl<'g> SearchNode<'g> {
    /// Record for the root of a search, at distance 0.
    #[must_use]
    pub fn root(node: Node<'g>) -> Self {
        Self::with_parent(node, 0, None)
    }

    fn with_parent(node: Node<'g>, dist: usize, parent: Option<SearchNode<'g>>) -> Self {
        Self(Rc::new(Frame { node, dist, parent }))
    }

    #[must_use]
    pub fn node(&self) -> Node<'g> {
        self.0.node
    }

    /// Number of edges between the search root and this node.
    #[must_use]
    pub fn dist(&self) -> usize {
        self.0.dist
    }

    /// The record that discovered this one
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingParent`] for the root of a search.
    pub fn parent(&self) -> GraphResult<&SearchNode<'g>> {
        self.0
            .parent
            .as_ref()
            .ok_or_else(|| GraphError::missing_parent(self.node().id()))
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Record for `node` discovered from this one, `added_distance` further.
    #[must_use]
    pub fn next_node(&self, node: Node<'g>, added_distance: usize) -> Self {
        Self::with_parent(
            node,
            self.dist().saturating_add(added_distance),
            Some(self.clone()),
        )
    }

    /// Record for `node` one edge further.
    #[must_use]
    pub fn next(&self, node: Node<'g>) -> Self {
        self.next_node(node, 1)
    }

    /// This record followed by its parent, grandparent and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &SearchNode<'g>> {
        std::iter::successors(Some(self), |search| search.0.parent.as_ref())
    }

    /// Nodes on the path from the search root to this node.
    #[must_use]
    pub fn path(&self) -> Vec<Node<'g>> {
        let mut path: Vec<Node<'g>> = self.ancestors().map(SearchNode::node).collect();
        path.reverse();
        path
    }

    /// Records on the path from the search root to this node.
    ///
    /// Like [`SearchNode::path`] but keeps the distance of every step.
    #[must_use]
    pub fn path_as_search_nodes(&self) -> Vec<SearchNode<'g>> {
        let mut path: Vec<SearchNode<'g>> = self.ancestors().cloned().collect();
        path.reverse();
        path
    }
}

impl fmt::Debug for SearchNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchNode({}, {})", self.dist(), self.node().id())
    }
}
