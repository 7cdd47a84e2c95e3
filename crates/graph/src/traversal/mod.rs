//! Single-source traversals.
//!
//! All traversals are explicit-state iterators: a stack or queue of
//! [`SearchNode`]s plus a visitation map. Nothing is computed until the
//! iterator is polled, and dropping it early leaves no state behind.
//!
//! # Algorithms
//!
//! - **DFS**: post-order walk, children before the node itself
//! - **BFS**: queue walk with optional depth limit, grouped into layers
//! - **Edge classification**: DFS pass tagging every explored edge

mod bfs;
mod dfs;
mod edges;

use std::collections::HashSet;

use crate::node::{Direction, Node, NodeKey};
use crate::search::SearchNode;

pub use self::bfs::{BfsLayers, BfsPath};
pub use self::dfs::{Dfs, DfsPath};
pub(crate) use self::dfs::DfsState;
pub use self::edges::{EdgeType, EdgesIter, Mark, Marks};

/// Set of nodes already reached by a traversal.
///
/// Passing the same set to several walks makes them skip each other's nodes.
pub type Visited = HashSet<NodeKey>;

/// A node on an explicit DFS stack and the position of its next neighbor.
struct StackFrame<'g> {
    search: SearchNode<'g>,
    cursor: usize,
}

impl<'g> StackFrame<'g> {
    fn new(search: SearchNode<'g>) -> Self {
        Self { search, cursor: 0 }
    }

    /// Next unexplored neighbor, advancing the cursor.
    fn advance(&mut self, direction: Direction) -> Option<Node<'g>> {
        let next = self.search.node().neighbor_at(direction, self.cursor)?;
        self.cursor = self.cursor.saturating_add(1);
        Some(next)
    }
}
