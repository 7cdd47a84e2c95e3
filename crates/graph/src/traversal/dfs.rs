//! Depth-first search with path reconstruction.
//!
//! Iterative walk with an explicit stack. A node is yielded after all nodes
//! reachable through it have been yielded (post-order), which is the order
//! topological sorting and SCC extraction rely on.

use std::borrow::BorrowMut;
use std::iter::FusedIterator;

use super::{StackFrame, Visited};
use crate::node::{Direction, Node};
use crate::search::SearchNode;

/// Explicit DFS stack, independent of where the visited set lives.
pub(crate) struct DfsState<'g> {
    direction: Direction,
    stack: Vec<StackFrame<'g>>,
}

impl<'g> DfsState<'g> {
    pub(crate) const fn new(direction: Direction) -> Self {
        Self {
            direction,
            stack: Vec::new(),
        }
    }

    /// Push `root` unless it was already visited.
    pub(crate) fn start(&mut self, root: SearchNode<'g>, visited: &mut Visited) {
        if visited.insert(root.node().key()) {
            self.stack.push(StackFrame::new(root));
        }
    }

    /// Run until the next node finishes.
    pub(crate) fn next_finished(&mut self, visited: &mut Visited) -> Option<SearchNode<'g>> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.advance(self.direction) {
                Some(next) => {
                    if visited.insert(next.key()) {
                        let child = frame.search.next(next);
                        self.stack.push(StackFrame::new(child));
                    }
                }
                None => return self.stack.pop().map(|frame| frame.search),
            }
        }
    }
}

/// Post-order DFS yielding [`SearchNode`]s.
///
/// The visited set is either owned (an independent walk) or borrowed as
/// `&mut Visited` so that several walks share it.
pub struct DfsPath<'g, V = Visited>
where
    V: BorrowMut<Visited>,
{
    state: DfsState<'g>,
    visited: V,
}

impl<'g, V: BorrowMut<Visited>> DfsPath<'g, V> {
    pub(crate) fn new(root: Node<'g>, direction: Direction, mut visited: V) -> Self {
        let mut state = DfsState::new(direction);
        state.start(SearchNode::root(root), visited.borrow_mut());
        Self { state, visited }
    }
}

impl<'g, V: BorrowMut<Visited>> Iterator for DfsPath<'g, V> {
    type Item = SearchNode<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.next_finished(self.visited.borrow_mut())
    }
}

impl<V: BorrowMut<Visited>> FusedIterator for DfsPath<'_, V> {}

/// Post-order DFS yielding plain nodes; see [`DfsPath`].
pub struct Dfs<'g, V = Visited>
where
    V: BorrowMut<Visited>,
{
    inner: DfsPath<'g, V>,
}

impl<'g, V: BorrowMut<Visited>> Iterator for Dfs<'g, V> {
    type Item = Node<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|search| search.node())
    }
}

impl<V: BorrowMut<Visited>> FusedIterator for Dfs<'_, V> {}

impl<'g> Node<'g> {
    /// Depth-first search with path reconstruction
    ///
    /// Yields every node reachable from `self` as a [`SearchNode`], children
    /// before their parent; the last item is the root at distance 0.
    /// `Direction::Reverse` searches the inverse graph.
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
    /// graph.link(a, b)?;
    ///
    /// let order: Vec<_> = graph.node(a)?.dfs_path(Direction::Forward).collect();
    /// assert_eq!(order[0].node().id(), "b");
    /// assert_eq!(order[0].path().len(), 2);
    /// assert!(order[1].is_root());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn dfs_path(self, direction: Direction) -> DfsPath<'g> {
        DfsPath::new(self, direction, Visited::new())
    }

    /// Like [`Node::dfs_path`] but skips, and records into, a caller-owned
    /// visited set. Empty if `self` is already in `visited`.
    pub fn dfs_path_with<'v>(
        self,
        direction: Direction,
        visited: &'v mut Visited,
    ) -> DfsPath<'g, &'v mut Visited> {
        DfsPath::new(self, direction, visited)
    }

    /// Post-order DFS yielding nodes only.
    #[must_use]
    pub fn dfs(self, direction: Direction) -> Dfs<'g> {
        Dfs {
            inner: self.dfs_path(direction),
        }
    }

    /// Post-order DFS yielding nodes only, sharing `visited`.
    pub fn dfs_with<'v>(
        self,
        direction: Direction,
        visited: &'v mut Visited,
    ) -> Dfs<'g, &'v mut Visited> {
        Dfs {
            inner: self.dfs_path_with(direction, visited),
        }
    }
}
