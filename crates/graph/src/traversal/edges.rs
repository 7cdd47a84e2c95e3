//! DFS edge classification.

use std::borrow::BorrowMut;
use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;

use super::StackFrame;
use crate::node::{Direction, Node, NodeKey};
use crate::search::SearchNode;

/// Classification of an edge `u -> v` at the moment DFS explores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// `v` was unseen; the edge joins the DFS tree.
    Tree,
    /// `v` is in progress and is the DFS parent of `u`.
    TrivialBack,
    /// `v` is in progress further up the DFS stack; the edge closes a cycle.
    Back,
    /// `v` is finished, in this or an earlier DFS tree.
    Cross,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tree => "tree",
            Self::TrivialBack => "trivial-back",
            Self::Back => "back",
            Self::Cross => "cross",
        })
    }
}

/// DFS state of a node. Nodes absent from [`Marks`] are unseen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// On the active DFS stack.
    InProgress,
    /// All outgoing edges explored.
    Finished,
}

/// Per-node DFS marks shared by [`EdgesIter`] walks.
pub type Marks = HashMap<NodeKey, Mark>;

/// DFS pass yielding `(EdgeType, SearchNode)` for every explored edge.
///
/// The search node is the edge's target; its parent is the source.
pub struct EdgesIter<'g, M = Marks>
where
    M: BorrowMut<Marks>,
{
    direction: Direction,
    stack: Vec<StackFrame<'g>>,
    marks: M,
}

impl<'g, M: BorrowMut<Marks>> EdgesIter<'g, M> {
    fn new(root: Node<'g>, direction: Direction, mut marks: M) -> Self {
        let mut stack = Vec::new();
        let seen = marks.borrow_mut();
        if !seen.contains_key(&root.key()) {
            seen.insert(root.key(), Mark::InProgress);
            stack.push(StackFrame::new(SearchNode::root(root)));
        }
        Self {
            direction,
            stack,
            marks,
        }
    }
}

impl<'g, M: BorrowMut<Marks>> Iterator for EdgesIter<'g, M> {
    type Item = (EdgeType, SearchNode<'g>);

    fn next(&mut self) -> Option<Self::Item> {
        let marks = self.marks.borrow_mut();
        loop {
            let frame = self.stack.last_mut()?;
            let Some(next) = frame.advance(self.direction) else {
                if let Some(done) = self.stack.pop() {
                    marks.insert(done.search.node().key(), Mark::Finished);
                }
                continue;
            };

            let kind = match marks.get(&next.key()) {
                None => EdgeType::Tree,
                Some(Mark::InProgress) => {
                    let from_parent = frame
                        .search
                        .parent()
                        .is_ok_and(|parent| parent.node() == next);
                    if from_parent {
                        EdgeType::TrivialBack
                    } else {
                        EdgeType::Back
                    }
                }
                Some(Mark::Finished) => EdgeType::Cross,
            };

            let search = frame.search.next(next);
            if kind == EdgeType::Tree {
                marks.insert(next.key(), Mark::InProgress);
                self.stack.push(StackFrame::new(search.clone()));
            }
            return Some((kind, search));
        }
    }
}

impl<M: BorrowMut<Marks>> FusedIterator for EdgesIter<'_, M> {}

impl<'g> Node<'g> {
    /// Classify every edge explored by a DFS from this node
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::{Direction, EdgeType, Graph, GraphResult};
    ///
    /// # fn main() -> GraphResult<()> {
    /// let mut graph = Graph::new();
    /// let a = graph.add_node("a")?;
    /// let b = graph.add_node("b")?;
    /// graph.link(a, b)?;
    /// graph.link(b, a)?;
    ///
    /// let kinds: Vec<EdgeType> = graph
    ///     .node(a)?
    ///     .edges_iter(Direction::Forward)
    ///     .map(|(kind, _)| kind)
    ///     .collect();
    /// assert_eq!(kinds, vec![EdgeType::Tree, EdgeType::TrivialBack]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn edges_iter(self, direction: Direction) -> EdgesIter<'g> {
        EdgesIter::new(self, direction, Marks::new())
    }

    /// Like [`Node::edges_iter`] with caller-owned marks, so that several
    /// walks classify edges against each other. Empty if `self` is marked.
    pub fn edges_iter_with<'m>(
        self,
        direction: Direction,
        marks: &'m mut Marks,
    ) -> EdgesIter<'g, &'m mut Marks> {
        EdgesIter::new(self, direction, marks)
    }
}
