//! # hippo-graph
//!
//! In-memory directed graphs of uniquely named nodes, with lazy traversals
//! and the classic whole-graph analyses built on them.
//!
//! - [`Graph`] owns the nodes; [`NodeKey`] handles address them and
//!   [`Node`] views read them
//! - DFS, BFS and DFS edge classification in [`traversal`], all
//!   reconstructing paths through [`SearchNode`] parent links
//! - cycle detection, topological order, tree-root detection and strongly
//!   connected components on [`Graph`]
//! - [`Undirected`] and [`Weighted`] adapters over the [`Linkable`]
//!   capability
//! - edge-list ingestion through [`EdgeListReader`]
//!
//! ```
//! use hippo_graph::{Direction, Graph, GraphResult};
//!
//! # fn main() -> GraphResult<()> {
//! let mut graph = Graph::new();
//! let a = graph.add_node("a")?;
//! let b = graph.add_node("b")?;
//! let c = graph.add_node("c")?;
//! graph.link(a, b)?;
//! graph.link(b, c)?;
//!
//! let order: Vec<&str> = graph
//!     .topological_order(Direction::Forward)
//!     .map(|node| node.id())
//!     .collect();
//! assert_eq!(order, vec!["a", "b", "c"]);
//! assert!(!graph.has_cycle());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod adapters;
pub mod analysis;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod node;
pub mod search;
pub mod traversal;

pub use adapters::{ConnectedComponents, DEFAULT_WEIGHT, Linkable, Undirected, Weighted};
pub use analysis::{CyclePolicy, StronglyConnectedComponents, TopologicalOrder};
pub use error::{GraphError, GraphResult};
pub use graph::{Graph, Nodes};
pub use ingest::{EdgeListReader, EndOfInput, ReadOptions};
pub use node::{Direction, GraphId, Node, NodeKey};
pub use search::SearchNode;
pub use traversal::{BfsLayers, BfsPath, Dfs, DfsPath, EdgeType, EdgesIter, Mark, Marks, Visited};
