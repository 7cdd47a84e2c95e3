//! # hippo
//!
//! Command-line driver for `hippo-graph`: reads an edge list, runs one
//! traversal or analysis and prints the result as text or JSON.
//!
//! The graph library is re-exported as [`graph`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub use hippo_graph as graph;

pub mod cli;
pub mod commands;
