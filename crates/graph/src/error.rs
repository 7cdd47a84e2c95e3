//! Graph error types

use thiserror::Error;

/// Errors raised by graph construction, mutation and search bookkeeping.
///
/// Self-loops and repeated links are not errors; they are absorbed as no-ops.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node already exists: {0}")]
    DuplicateId(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("cannot link nodes from different graphs: {from} -> {to}")]
    CrossGraphLink { from: String, to: String },

    #[error("node {0} does not belong to this graph")]
    ForeignNode(String),

    #[error("search node for {0} is the root of its search and has no parent")]
    MissingParent(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound(id.into())
    }

    pub fn cross_graph_link(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::CrossGraphLink {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn foreign_node(node: impl Into<String>) -> Self {
        Self::ForeignNode(node.into())
    }

    pub fn missing_parent(id: impl Into<String>) -> Self {
        Self::MissingParent(id.into())
    }

    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;
