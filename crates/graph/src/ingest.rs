//! Edge-list ingestion.
//!
//! One edge per line, `FROM TO`, split on whitespace or on a configured
//! separator. Nodes are created the first time an id appears, so insertion
//! order follows first appearance in the input.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::adapters::Linkable;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Where reading stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfInput {
    /// Read to the end of the stream. Blank lines are skipped.
    #[default]
    Eof,
    /// Stop at the first blank line, for interactive input.
    BlankLine,
}

/// Options for [`EdgeListReader`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator; `None` splits on runs of whitespace.
    pub separator: Option<String>,
    /// Maximum number of edges to read.
    pub limit: Option<usize>,
    pub end_of_input: EndOfInput,
}

impl ReadOptions {
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_end_of_input(mut self, end_of_input: EndOfInput) -> Self {
        self.end_of_input = end_of_input;
        self
    }
}

/// Reads edge lists into any [`Linkable`] graph.
#[derive(Debug, Clone, Default)]
pub struct EdgeListReader {
    options: ReadOptions,
}

impl EdgeListReader {
    #[must_use]
    pub const fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read edges from `input` into `graph`, returning the number of edge
    /// lines consumed
    ///
    /// Lines already linked still count; the graph ignores the duplicate.
    ///
    /// # Errors
    ///
    /// - [`GraphError::Parse`] for a line without exactly two non-empty ids
    /// - [`GraphError::Io`] if reading fails
    pub fn read_into<G, R>(&self, graph: &mut G, input: R) -> GraphResult<usize>
    where
        G: Linkable + ?Sized,
        R: BufRead,
    {
        let mut edges = 0_usize;
        for (index, line) in input.lines().enumerate() {
            if self.options.limit.is_some_and(|limit| edges >= limit) {
                break;
            }
            let line = line?;
            let line_no = index.saturating_add(1);
            if line.trim().is_empty() {
                match self.options.end_of_input {
                    EndOfInput::BlankLine => break,
                    EndOfInput::Eof => continue,
                }
            }

            let (from, to) = self.split(&line, line_no)?;
            let from = graph.key_or_insert(from)?;
            let to = graph.key_or_insert(to)?;
            graph.link(from, to)?;
            trace!(line = line_no, %from, %to, "edge read");
            edges = edges.saturating_add(1);
        }

        debug!(edges, nodes = graph.graph().len(), "edge list read");
        Ok(edges)
    }

    fn split<'l>(&self, line: &'l str, line_no: usize) -> GraphResult<(&'l str, &'l str)> {
        let parts: Vec<&str> = match self.options.separator.as_deref() {
            Some(separator) => line.split(separator).map(str::trim).collect(),
            None => line.split_whitespace().collect(),
        };

        match parts.as_slice() {
            [from, to] if !from.is_empty() && !to.is_empty() => Ok((*from, *to)),
            [_, _] => Err(GraphError::parse(line_no, "empty node id")),
            _ => Err(GraphError::parse(
                line_no,
                format!("expected 2 ids, found {}", parts.len()),
            )),
        }
    }
}

impl Graph {
    /// Build a directed graph from an edge list
    ///
    /// # Examples
    ///
    /// ```
    /// use hippo_graph::{Graph, GraphResult, ReadOptions};
    ///
    /// # fn main() -> GraphResult<()> {
    /// let graph = Graph::read_edge_list("a b\nb c\n".as_bytes(), ReadOptions::default())?;
    /// assert_eq!(graph.len(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// See [`EdgeListReader::read_into`].
    pub fn read_edge_list(input: impl BufRead, options: ReadOptions) -> GraphResult<Self> {
        let mut graph = Self::new();
        EdgeListReader::new(options).read_into(&mut graph, input)?;
        Ok(graph)
    }
}
