//! CLI command handlers.
//!
//! Every command reads the edge list once, runs one analysis and renders a
//! [`Report`] as text or JSON. Handlers never print directly; output goes to
//! the writer passed in, so tests can capture it.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use hippo_graph::{
    CyclePolicy, Direction, EdgeListReader, EndOfInput, Graph, Linkable, Node, ReadOptions,
    SearchNode, Undirected,
};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, OutputFormat};

/// Usage errors detected after argument parsing.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{0}` needs an undirected graph; pass --undirected")]
    RequiresUndirected(&'static str),
}

/// Graph as loaded from the input, keeping the adapter when one was asked for.
#[derive(Debug)]
pub enum LoadedGraph {
    Directed(Graph),
    Undirected(Undirected),
}

impl LoadedGraph {
    #[must_use]
    pub fn graph(&self) -> &Graph {
        match self {
            Self::Directed(graph) => graph,
            Self::Undirected(graph) => graph.graph(),
        }
    }
}

/// Execute the parsed command line, writing the report to `out`.
///
/// # Errors
///
/// Fails if the input cannot be read or parsed, if a root id is unknown, or
/// if the command does not apply to the loaded graph.
pub fn execute_command(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let loaded = load_graph(cli)?;
    let report = run(&cli.command, &loaded)?;
    write_report(&report, cli.format, out)
}

/// Read the graph described by the input flags.
///
/// # Errors
///
/// Fails if the input file cannot be opened or the edge list is malformed.
pub fn load_graph(cli: &Cli) -> Result<LoadedGraph> {
    let reader = EdgeListReader::new(read_options(cli));
    match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_graph(&reader, BufReader::new(file), cli.undirected)
                .with_context(|| format!("failed to read edge list from {}", path.display()))
        }
        None => read_graph(&reader, io::stdin().lock(), cli.undirected)
            .context("failed to read edge list from stdin"),
    }
}

fn read_options(cli: &Cli) -> ReadOptions {
    let options = ReadOptions::default().with_end_of_input(if cli.stop_at_blank {
        EndOfInput::BlankLine
    } else {
        EndOfInput::Eof
    });
    let options = match &cli.separator {
        Some(separator) => options.with_separator(separator.clone()),
        None => options,
    };
    match cli.limit {
        Some(limit) => options.with_limit(limit),
        None => options,
    }
}

fn read_graph(
    reader: &EdgeListReader,
    input: impl BufRead,
    undirected: bool,
) -> hippo_graph::GraphResult<LoadedGraph> {
    if undirected {
        let mut graph: Undirected = Undirected::default();
        let edges = reader.read_into(&mut graph, input)?;
        info!(edges, nodes = graph.graph().len(), "undirected graph loaded");
        Ok(LoadedGraph::Undirected(graph))
    } else {
        let mut graph = Graph::new();
        let edges = reader.read_into(&mut graph, input)?;
        info!(edges, nodes = graph.len(), "graph loaded");
        Ok(LoadedGraph::Directed(graph))
    }
}

/// Run one command against a loaded graph.
///
/// # Errors
///
/// Fails if a root id is unknown or the command needs an undirected graph.
pub fn run(command: &Commands, loaded: &LoadedGraph) -> Result<Report> {
    let graph = loaded.graph();
    debug!(?command, nodes = graph.len(), "running command");

    let report = match command {
        Commands::Show => Report::Show {
            nodes: show(graph),
        },
        Commands::Dfs { root, reverse } => {
            let root = graph.get(root).context("unknown DFS root")?;
            let visits = root
                .dfs_path(Direction::from_reverse_flag(*reverse))
                .map(|search| Visit::from(&search))
                .collect();
            Report::Dfs { visits }
        }
        Commands::Bfs {
            root,
            max_depth,
            reverse,
        } => {
            let root = graph.get(root).context("unknown BFS root")?;
            let visits = root.bfs_path(*max_depth, Direction::from_reverse_flag(*reverse));
            // BFS yields nodes in non-decreasing distance, so runs are layers
            let by_dist = visits.chunk_by(SearchNode::dist);
            let layers = by_dist
                .into_iter()
                .map(|(_, layer)| layer.map(|search| Visit::from(&search)).collect())
                .collect();
            Report::Bfs { layers }
        }
        Commands::Topo { reverse } => Report::Topo {
            order: ids(graph.topological_order(Direction::from_reverse_flag(*reverse))),
        },
        Commands::Scc => Report::Scc {
            components: graph.strongly_connected_components().map(ids).collect(),
        },
        Commands::Cycle { strict } => {
            let (policy, has_cycle) = match loaded {
                LoadedGraph::Undirected(graph) if !strict => ("undirected", graph.has_cycle()),
                _ if *strict => ("strict", graph.has_cycle_with(CyclePolicy::strict())),
                _ => ("directed", graph.has_cycle()),
            };
            Report::Cycle { has_cycle, policy }
        }
        Commands::TreeRoot => Report::TreeRoot {
            root: graph.tree_root().map(|node| node.id().to_string()),
        },
        Commands::Components => match loaded {
            LoadedGraph::Undirected(graph) => Report::Components {
                components: graph.connected_components().map(ids).collect(),
            },
            LoadedGraph::Directed(_) => {
                return Err(CommandError::RequiresUndirected("components").into());
            }
        },
    };
    Ok(report)
}

fn ids<'g>(nodes: impl IntoIterator<Item = Node<'g>>) -> Vec<String> {
    nodes.into_iter().map(|node| node.id().to_string()).collect()
}

fn show(graph: &Graph) -> Vec<Adjacency> {
    graph
        .nodes()
        .map(|node| Adjacency {
            id: node.id().to_string(),
            out_nodes: ids(node.out_nodes()),
            in_nodes: ids(node.in_nodes()),
        })
        .collect()
}

/// Outgoing and incoming neighbours of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    pub id: String,
    #[serde(rename = "out")]
    pub out_nodes: Vec<String>,
    #[serde(rename = "in")]
    pub in_nodes: Vec<String>,
}

/// A node reached by a traversal, with its path from the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub id: String,
    pub dist: usize,
    pub path: Vec<String>,
}

impl From<&SearchNode<'_>> for Visit {
    fn from(search: &SearchNode<'_>) -> Self {
        Self {
            id: search.node().id().to_string(),
            dist: search.dist(),
            path: ids(search.path()),
        }
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Report {
    Show { nodes: Vec<Adjacency> },
    Dfs { visits: Vec<Visit> },
    Bfs { layers: Vec<Vec<Visit>> },
    Topo { order: Vec<String> },
    Scc { components: Vec<Vec<String>> },
    Cycle { has_cycle: bool, policy: &'static str },
    TreeRoot { root: Option<String> },
    Components { components: Vec<Vec<String>> },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show { nodes } => nodes.iter().try_for_each(|node| {
                writeln!(f, "Node {}:", node.id)?;
                writeln!(f, "Out: [{}]", node.out_nodes.iter().join(", "))?;
                writeln!(f, "In: [{}]", node.in_nodes.iter().join(", "))
            }),
            Self::Dfs { visits } => visits.iter().try_for_each(|visit| write_visit(f, visit)),
            Self::Bfs { layers } => layers.iter().enumerate().try_for_each(|(depth, layer)| {
                writeln!(f, "layer {depth}: {}", layer.iter().map(|visit| &visit.id).join(" "))
            }),
            Self::Topo { order } => writeln!(f, "{}", order.iter().join(" ")),
            Self::Scc { components } | Self::Components { components } => components
                .iter()
                .try_for_each(|component| writeln!(f, "{{{}}}", component.iter().join(", "))),
            Self::Cycle { has_cycle, policy } => {
                let verdict = if *has_cycle { "cyclic" } else { "acyclic" };
                writeln!(f, "{verdict} ({policy})")
            }
            Self::TreeRoot { root } => match root {
                Some(root) => writeln!(f, "{root}"),
                None => writeln!(f, "not a tree"),
            },
        }
    }
}

fn write_visit(f: &mut fmt::Formatter<'_>, visit: &Visit) -> fmt::Result {
    writeln!(f, "{} {} ({})", visit.dist, visit.id, visit.path.iter().join(" -> "))
}

/// Render `report` in `format`.
///
/// # Errors
///
/// Fails if serialization or writing fails.
pub fn write_report(report: &Report, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{report}").context("failed to write report")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("failed to serialize report")?;
            writeln!(out).context("failed to write report")?;
        }
    }
    Ok(())
}
