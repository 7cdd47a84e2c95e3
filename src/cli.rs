//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// hippo - directed graph analysis from edge lists
#[derive(Parser, Debug)]
#[command(name = "hippo")]
#[command(version)]
#[command(about = "Traverse and analyse graphs read from edge lists")]
#[command(
    long_about = "hippo reads one edge per line (FROM TO) from a file or stdin and runs \
                  traversals, cycle detection, topological ordering and component analysis on it."
)]
pub struct Cli {
    /// Edge list file; stdin when omitted
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Field separator; whitespace when omitted
    #[arg(short, long, global = true)]
    pub separator: Option<String>,

    /// Read at most this many edges
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Stop reading at the first blank line
    #[arg(long, global = true, default_value_t = false)]
    pub stop_at_blank: bool,

    /// Mirror every edge
    #[arg(short, long, global = true, default_value_t = false)]
    pub undirected: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every node with its outgoing and incoming neighbours
    Show,

    /// Depth-first post-order from a root
    Dfs {
        /// Id of the root node
        root: String,

        /// Follow incoming edges
        #[arg(short, long, default_value_t = false)]
        reverse: bool,
    },

    /// Breadth-first layers from a root
    Bfs {
        /// Id of the root node
        root: String,

        /// Do not expand nodes at this distance
        #[arg(short, long)]
        max_depth: Option<usize>,

        /// Follow incoming edges
        #[arg(short, long, default_value_t = false)]
        reverse: bool,
    },

    /// Topological order
    Topo {
        /// Emit the reverse order
        #[arg(short, long, default_value_t = false)]
        reverse: bool,
    },

    /// Strongly connected components
    Scc,

    /// Report whether the graph has a cycle
    Cycle {
        /// Count parent edges and cross edges too
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Root of the graph if it is a single rooted tree
    TreeRoot,

    /// Connected components (requires --undirected)
    Components,
}
