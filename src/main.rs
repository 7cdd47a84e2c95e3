//! # hippo
//!
//! Entry point: parse flags, install tracing, run one command.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see
//! mutations and analysis summaries. Reports go to stdout.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hippo::cli::Cli;
use hippo::commands::execute_command;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command(&cli, &mut out)?;
    out.flush().context("failed to flush stdout")
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
