// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! pipgen - Pipeline Generator
//!
//! Resolve CI job libraries into dependency-ordered pipeline descriptions.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipgen::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; rendered pipelines go to stdout, so logs use stderr
    let default_filter = if cli.verbose { "pipgen=debug" } else { "pipgen=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Resolve {
            pipeline,
            jobs,
            format,
            output,
        } => pipgen::cli::resolve::run(pipeline, jobs, format, output, cli.verbose),
        Commands::Graph {
            pipeline,
            jobs,
            format,
        } => pipgen::cli::graph::run(pipeline, jobs, format, cli.verbose),
        Commands::Jobs { pipeline } => pipgen::cli::jobs::run(pipeline, cli.verbose),
    }
}
