// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for pipgen.

pub mod graph;
pub mod jobs;
pub mod resolve;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineManifest;

/// Pipeline generator
///
/// Resolve a job library into a dependency-ordered pipeline.
#[derive(Parser, Debug)]
#[clap(
    name = "pipgen",
    version,
    about = "Resolve CI job libraries into dependency-ordered pipelines",
    long_about = None,
    after_help = "Examples:\n\
        pipgen resolve -j deploy            Print the pipeline needed by 'deploy'\n\
        pipgen graph -f dot                 Show the dependency graph as DOT\n\
        pipgen jobs                         List jobs and their dependencies\n\n\
        See 'pipgen <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve root jobs and render the pipeline
    Resolve {
        /// Pipeline manifest
        #[clap(default_value = "pipeline.yml", env = "PIPGEN_PIPELINE")]
        pipeline: PathBuf,

        /// Root jobs (overrides the manifest's 'roots')
        #[clap(short, long = "job", value_name = "NAME")]
        jobs: Vec<String>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = ResolveFormat::Yaml)]
        format: ResolveFormat,

        /// Write to a file instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved dependency graph
    Graph {
        /// Pipeline manifest
        #[clap(default_value = "pipeline.yml", env = "PIPGEN_PIPELINE")]
        pipeline: PathBuf,

        /// Root jobs (overrides the manifest's 'roots')
        #[clap(short, long = "job", value_name = "NAME")]
        jobs: Vec<String>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// List the jobs in the library with their dependencies
    Jobs {
        /// Pipeline manifest
        #[clap(default_value = "pipeline.yml", env = "PIPGEN_PIPELINE")]
        pipeline: PathBuf,
    },
}

/// Output format for the resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveFormat {
    Yaml,
    Json,
    Text,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

/// Load a manifest, wrapping failures with the file name
fn load_manifest(path: &Path) -> miette::Result<PipelineManifest> {
    PipelineManifest::from_file(path).map_err(|e| {
        miette::Report::new(e).wrap_err(format!("Failed to load pipeline '{}'", path.display()))
    })
}
