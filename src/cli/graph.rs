// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Graph command - visualize the resolved jobs as a graph

use miette::Result;
use std::path::PathBuf;

use super::{load_manifest, GraphFormat};

/// Run the graph command
pub fn run(
    pipeline_path: PathBuf,
    jobs: Vec<String>,
    format: GraphFormat,
    _verbose: bool,
) -> Result<()> {
    let resolved = load_manifest(&pipeline_path)?.resolve(&jobs)?;
    let graph = resolved.graph();

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    print!("{}", output);

    Ok(())
}
