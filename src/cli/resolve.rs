// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Resolve command - render the dependency-ordered pipeline

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use super::{load_manifest, ResolveFormat};
use crate::utils::{bold, dimmed, print_success};

/// Run the resolve command
pub fn run(
    pipeline_path: PathBuf,
    jobs: Vec<String>,
    format: ResolveFormat,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let resolved = load_manifest(&pipeline_path)?.resolve(&jobs)?;

    let rendered = match format {
        ResolveFormat::Yaml => resolved.to_yaml()?,
        ResolveFormat::Json => resolved.to_json()?,
        ResolveFormat::Text => resolved.to_text(),
    };

    if verbose {
        eprintln!("{}", bold("Job order:"));
        for (i, name) in resolved.job_names().iter().enumerate() {
            eprintln!("  {}. {}", i + 1, name);
        }
        eprintln!(
            "{}",
            dimmed(&format!("{} resources required", resolved.resources().len()))
        );
    }

    match output {
        Some(path) => {
            std::fs::write(&path, rendered).into_diagnostic()?;
            print_success(&format!("Wrote pipeline to {}", path.display()));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
