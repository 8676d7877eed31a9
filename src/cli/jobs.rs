// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Jobs command - list the job library

use miette::Result;
use std::path::PathBuf;

use super::load_manifest;
use crate::pipeline::JobLibrary;
use crate::utils::{bold, code, dimmed};

/// Run the jobs command
pub fn run(pipeline_path: PathBuf, verbose: bool) -> Result<()> {
    let manifest = load_manifest(&pipeline_path)?;
    let jobs = manifest.jobs.unwrap_or_default();
    if jobs.is_empty() {
        println!("{}", dimmed("No jobs defined"));
        return Ok(());
    }
    let library = JobLibrary::new(jobs)?;

    println!("{}", bold(&format!("Loaded jobs ({}):", library.len())));
    for job in library.jobs() {
        if job.depends_on().is_empty() {
            println!("  {}", code(job.name()));
        } else {
            println!(
                "  {}: \t[{}]",
                code(job.name()),
                job.depends_on().join(", ")
            );
        }

        if verbose {
            let resources: Vec<_> = job.required_resources().collect();
            if !resources.is_empty() {
                println!("    {}", dimmed(&format!("resources: {}", resources.join(", "))));
            }
        }
    }

    Ok(())
}
