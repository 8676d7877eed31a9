// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! # pipgen - Pipeline Generator
//!
//! `pipgen` resolves a library of CI job definitions into a dependency-ordered
//! pipeline description.
//!
//! Jobs declare their inputs as `get` steps and outputs as `put` steps; a
//! `passed` list on a get step names the upstream jobs that must run first.
//! Given a set of root jobs, pipgen pulls in every transitively required job,
//! rejects self and circular dependencies, orders the jobs topologically and
//! collects the resources they reference.
//!
//! ## Quick Start
//!
//! ```bash
//! # Resolve the jobs needed by 'deploy' and print the pipeline
//! pipgen resolve pipeline.yml --job deploy
//!
//! # Show the dependency graph
//! pipgen graph pipeline.yml --format dot
//! ```

pub mod cli;
pub mod errors;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use errors::{PipgenError, PipgenResult};
pub use pipeline::{JobDefinition, PipelineManifest, PipelineResolver, ResolvedPipeline};
