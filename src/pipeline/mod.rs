// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Pipeline resolution engine
//!
//! Parses job and resource records, builds the dependency graph of the jobs a
//! pipeline needs, and orders them so every job follows its upstream jobs.

mod builder;
mod dag;
mod job;
mod library;
mod manifest;
mod resolver;
mod resource;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::GraphBuilder;
pub use dag::{DependencyGraph, GraphNode};
pub use job::{JobDefinition, Step, StepKind};
pub use library::{JobLibrary, JobRef};
pub use manifest::PipelineManifest;
pub use resolver::{required_resources, PipelineResolver, ResolutionState, ResolvedPipeline};
pub use resource::{ResourceDefinition, ResourceLibrary};
