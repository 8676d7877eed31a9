// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Pipeline resolution
//!
//! Drives one resolution from validated inputs to an ordered job list and the
//! set of resources those jobs require. Each stage either advances the
//! resolver or fails the whole call; nothing partial is returned.

use std::collections::HashSet;

use crate::errors::{PipgenError, PipgenResult};
use crate::pipeline::{
    DependencyGraph, GraphBuilder, GraphNode, JobDefinition, JobLibrary, JobRef,
    ResourceDefinition, ResourceLibrary,
};

/// Stages a resolution passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Empty,
    Validating,
    GraphBuilt,
    Acyclic,
    Ordered,
    ResourcesResolved,
    Failed,
}

impl std::fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Validating => write!(f, "validating"),
            Self::GraphBuilt => write!(f, "graph-built"),
            Self::Acyclic => write!(f, "acyclic"),
            Self::Ordered => write!(f, "ordered"),
            Self::ResourcesResolved => write!(f, "resources-resolved"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Build-and-resolve entry point
///
/// ```no_run
/// use pipgen::pipeline::{JobDefinition, PipelineResolver};
///
/// let build = JobDefinition::named("build")?;
/// let resolved = PipelineResolver::new()
///     .job("build")
///     .library(vec![build])
///     .resolve()?;
/// assert_eq!(resolved.job_names(), vec!["build"]);
/// # Ok::<(), pipgen::PipgenError>(())
/// ```
#[derive(Debug, Default)]
pub struct PipelineResolver {
    roots: Option<Vec<JobRef>>,
    library: Option<Vec<JobDefinition>>,
    resources: Option<ResourceLibrary>,
}

impl PipelineResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one root job
    pub fn job(mut self, job: impl Into<JobRef>) -> Self {
        self.roots.get_or_insert_with(Vec::new).push(job.into());
        self
    }

    /// Add root jobs; an empty list still counts as supplied
    pub fn jobs<I, J>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: Into<JobRef>,
    {
        self.roots
            .get_or_insert_with(Vec::new)
            .extend(jobs.into_iter().map(Into::into));
        self
    }

    /// Set the job library
    pub fn library(mut self, library: Vec<JobDefinition>) -> Self {
        self.library = Some(library);
        self
    }

    /// Set the resource library; without one, resource aggregation is skipped
    pub fn resources(mut self, resources: ResourceLibrary) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Run the resolution
    pub fn resolve(self) -> PipgenResult<ResolvedPipeline> {
        let mut state = ResolutionState::Empty;
        let result = self.run(&mut state);
        if let Err(err) = &result {
            tracing::debug!(failed_in = %state, error = %err, "resolution failed");
            advance(&mut state, ResolutionState::Failed);
        }
        result
    }

    fn run(self, state: &mut ResolutionState) -> PipgenResult<ResolvedPipeline> {
        advance(state, ResolutionState::Validating);
        let (roots, library) = validate(self.roots, self.library)?;
        let library = JobLibrary::new(library)?;

        let mut graph = DependencyGraph::new();
        GraphBuilder::new(&library).build(&roots, &mut graph)?;
        graph.assign_dependents()?;
        advance(state, ResolutionState::GraphBuilt);

        if let Some(jobs) = graph.find_cycle() {
            return Err(PipgenError::CircularDependency { jobs });
        }
        advance(state, ResolutionState::Acyclic);

        let order = graph.topological_order()?;
        advance(state, ResolutionState::Ordered);

        let resources = match &self.resources {
            Some(resources) => required_resources(&order, resources)?,
            None => Vec::new(),
        };
        advance(state, ResolutionState::ResourcesResolved);

        let jobs: Vec<JobDefinition> = order.iter().map(|node| node.job().clone()).collect();
        tracing::info!(
            jobs = jobs.len(),
            resources = resources.len(),
            "pipeline resolved"
        );

        Ok(ResolvedPipeline {
            jobs,
            resources,
            graph,
        })
    }
}

fn advance(state: &mut ResolutionState, next: ResolutionState) {
    tracing::debug!(from = %state, to = %next, "resolution state");
    *state = next;
}

/// Check the presence rules for roots and library
fn validate(
    roots: Option<Vec<JobRef>>,
    library: Option<Vec<JobDefinition>>,
) -> PipgenResult<(Vec<JobRef>, Vec<JobDefinition>)> {
    match (roots, library) {
        (None, None) => Err(PipgenError::EmptyPipelineDefinition),
        (_, Some(library)) if library.is_empty() => Err(PipgenError::EmptyJobLibrary),
        (None, _) => Err(PipgenError::EmptyJobList),
        (Some(roots), _) if roots.is_empty() => Err(PipgenError::EmptyJobList),
        (Some(_), None) => Err(PipgenError::EmptyJobLibrary),
        (Some(roots), Some(library)) => Ok((roots, library)),
    }
}

/// Resources required by `order`, deduplicated by name in first-seen order
pub fn required_resources(
    order: &[&GraphNode],
    library: &ResourceLibrary,
) -> PipgenResult<Vec<ResourceDefinition>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for node in order {
        for name in node.job().required_resources() {
            let resource = library
                .get(name)
                .ok_or_else(|| PipgenError::MissingResource {
                    resource: name.to_string(),
                    job: node.name().to_string(),
                })?;
            if seen.insert(resource.name()) {
                out.push(resource.clone());
            }
        }
    }

    Ok(out)
}

/// Outcome of a successful resolution
#[derive(Debug)]
pub struct ResolvedPipeline {
    jobs: Vec<JobDefinition>,
    resources: Vec<ResourceDefinition>,
    graph: DependencyGraph,
}

impl ResolvedPipeline {
    /// Jobs in dependency order
    pub fn jobs(&self) -> &[JobDefinition] {
        &self.jobs
    }

    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(JobDefinition::name).collect()
    }

    /// Required resources in first-seen order
    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(ResourceDefinition::name).collect()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}
