// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Graph construction from root jobs
//!
//! Resolves each root and everything reachable through `passed` lists into
//! graph nodes. Discovery order is a pre-order walk: a root, then its
//! dependencies depth-first, then the next root.

use crate::errors::{PipgenError, PipgenResult};
use crate::pipeline::{DependencyGraph, GraphNode, JobDefinition, JobLibrary, JobRef};

/// Builds a [`DependencyGraph`] from roots and a job library
pub struct GraphBuilder<'a> {
    library: &'a JobLibrary,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(library: &'a JobLibrary) -> Self {
        Self { library }
    }

    /// Add `roots` and their transitive dependencies to `dag`
    ///
    /// Jobs already present in `dag` are skipped, which collapses diamond
    /// dependencies into a single node.
    pub fn build(&self, roots: &[JobRef], dag: &mut DependencyGraph) -> PipgenResult<()> {
        // Pending jobs, popped from the end; pushed reversed to keep pre-order
        let mut pending: Vec<&'a JobDefinition> = Vec::with_capacity(roots.len());
        for root in roots.iter().rev() {
            pending.push(self.library.resolve(root)?);
        }

        while let Some(job) = pending.pop() {
            if dag.contains(job.name()) {
                tracing::debug!(job = job.name(), "already in graph, skipping");
                continue;
            }

            let dependencies = self.resolve_dependencies(job)?;
            let depends_on = dependencies.iter().map(|d| d.name().to_string()).collect();
            dag.insert(GraphNode::new(job.clone(), depends_on));
            tracing::debug!(
                job = job.name(),
                dependencies = dependencies.len(),
                "added job to graph"
            );

            pending.extend(dependencies.into_iter().rev());
        }

        Ok(())
    }

    /// Resolve the jobs named in `job`'s `passed` lists
    fn resolve_dependencies(&self, job: &JobDefinition) -> PipgenResult<Vec<&'a JobDefinition>> {
        job.depends_on()
            .iter()
            .map(|name| {
                if name == job.name() {
                    return Err(PipgenError::SelfDependency {
                        name: name.clone(),
                    });
                }
                self.library
                    .get(name)
                    .ok_or_else(|| PipgenError::missing_dependency(name, job.name()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::{get, job, job_after, library};

    fn build(roots: &[&str], library: &JobLibrary) -> PipgenResult<DependencyGraph> {
        let roots: Vec<JobRef> = roots.iter().map(|r| JobRef::from(*r)).collect();
        let mut dag = DependencyGraph::new();
        GraphBuilder::new(library).build(&roots, &mut dag)?;
        Ok(dag)
    }

    #[test]
    fn test_single_root_without_dependencies() {
        let library = library(vec![job("jobA", vec![]), job("unused", vec![])]);
        let dag = build(&["jobA"], &library).unwrap();

        assert_eq!(dag.names(), vec!["jobA"]);
    }

    #[test]
    fn test_discovery_is_pre_order() {
        let library = library(vec![
            job_after("root0", &["mid", "side"]),
            job_after("mid", &["leaf"]),
            job("leaf", vec![]),
            job("side", vec![]),
            job_after("root1", &["other"]),
            job("other", vec![]),
        ]);

        let dag = build(&["root0", "root1"], &library).unwrap();
        assert_eq!(
            dag.names(),
            vec!["root0", "mid", "leaf", "side", "root1", "other"]
        );
    }

    #[test]
    fn test_diamond_collapses_to_one_node() {
        let library = library(vec![
            job_after("top", &["left", "right"]),
            job_after("left", &["base"]),
            job_after("right", &["base"]),
            job("base", vec![get("repo")]),
        ]);

        let dag = build(&["top"], &library).unwrap();
        assert_eq!(dag.len(), 4);
        assert_eq!(dag.names(), vec!["top", "left", "base", "right"]);
    }

    #[test]
    fn test_repeated_roots_are_idempotent() {
        let library = library(vec![job_after("b", &["a"]), job("a", vec![])]);
        let dag = build(&["b", "a", "b"], &library).unwrap();

        assert_eq!(dag.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_root_by_reference() {
        let library = library(vec![job_after("b", &["a"]), job("a", vec![])]);
        // The reference carries no plan; the library entry is used instead
        let roots = vec![JobRef::from(job("b", vec![]))];

        let mut dag = DependencyGraph::new();
        GraphBuilder::new(&library).build(&roots, &mut dag).unwrap();
        assert_eq!(dag.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_root() {
        let library = library(vec![job("job0", vec![])]);
        let err = build(&["job1"], &library).unwrap_err();

        assert_eq!(err.to_string(), "Missing job 'job1'");
    }

    #[test]
    fn test_missing_dependency() {
        let library = library(vec![job_after("job1", &["job0"])]);
        let err = build(&["job1"], &library).unwrap_err();

        assert!(matches!(
            err,
            PipgenError::MissingJob { ref name, dependent: Some(ref dependent) }
                if name == "job0" && dependent == "job1"
        ));
    }

    #[test]
    fn test_self_dependency() {
        let library = library(vec![job_after("job0", &["job0"])]);
        let err = build(&["job0"], &library).unwrap_err();

        assert!(matches!(err, PipgenError::SelfDependency { name } if name == "job0"));
    }

    #[test]
    fn test_cycle_terminates() {
        let library = library(vec![
            job_after("job0", &["job1"]),
            job_after("job1", &["job2"]),
            job_after("job2", &["job0"]),
        ]);

        let dag = build(&["job0"], &library).unwrap();
        assert_eq!(dag.names(), vec!["job0", "job1", "job2"]);
    }
}
