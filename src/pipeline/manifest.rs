// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Pipeline manifest loading and rendering
//!
//! A manifest is a YAML file carrying the job library, an optional resource
//! library and optional root job names:
//!
//! ```yaml
//! roots: [deploy]
//! resources:
//!   - name: repo
//!     type: git
//! jobs:
//!   - name: deploy
//!     plan:
//!       - get: repo
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::path::Path;

use crate::errors::{PipgenError, PipgenResult};
use crate::pipeline::{
    JobDefinition, PipelineResolver, ResolvedPipeline, ResourceDefinition, ResourceLibrary,
};

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    roots: Option<Vec<String>>,

    #[serde(default)]
    resources: Option<Vec<Mapping>>,

    #[serde(default)]
    jobs: Option<Vec<Mapping>>,
}

/// Parsed pipeline manifest
#[derive(Debug, Clone, Default)]
pub struct PipelineManifest {
    /// Root job names declared in the manifest
    pub roots: Option<Vec<String>>,

    /// Job library, in file order
    pub jobs: Option<Vec<JobDefinition>>,

    /// Resource library; `None` when the manifest has no `resources` key
    pub resources: Option<ResourceLibrary>,
}

impl PipelineManifest {
    /// Load a manifest from a YAML file
    pub fn from_file(path: &Path) -> PipgenResult<Self> {
        if !path.exists() {
            return Err(PipgenError::PipelineNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PipgenError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> PipgenResult<Self> {
        let raw: RawManifest = serde_yaml::from_str(yaml)?;

        let jobs = raw
            .jobs
            .map(|jobs| {
                jobs.into_iter()
                    .map(JobDefinition::from_record)
                    .collect::<PipgenResult<Vec<_>>>()
            })
            .transpose()?;

        let resources = raw
            .resources
            .map(|resources| {
                resources
                    .into_iter()
                    .map(ResourceDefinition::from_record)
                    .collect::<PipgenResult<Vec<_>>>()
                    .and_then(ResourceLibrary::new)
            })
            .transpose()?;

        tracing::debug!(
            jobs = jobs.as_ref().map_or(0, Vec::len),
            resources = resources.as_ref().map_or(0, ResourceLibrary::len),
            "loaded manifest"
        );

        Ok(Self {
            roots: raw.roots,
            jobs,
            resources,
        })
    }

    /// Resolve this manifest, with `roots` overriding the declared roots when non-empty
    pub fn resolve(self, roots: &[String]) -> PipgenResult<ResolvedPipeline> {
        let mut resolver = PipelineResolver::new();

        let roots = if roots.is_empty() {
            self.roots
        } else {
            Some(roots.to_vec())
        };
        if let Some(roots) = roots {
            resolver = resolver.jobs(roots);
        }
        if let Some(jobs) = self.jobs {
            resolver = resolver.library(jobs);
        }
        if let Some(resources) = self.resources {
            resolver = resolver.resources(resources);
        }

        resolver.resolve()
    }
}

/// Output document: resources, then jobs in dependency order
#[derive(Debug, Serialize)]
struct RenderedPipeline<'a> {
    resources: Vec<&'a Mapping>,
    jobs: Vec<&'a Mapping>,
}

impl<'a> From<&'a ResolvedPipeline> for RenderedPipeline<'a> {
    fn from(resolved: &'a ResolvedPipeline) -> Self {
        Self {
            resources: resolved.resources().iter().map(|r| r.record()).collect(),
            jobs: resolved.jobs().iter().map(|j| j.record()).collect(),
        }
    }
}

impl ResolvedPipeline {
    /// Render as a pipeline YAML document
    pub fn to_yaml(&self) -> PipgenResult<String> {
        serde_yaml::to_string(&RenderedPipeline::from(self)).map_err(Into::into)
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> PipgenResult<String> {
        serde_json::to_string_pretty(&RenderedPipeline::from(self)).map_err(Into::into)
    }

    /// Numbered job order followed by the resource list
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, job) in self.jobs().iter().enumerate() {
            out.push_str(&format!("{}. {}", i + 1, job.name()));
            if !job.depends_on().is_empty() {
                out.push_str(&format!(" [depends: {}]", job.depends_on().join(", ")));
            }
            out.push('\n');
        }

        if !self.resources().is_empty() {
            out.push_str(&format!("resources: {}\n", self.resource_names().join(", ")));
        }

        out
    }
}
