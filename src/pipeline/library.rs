// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Job library and job references

use std::collections::HashMap;

use crate::errors::{PipgenError, PipgenResult};
use crate::pipeline::JobDefinition;

/// A job named either by object or by bare name
///
/// Both forms resolve through [`JobLibrary::resolve`]; a by-reference job
/// contributes only its name, the library entry is canonical.
#[derive(Debug, Clone)]
pub enum JobRef {
    ByReference(JobDefinition),
    ByName(String),
}

impl JobRef {
    pub fn name(&self) -> &str {
        match self {
            Self::ByReference(job) => job.name(),
            Self::ByName(name) => name,
        }
    }
}

impl From<JobDefinition> for JobRef {
    fn from(job: JobDefinition) -> Self {
        Self::ByReference(job)
    }
}

impl From<&str> for JobRef {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for JobRef {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

/// Complete, name-unique catalog of jobs
#[derive(Debug, Clone, Default)]
pub struct JobLibrary {
    jobs: Vec<JobDefinition>,
    by_name: HashMap<String, usize>,
}

impl JobLibrary {
    /// Build a library, rejecting duplicate job names
    pub fn new(jobs: Vec<JobDefinition>) -> PipgenResult<Self> {
        let mut by_name = HashMap::with_capacity(jobs.len());
        for (idx, job) in jobs.iter().enumerate() {
            if by_name.insert(job.name().to_string(), idx).is_some() {
                return Err(PipgenError::DuplicateJob {
                    name: job.name().to_string(),
                });
            }
        }
        Ok(Self { jobs, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&JobDefinition> {
        self.by_name.get(name).map(|&idx| &self.jobs[idx])
    }

    /// Resolve a root reference to its canonical library entry
    pub fn resolve(&self, job: &JobRef) -> PipgenResult<&JobDefinition> {
        self.get(job.name())
            .ok_or_else(|| PipgenError::missing_root(job.name()))
    }

    pub fn jobs(&self) -> &[JobDefinition] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
