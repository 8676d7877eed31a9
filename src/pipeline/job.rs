// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Job definitions
//!
//! Turns a raw job record (`{name, plan?}`) into a typed [`JobDefinition`]:
//! its get steps, put steps, and the jobs named in `passed` lists.

use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

use crate::errors::{PipgenError, PipgenResult};

/// Kind of plan step the core cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Get,
    Put,
}

impl StepKind {
    fn key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A get or put step from a job plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,

    /// The step's own name, which is also its resource reference
    pub name: String,

    /// Upstream jobs named in `passed` (get steps only)
    pub passed: Vec<String>,
}

/// A typed job parsed from a raw record
#[derive(Debug, Clone)]
pub struct JobDefinition {
    name: String,
    get_steps: Vec<Step>,
    put_steps: Vec<Step>,
    depends_on: Vec<String>,
    record: Mapping,
}

impl JobDefinition {
    /// Parse a job from its raw record
    pub fn from_record(record: Mapping) -> PipgenResult<Self> {
        if record.is_empty() {
            return Err(PipgenError::EmptyDefinition);
        }

        let name = match record.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(_) => {
                return Err(invalid("'name' must be a non-empty string".into()));
            }
            None => return Err(invalid("record has no 'name'".into())),
        };

        let mut job = Self {
            name,
            get_steps: Vec::new(),
            put_steps: Vec::new(),
            depends_on: Vec::new(),
            record,
        };

        let steps = match job.record.get("plan") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(plan)) => parse_plan(&job.name, plan)?,
            Some(_) => {
                return Err(invalid(format!("job '{}': 'plan' must be a list", job.name)));
            }
        };

        let mut seen = HashSet::new();
        for step in steps {
            for upstream in &step.passed {
                if seen.insert(upstream.clone()) {
                    job.depends_on.push(upstream.clone());
                }
            }
            match step.kind {
                StepKind::Get => job.get_steps.push(step),
                StepKind::Put => job.put_steps.push(step),
            }
        }

        Ok(job)
    }

    /// Build a job from a name alone (no plan)
    pub fn named(name: impl Into<String>) -> PipgenResult<Self> {
        let mut record = Mapping::new();
        record.insert("name".into(), Value::String(name.into()));
        Self::from_record(record)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_steps(&self) -> &[Step] {
        &self.get_steps
    }

    pub fn put_steps(&self) -> &[Step] {
        &self.put_steps
    }

    /// Upstream job names, deduplicated in first-seen order
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// The raw record this job was parsed from
    pub fn record(&self) -> &Mapping {
        &self.record
    }

    /// Resource names referenced by this job: gets first, then puts
    pub fn required_resources(&self) -> impl Iterator<Item = &str> {
        self.get_steps
            .iter()
            .chain(self.put_steps.iter())
            .map(|step| step.name.as_str())
    }
}

impl std::fmt::Display for JobDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

fn invalid(reason: String) -> PipgenError {
    PipgenError::InvalidJob { reason }
}

/// Classify plan items, flattening aggregates one level deep in place
fn parse_plan(job: &str, plan: &[Value]) -> PipgenResult<Vec<Step>> {
    let mut steps = Vec::new();

    for item in plan {
        let Value::Mapping(item) = item else {
            return Err(invalid(format!("job '{}': plan items must be mappings", job)));
        };

        match item.get("aggregate") {
            Some(Value::Sequence(inner)) => {
                for inner in inner {
                    let Value::Mapping(inner) = inner else {
                        return Err(invalid(format!(
                            "job '{}': aggregate items must be mappings",
                            job
                        )));
                    };
                    if inner.contains_key("aggregate") {
                        tracing::debug!(job, "ignoring nested aggregate");
                        continue;
                    }
                    steps.extend(parse_step(job, inner)?);
                }
            }
            Some(_) => {
                return Err(invalid(format!("job '{}': 'aggregate' must be a list", job)));
            }
            None => steps.extend(parse_step(job, item)?),
        }
    }

    Ok(steps)
}

/// Classify a single step; anything that is neither a get nor a put yields `None`
fn parse_step(job: &str, item: &Mapping) -> PipgenResult<Option<Step>> {
    for kind in [StepKind::Get, StepKind::Put] {
        let Some(value) = item.get(kind.key()) else {
            continue;
        };
        let Value::String(name) = value else {
            return Err(invalid(format!(
                "job '{}': '{}' step name must be a string",
                job, kind
            )));
        };

        let passed = match (kind, item.get("passed")) {
            (StepKind::Get, Some(Value::Sequence(passed))) => passed
                .iter()
                .map(|upstream| match upstream {
                    Value::String(upstream) => Ok(upstream.clone()),
                    _ => Err(invalid(format!(
                        "job '{}': 'passed' entries of get '{}' must be strings",
                        job, name
                    ))),
                })
                .collect::<PipgenResult<Vec<_>>>()?,
            (StepKind::Get, Some(Value::Null) | None) | (StepKind::Put, _) => Vec::new(),
            (StepKind::Get, Some(_)) => {
                return Err(invalid(format!(
                    "job '{}': 'passed' of get '{}' must be a list",
                    job, name
                )));
            }
        };

        return Ok(Some(Step {
            kind,
            name: name.clone(),
            passed,
        }));
    }

    Ok(None)
}
