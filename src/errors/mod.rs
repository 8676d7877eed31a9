// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Error types for pipeline resolution
//!
//! Every resolution failure is terminal for the call that produced it. The
//! variants carry the job and resource names needed to build a precise
//! message; rendering is left to miette.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipgen operations
pub type PipgenResult<T> = Result<T, PipgenError>;

/// Main error type for pipgen
#[derive(Error, Debug, Diagnostic)]
pub enum PipgenError {
    // ─────────────────────────────────────────────────────────────────────────
    // Job Definition Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Empty job definition")]
    #[diagnostic(
        code(pipgen::empty_definition),
        help("A job record needs at least a 'name' field")
    )]
    EmptyDefinition,

    #[error("Invalid job definition: {reason}")]
    #[diagnostic(code(pipgen::invalid_job))]
    InvalidJob { reason: String },

    #[error("Invalid resource definition: {reason}")]
    #[diagnostic(code(pipgen::invalid_resource))]
    InvalidResource { reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Definition Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Empty pipeline definition")]
    #[diagnostic(
        code(pipgen::empty_pipeline_definition),
        help("Provide root jobs and a job library")
    )]
    EmptyPipelineDefinition,

    #[error("Empty job list")]
    #[diagnostic(
        code(pipgen::empty_job_list),
        help("Name at least one root job, e.g. with '--job <NAME>' or a 'roots' list")
    )]
    EmptyJobList,

    #[error("Empty job library")]
    #[diagnostic(
        code(pipgen::empty_job_library),
        help("The pipeline manifest needs a non-empty 'jobs' list")
    )]
    EmptyJobLibrary,

    #[error("Duplicate job '{name}' in job library")]
    #[diagnostic(
        code(pipgen::duplicate_job),
        help("Job names must be unique within a library")
    )]
    DuplicateJob { name: String },

    #[error("Duplicate resource '{name}' in resource library")]
    #[diagnostic(
        code(pipgen::duplicate_resource),
        help("Resource names must be unique within a library")
    )]
    DuplicateResource { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("{}", missing_job_message(.name, .dependent))]
    #[diagnostic(
        code(pipgen::missing_job),
        help("Check that '{name}' is defined in the job library")
    )]
    MissingJob {
        name: String,
        dependent: Option<String>,
    },

    #[error("Job '{name}' depends on itself")]
    #[diagnostic(
        code(pipgen::self_dependency),
        help("Remove '{name}' from its own 'passed' lists")
    )]
    SelfDependency { name: String },

    #[error("Circular dependency detected: {}", .jobs.join(" -> "))]
    #[diagnostic(
        code(pipgen::circular_dependency),
        help("Review the 'passed' lists of these jobs to remove the cycle")
    )]
    CircularDependency { jobs: Vec<String> },

    #[error("Resource '{resource}' required by job '{job}' is not defined")]
    #[diagnostic(
        code(pipgen::missing_resource),
        help("Add a resource named '{resource}' to the 'resources' list")
    )]
    MissingResource { resource: String, job: String },

    #[error("Could not find node with name '{name}' in dependency graph")]
    #[diagnostic(code(pipgen::dangling_edge))]
    DanglingEdge { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline file not found: {path}")]
    #[diagnostic(
        code(pipgen::pipeline_not_found),
        help("Pass a manifest path or set PIPGEN_PIPELINE")
    )]
    PipelineNotFound { path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(pipgen::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(pipgen::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(pipgen::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(pipgen::json_error))]
    Json { message: String },
}

fn missing_job_message(name: &str, dependent: &Option<String>) -> String {
    match dependent {
        Some(dependent) => format!("Job '{}' depends on missing job '{}'", dependent, name),
        None => format!("Missing job '{}'", name),
    }
}

impl From<std::io::Error> for PipgenError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for PipgenError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for PipgenError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl PipgenError {
    /// Missing root job named explicitly by the caller
    pub fn missing_root(name: &str) -> Self {
        Self::MissingJob {
            name: name.to_string(),
            dependent: None,
        }
    }

    /// Missing job discovered through another job's `passed` list
    pub fn missing_dependency(name: &str, dependent: &str) -> Self {
        Self::MissingJob {
            name: name.to_string(),
            dependent: Some(dependent.to_string()),
        }
    }
}
