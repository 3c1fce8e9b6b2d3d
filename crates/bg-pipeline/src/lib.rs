//! bg-pipeline: external-tool simulation pipeline.
//!
//! Drives four independent executables (mesh conversion, mesh
//! preprocessing, boundary-layer meshing, flow solving) through a fixed
//! DAG with file handoffs, timeouts, polling-based convergence checks
//! and explicit cleanup of shared working directories.

pub mod convergence;
pub mod pipeline;
pub mod supervise;
pub mod tools;

pub use convergence::{ForceSample, convergence_metric, export_csv, parse_efforts};
pub use pipeline::{Pipeline, PipelineOptions};
pub use supervise::{PollOutcome, Progress, SupervisedProcess, poll_with_timeout};
pub use tools::{ToolPaths, WorkDir};

use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mesh error: {0}")]
    Mesh(#[from] bg_mesh::MeshError),

    #[error("Could not launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code:?}")]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("No results yet in {dir}")]
    NoResultsYet { dir: PathBuf },

    #[error("Missing artifact: {path} (run the earlier stage or disable reuse)")]
    MissingArtifact { path: PathBuf },

    #[error("Run aborted: {what}")]
    Aborted { what: String },
}
