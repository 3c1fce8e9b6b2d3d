//! bg-mesh: gmsh adapter for 2D airfoil section meshes.

pub mod generator;
pub mod geo;

pub use generator::{GEO_FILE_NAME, MeshGenerator, MeshStage};
pub use geo::airfoil_geo;

use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] bg_core::BgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code:?}")]
    ToolFailed { tool: String, code: Option<i32> },
}
