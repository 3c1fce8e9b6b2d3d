//! External tool locations and shared working directories.
//!
//! The external tools keep global mutable state in their own
//! directories; there is no project isolation. Clearing them is modeled
//! as an explicit operation with a timestamp so cross-run contamination
//! stays visible instead of hiding inside constructors.

use crate::PipelineResult;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(windows)]
const MTC_EXE: &str = "mtc.exe";
#[cfg(not(windows))]
const MTC_EXE: &str = "mtc";

/// Launcher script convention shared by the boundary-layer and solver
/// tools.
pub const LAUNCHER_NAME: &str = "LANCER.bat";
/// Boundary-layer tool: input mesh name and output directory.
pub const BOUNDARY_INPUT_NAME: &str = "naca.t";
pub const BOUNDARY_OUTPUT_DIR: &str = "Output";
/// Boundary-layer tool sizing-parameter file: box height then box width.
pub const BOUNDARY_BOX_FILE: &str = "box.dat";
/// Solver result table, relative to the solver directory.
pub const EFFORTS_RELATIVE: &str = "resultats/capteurs/Efforts.txt";

/// Locations of the four external tools plus the results destination.
#[derive(Clone, Debug)]
pub struct ToolPaths {
    /// Directory containing the mtc preprocessor executable.
    pub mtc_dir: PathBuf,
    /// The gmsh-to-mtc converter script.
    pub gmsh2mtc_path: PathBuf,
    /// Boundary-layer mesh generator working directory.
    pub boundary_layer_dir: PathBuf,
    /// Flow solver working directory.
    pub solver_dir: PathBuf,
    /// Where exported result CSVs land.
    pub results_dir: PathBuf,
}

impl ToolPaths {
    pub fn mtc_exe(&self) -> PathBuf {
        self.mtc_dir.join(MTC_EXE)
    }

    pub fn boundary_launcher(&self) -> PathBuf {
        self.boundary_layer_dir.join(LAUNCHER_NAME)
    }

    pub fn boundary_output_dir(&self) -> PathBuf {
        self.boundary_layer_dir.join(BOUNDARY_OUTPUT_DIR)
    }

    pub fn boundary_box_file(&self) -> PathBuf {
        self.boundary_layer_dir.join(BOUNDARY_BOX_FILE)
    }

    pub fn solver_launcher(&self) -> PathBuf {
        self.solver_dir.join(LAUNCHER_NAME)
    }

    pub fn efforts_path(&self) -> PathBuf {
        self.solver_dir.join(EFFORTS_RELATIVE)
    }
}

/// A working directory with explicit, timestamped clearing.
#[derive(Clone, Debug)]
pub struct WorkDir {
    path: PathBuf,
    last_cleared: Option<DateTime<Utc>>,
}

impl WorkDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_cleared: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn last_cleared(&self) -> Option<DateTime<Utc>> {
        self.last_cleared
    }

    /// Create the directory if missing.
    pub fn ensure(&self) -> PipelineResult<()> {
        std::fs::create_dir_all(&self.path)?;
        Ok(())
    }

    /// Delete every file directly inside (subdirectories stay), stamping
    /// the clear time. Returns the number of files removed.
    pub fn clear(&mut self) -> PipelineResult<usize> {
        self.ensure()?;
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.path().is_file() {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        self.last_cleared = Some(Utc::now());
        debug!(path = %self.path.display(), removed, "working directory cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_removes_files_and_stamps() {
        let dir = std::env::temp_dir().join("bg_pipeline_workdir_clear_test");
        let mut work = WorkDir::new(&dir);
        work.ensure().unwrap();
        std::fs::write(dir.join("a.txt"), "a").unwrap();
        std::fs::write(dir.join("b.txt"), "b").unwrap();

        assert!(work.last_cleared().is_none());
        let removed = work.clear().unwrap();
        assert_eq!(removed, 2);
        assert!(work.last_cleared().is_some());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn tool_paths_follow_conventions() {
        let tools = ToolPaths {
            mtc_dir: PathBuf::from("/opt/mtc"),
            gmsh2mtc_path: PathBuf::from("/opt/gmsh2mtc.py"),
            boundary_layer_dir: PathBuf::from("/opt/bl"),
            solver_dir: PathBuf::from("/opt/solver"),
            results_dir: PathBuf::from("/tmp/results"),
        };
        assert_eq!(tools.boundary_launcher(), PathBuf::from("/opt/bl/LANCER.bat"));
        assert_eq!(
            tools.efforts_path(),
            PathBuf::from("/opt/solver/resultats/capteurs/Efforts.txt")
        );
    }
}
