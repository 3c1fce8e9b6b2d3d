//! Five-stage external-tool pipeline with file handoffs.
//!
//! Stage order: airfoil mesh -> format conversion -> mtc preprocessing
//! -> boundary-layer mesh -> flow solver. The tools share global working
//! directories, so each destructive step warns through [`Consent`]
//! before overwriting; at-most-one pipeline run at a time is the
//! caller's responsibility.

use crate::convergence;
use crate::supervise::{PollOutcome, Progress, SupervisedProcess, poll_with_timeout};
use crate::tools::{BOUNDARY_INPUT_NAME, ToolPaths, WorkDir};
use crate::{PipelineError, PipelineResult};
use bg_airfoil::Naca4;
use bg_core::{Consent, Real};
use bg_mesh::MeshGenerator;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{info, warn};

pub const AIRFOIL_MESH_NAME: &str = "airfoil.msh";
pub const AIRFOIL_MTC_NAME: &str = "airfoil.t";

/// Boundary-layer sizing box: height then width.
const DEFAULT_BOX: [Real; 2] = [5.0, 0.4];

#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Reuse a prior run's airfoil mesh instead of regenerating.
    pub use_temp_airfoil: bool,
    /// Reuse a prior run's boundary-layer output instead of regenerating.
    pub use_temp_boundary: bool,
    /// Hard budget for the boundary-layer mesh stage.
    pub boundary_timeout: Duration,
    /// Stop polling once this output iteration shows up.
    pub target_iterations: Option<u32>,
    /// Characteristic mesh size.
    pub h: Real,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            use_temp_airfoil: false,
            use_temp_boundary: false,
            boundary_timeout: Duration::from_secs(300),
            target_iterations: None,
            h: 0.01,
        }
    }
}

/// One run of the meshing/solving toolchain for a single section.
pub struct Pipeline {
    tools: ToolPaths,
    options: PipelineOptions,
    temp: WorkDir,
    boundary_result: Option<PathBuf>,
}

impl Pipeline {
    /// Set up scratch space. The temp directory is cleared up front
    /// unless an artifact-reuse flag asks to keep prior outputs.
    pub fn new(
        tools: ToolPaths,
        options: PipelineOptions,
        temp_dir: impl Into<PathBuf>,
    ) -> PipelineResult<Self> {
        let mut temp = WorkDir::new(temp_dir);
        if options.use_temp_airfoil || options.use_temp_boundary {
            temp.ensure()?;
        } else {
            temp.clear()?;
        }
        Ok(Self {
            tools,
            options,
            temp,
            boundary_result: None,
        })
    }

    pub fn airfoil_mesh_path(&self) -> PathBuf {
        self.temp.join(AIRFOIL_MESH_NAME)
    }

    pub fn airfoil_mtc_path(&self) -> PathBuf {
        self.temp.join(AIRFOIL_MTC_NAME)
    }

    /// Stage 1: mesh the section at angle of attack `alpha_rad`.
    pub fn generate_airfoil_mesh(&mut self, naca: Naca4, alpha_rad: Real) -> PipelineResult<()> {
        let output = self.airfoil_mesh_path();
        if self.options.use_temp_airfoil && output.exists() {
            info!(path = %output.display(), "reusing airfoil mesh");
            return Ok(());
        }
        MeshGenerator::new(self.options.h, naca, alpha_rad)
            .with_geo_dir(self.temp.path())
            .save_mesh(&output)?;
        Ok(())
    }

    /// Stage 2: convert the gmsh mesh to the mtc format through the
    /// converter script.
    pub fn gmsh_to_mtc(&mut self) -> PipelineResult<()> {
        let input = self.airfoil_mesh_path();
        if !input.exists() {
            return Err(PipelineError::MissingArtifact { path: input });
        }
        let output = self.airfoil_mtc_path();
        info!(from = %input.display(), to = %output.display(), "converting gmsh mesh to mtc");

        let status = Command::new("python")
            .arg(&self.tools.gmsh2mtc_path)
            .arg(&input)
            .arg(&output)
            .status()
            .map_err(|source| PipelineError::ToolLaunch {
                tool: "gmsh2mtc".to_string(),
                source,
            })?;
        if !status.success() {
            return Err(PipelineError::ToolFailed {
                tool: "gmsh2mtc".to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Stage 3: run the mtc preprocessor over the converted mesh. The
    /// tool is stdin-driven; `0` selects its default processing mode.
    pub fn process_airfoil_mtc(&mut self) -> PipelineResult<()> {
        let mtc_path = self.airfoil_mtc_path();
        if !mtc_path.exists() {
            return Err(PipelineError::MissingArtifact { path: mtc_path });
        }
        info!(path = %mtc_path.display(), "preprocessing mtc mesh");

        let mut child = Command::new(self.tools.mtc_exe())
            .arg(&mtc_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PipelineError::ToolLaunch {
                tool: "mtc".to_string(),
                source,
            })?;
        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(b"0\n")?;
        }
        drop(child.stdin.take());
        let status = child.wait()?;
        if !status.success() {
            return Err(PipelineError::ToolFailed {
                tool: "mtc".to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Stage 4: boundary-layer mesh. Copies the preprocessed mesh into
    /// the tool's directory, rewrites its sizing box (height scaled by
    /// `1 + sin(alpha)` so the rotated section is not clipped), clears
    /// previous outputs, launches the tool unsupervised and polls its
    /// output directory. On timeout the best non-converged result found
    /// is used; no result at all is a failure.
    pub fn generate_boundary_layer_mesh(
        &mut self,
        alpha_rad: Real,
        consent: &mut dyn Consent,
    ) -> PipelineResult<PathBuf> {
        if self.options.use_temp_boundary {
            // A fresh Pipeline has no in-memory result; a prior run's
            // best output may still sit in the tool's output directory.
            if self.boundary_result.is_none() {
                self.boundary_result =
                    latest_output(&self.tools.boundary_output_dir()).map(|(path, _)| path);
            }
            if let Some(path) = &self.boundary_result {
                info!(path = %path.display(), "reusing boundary-layer mesh");
                return Ok(path.clone());
            }
        }

        let mtc_path = self.airfoil_mtc_path();
        if !mtc_path.exists() {
            return Err(PipelineError::MissingArtifact { path: mtc_path });
        }

        let warning = format!(
            "this will overwrite the boundary-layer tool's working files in {}",
            self.tools.boundary_layer_dir.display()
        );
        warn!("{warning}");
        if !consent.confirm(&warning, true) {
            return Err(PipelineError::Aborted { what: warning });
        }

        std::fs::copy(
            &mtc_path,
            self.tools.boundary_layer_dir.join(BOUNDARY_INPUT_NAME),
        )?;
        let box_height = DEFAULT_BOX[0] * (1.0 + alpha_rad.sin());
        std::fs::write(
            self.tools.boundary_box_file(),
            format!("{box_height}\n{}\n", DEFAULT_BOX[1]),
        )?;
        WorkDir::new(self.tools.boundary_output_dir()).clear()?;

        let mut launcher = Command::new(self.tools.boundary_launcher());
        launcher.current_dir(&self.tools.boundary_layer_dir);
        let mut process = SupervisedProcess::spawn(launcher, "boundary-layer mesh")?;

        let timeout = self.options.boundary_timeout;
        let step = timeout / 10;
        let output_dir = self.tools.boundary_output_dir();
        let target = self.options.target_iterations;
        let outcome = poll_with_timeout(timeout, step, || {
            match latest_output(&output_dir) {
                Some((path, iteration)) if target.is_some_and(|t| iteration >= t) => {
                    Progress::Done(path)
                }
                Some((path, _)) => Progress::Partial(path),
                None => Progress::Empty,
            }
        });
        // never leave the tool running
        process.terminate()?;

        let path = match outcome {
            PollOutcome::Completed(path) => path,
            PollOutcome::TimedOutPartial(path) => {
                warn!(path = %path.display(), "boundary-layer mesh timed out, using best result");
                path
            }
            PollOutcome::TimedOutEmpty => {
                return Err(PipelineError::NoResultsYet { dir: output_dir });
            }
        };
        self.boundary_result = Some(path.clone());
        Ok(path)
    }

    /// Stage 5: hand the meshes to the flow solver and launch it
    /// detached. The caller polls [`has_converged`](Self::has_converged)
    /// and terminates the returned process when satisfied.
    pub fn run_solver(&mut self, consent: &mut dyn Consent) -> PipelineResult<SupervisedProcess> {
        let boundary = self
            .boundary_result
            .clone()
            .ok_or_else(|| PipelineError::MissingArtifact {
                path: self.tools.boundary_output_dir(),
            })?;

        let warning = format!(
            "this will clear previous solver results in {}",
            self.tools.solver_dir.display()
        );
        warn!("{warning}");
        if !consent.confirm(&warning, true) {
            return Err(PipelineError::Aborted { what: warning });
        }

        std::fs::copy(
            self.airfoil_mtc_path(),
            self.tools.solver_dir.join(BOUNDARY_INPUT_NAME),
        )?;
        let boundary_name = boundary
            .file_name()
            .ok_or_else(|| PipelineError::MissingArtifact {
                path: boundary.clone(),
            })?;
        std::fs::copy(&boundary, self.tools.solver_dir.join(boundary_name))?;

        let results_dir = self.tools.solver_dir.join("resultats");
        if results_dir.exists() {
            std::fs::remove_dir_all(&results_dir)?;
        }
        std::fs::create_dir_all(&results_dir)?;

        let mut launcher = Command::new(self.tools.solver_launcher());
        launcher.current_dir(&self.tools.solver_dir);
        SupervisedProcess::spawn(launcher, "flow solver")
    }

    /// Convergence score of the current solver output; infinite when no
    /// usable results exist yet.
    pub fn has_converged(&self) -> f64 {
        convergence::has_converged(&self.tools.efforts_path())
    }

    /// Export the force table as `{name}.csv` in the results directory.
    pub fn save_results(&self, name: &str) -> PipelineResult<PathBuf> {
        let efforts = self.tools.efforts_path();
        let content = std::fs::read_to_string(&efforts)
            .map_err(|_| PipelineError::MissingArtifact {
                path: efforts.clone(),
            })?;
        let samples = convergence::parse_efforts(&content)
            .ok_or(PipelineError::MissingArtifact { path: efforts })?;

        std::fs::create_dir_all(&self.tools.results_dir)?;
        let output = self.tools.results_dir.join(format!("{name}.csv"));
        convergence::export_csv(&samples, &output)?;
        info!(path = %output.display(), "results saved");
        Ok(output)
    }

    /// Run stages 1-5 in order and return the live solver process.
    pub fn run(
        &mut self,
        naca: Naca4,
        alpha_rad: Real,
        consent: &mut dyn Consent,
    ) -> PipelineResult<SupervisedProcess> {
        self.generate_airfoil_mesh(naca, alpha_rad)?;
        self.gmsh_to_mtc()?;
        self.process_airfoil_mtc()?;
        self.generate_boundary_layer_mesh(alpha_rad, consent)?;
        self.run_solver(consent)
    }
}

/// Highest-numbered `*_N.t` result in the tool's output directory.
pub fn latest_output(dir: &Path) -> Option<(PathBuf, u32)> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut best: Option<(PathBuf, u32)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|e| e != "t") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(iteration) = stem.rsplit('_').next().and_then(|n| n.parse::<u32>().ok()) else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, b)| iteration > *b) {
            best = Some((path, iteration));
        }
    }
    best
}
