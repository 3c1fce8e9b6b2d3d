use bg_airfoil::Naca4;
use bg_blade::{AlwaysAccept, Consent, RecordingKernel, Rotor, Unattended};
use bg_core::deg_to_rad;
use bg_pipeline::{Pipeline, PipelineOptions, PollOutcome, Progress, ToolPaths, poll_with_timeout};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] bg_project::ProjectError),
    #[error(transparent)]
    Blade(#[from] bg_blade::BladeError),
    #[error(transparent)]
    Pipeline(#[from] bg_pipeline::PipelineError),
    #[error(transparent)]
    Naca(#[from] bg_airfoil::NacaError),
    #[error("Could not serialize construction log: {0}")]
    Log(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "bg-cli")]
#[command(about = "Blade geometry and CFD pipeline tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rotor definition file
    Validate {
        /// Path to the rotor YAML file
        project_path: PathBuf,
    },
    /// Build the rotor geometry and report blade extents
    Build {
        /// Path to the rotor YAML file
        project_path: PathBuf,
        /// Write the construction operation log as JSON
        #[arg(short, long)]
        log: Option<PathBuf>,
        /// Points per airfoil surface side
        #[arg(long)]
        num_points: Option<usize>,
        /// Accept all warnings instead of taking safe defaults
        #[arg(long)]
        force: bool,
    },
    /// Sweep angles of attack through the simulation pipeline
    Polar {
        /// 4-digit NACA code, e.g. 2412
        naca: String,
        /// First angle of attack in degrees
        #[arg(long, default_value_t = 0.0)]
        alpha_start: f64,
        /// Last angle of attack in degrees
        #[arg(long, default_value_t = 10.0)]
        alpha_end: f64,
        /// Sweep step in degrees
        #[arg(long, default_value_t = 1.0)]
        alpha_step: f64,
        /// Characteristic mesh size
        #[arg(long, default_value_t = 0.01)]
        h: f64,
        /// Directory containing the mtc preprocessor
        #[arg(long)]
        mtc_dir: PathBuf,
        /// Path to the gmsh-to-mtc converter script
        #[arg(long)]
        gmsh2mtc: PathBuf,
        /// Boundary-layer tool working directory
        #[arg(long)]
        boundary_dir: PathBuf,
        /// Flow solver working directory
        #[arg(long)]
        solver_dir: PathBuf,
        /// Where result CSVs are written
        #[arg(long)]
        results_dir: PathBuf,
        /// Scratch directory for intermediate meshes
        #[arg(long)]
        temp_dir: Option<PathBuf>,
        /// Per-stage and convergence timeout in seconds
        #[arg(long, default_value_t = 300)]
        timeout: u64,
        /// Convergence threshold on the force coefficients
        #[arg(long, default_value_t = 0.001)]
        k: f64,
        /// Stop the boundary-layer stage at this output iteration
        #[arg(long)]
        target_iterations: Option<u32>,
        /// Reuse a prior run's airfoil mesh
        #[arg(long)]
        use_temp_airfoil: bool,
        /// Reuse a prior run's boundary-layer mesh
        #[arg(long)]
        use_temp_boundary: bool,
        /// Accept all warnings instead of taking safe defaults
        #[arg(long)]
        force: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Build {
            project_path,
            log,
            num_points,
            force,
        } => cmd_build(&project_path, log.as_deref(), num_points, force),
        Commands::Polar {
            naca,
            alpha_start,
            alpha_end,
            alpha_step,
            h,
            mtc_dir,
            gmsh2mtc,
            boundary_dir,
            solver_dir,
            results_dir,
            temp_dir,
            timeout,
            k,
            target_iterations,
            use_temp_airfoil,
            use_temp_boundary,
            force,
        } => {
            let tools = ToolPaths {
                mtc_dir,
                gmsh2mtc_path: gmsh2mtc,
                boundary_layer_dir: boundary_dir,
                solver_dir,
                results_dir,
            };
            let options = PipelineOptions {
                use_temp_airfoil,
                use_temp_boundary,
                boundary_timeout: Duration::from_secs(timeout),
                target_iterations,
                h,
            };
            let sweep = Sweep {
                start: alpha_start,
                end: alpha_end,
                step: alpha_step,
            };
            cmd_polar(&naca, sweep, tools, options, temp_dir, timeout, k, force)
        }
    }
}

struct Sweep {
    start: f64,
    end: f64,
    step: f64,
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating rotor definition: {}", project_path.display());
    // load_yaml validates on the way in
    let rotor = bg_project::load_yaml(project_path)?;
    println!(
        "✓ Definition is valid ({} blade(s), {} intermediate profile(s))",
        rotor.blades.len(),
        rotor.intermediate_profiles
    );
    Ok(())
}

fn cmd_build(
    project_path: &Path,
    log: Option<&Path>,
    num_points: Option<usize>,
    force: bool,
) -> CliResult<()> {
    let def = bg_project::load_yaml(project_path)?;

    let mut rotor = Rotor::new(def);
    if let Some(n) = num_points {
        rotor = rotor.with_num_points(n);
    }

    let mut kernel = RecordingKernel::new();
    let mut consent: Box<dyn Consent> = if force {
        Box::new(AlwaysAccept)
    } else {
        Box::new(Unattended)
    };
    let shaft = rotor.build(&mut kernel, consent.as_mut())?;

    println!("✓ Rotor built: {} blade(s)", rotor.blades().len());
    for blade in rotor.blades() {
        if let Some(extents) = blade.extents() {
            println!(
                "  blade {}: med_x = {:.4}, min_r = {:.4}, min outer shaft radius = {:.4}",
                blade.blade_no(),
                extents.med_x,
                extents.min_r,
                extents.min_outer_shaft_radius
            );
        }
    }
    println!(
        "  shaft: inner Ø {:.4}, outer Ø {:.4}, span {:.4} from y = {:.4}",
        shaft.inner_diameter, shaft.outer_diameter, shaft.delta_y, shaft.offset_y
    );

    if let Some(log_path) = log {
        std::fs::write(log_path, kernel.to_json()?)?;
        println!("  construction log written to {}", log_path.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_polar(
    naca: &str,
    sweep: Sweep,
    tools: ToolPaths,
    options: PipelineOptions,
    temp_dir: Option<PathBuf>,
    timeout_secs: u64,
    k: f64,
    force: bool,
) -> CliResult<()> {
    let naca: Naca4 = naca.parse()?;
    let temp_dir = temp_dir.unwrap_or_else(|| std::env::temp_dir().join("bg-polar"));
    let mut consent: Box<dyn Consent> = if force {
        Box::new(AlwaysAccept)
    } else {
        Box::new(Unattended)
    };

    let timeout = Duration::from_secs(timeout_secs);
    let poll_step = timeout / 60;

    let mut alpha_deg = sweep.start;
    while alpha_deg <= sweep.end + 1e-9 {
        println!("── {naca} at α = {alpha_deg}°");
        let alpha_rad = deg_to_rad(alpha_deg);

        let mut pipeline = Pipeline::new(tools.clone(), options.clone(), &temp_dir)?;
        let mut solver = pipeline.run(naca, alpha_rad, consent.as_mut())?;

        let outcome = poll_with_timeout(timeout, poll_step, || {
            let metric = pipeline.has_converged();
            if metric < k {
                Progress::Done(metric)
            } else if metric.is_finite() {
                Progress::Partial(metric)
            } else {
                Progress::Empty
            }
        });
        solver.terminate()?;

        match outcome {
            PollOutcome::Completed(metric) => {
                println!("  converged (metric {metric:.2e})");
            }
            PollOutcome::TimedOutPartial(metric) => {
                println!("  timed out at metric {metric:.2e}, keeping partial results");
            }
            PollOutcome::TimedOutEmpty => {
                println!("  no solver output before timeout, skipping this angle");
                alpha_deg += sweep.step;
                continue;
            }
        }

        let name = format!("naca{}_alpha{}", naca.code(), alpha_deg);
        let saved = pipeline.save_results(&name)?;
        println!("  saved {}", saved.display());

        alpha_deg += sweep.step;
    }
    Ok(())
}
