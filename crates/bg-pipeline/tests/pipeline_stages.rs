//! Stage-level behavior that only needs the filesystem: artifact
//! discovery, reuse flags and refusal handling. Stages that launch real
//! executables are not spawned here.

use bg_core::Consent;
use bg_pipeline::pipeline::latest_output;
use bg_pipeline::{Pipeline, PipelineError, PipelineOptions, ToolPaths};
use std::path::{Path, PathBuf};

struct RefuseAll;

impl Consent for RefuseAll {
    fn confirm(&mut self, _warning: &str, _default: bool) -> bool {
        false
    }
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn tools_under(root: &Path) -> ToolPaths {
    ToolPaths {
        mtc_dir: root.join("mtc"),
        gmsh2mtc_path: root.join("gmsh2mtc.py"),
        boundary_layer_dir: root.join("bl"),
        solver_dir: root.join("solver"),
        results_dir: root.join("results"),
    }
}

#[test]
fn latest_output_picks_highest_iteration() {
    let dir = scratch("bg_pipeline_latest_output_test");
    std::fs::write(dir.join("naca_1.t"), "").unwrap();
    std::fs::write(dir.join("naca_12.t"), "").unwrap();
    std::fs::write(dir.join("naca_3.t"), "").unwrap();
    std::fs::write(dir.join("notes.txt"), "").unwrap();

    let (path, iteration) = latest_output(&dir).unwrap();
    assert_eq!(iteration, 12);
    assert_eq!(path, dir.join("naca_12.t"));
}

#[test]
fn latest_output_ignores_unnumbered_files() {
    let dir = scratch("bg_pipeline_latest_output_junk_test");
    std::fs::write(dir.join("readme.t"), "").unwrap();
    std::fs::write(dir.join("naca_final.t"), "").unwrap();
    assert!(latest_output(&dir).is_none());
}

#[test]
fn latest_output_on_missing_dir_is_none() {
    assert!(latest_output(Path::new("/nonexistent/Output")).is_none());
}

#[test]
fn new_pipeline_clears_stale_artifacts() {
    let root = scratch("bg_pipeline_clear_test");
    let temp = root.join("temp");
    std::fs::create_dir_all(&temp).unwrap();
    std::fs::write(temp.join("airfoil.msh"), "stale").unwrap();

    let pipeline =
        Pipeline::new(tools_under(&root), PipelineOptions::default(), &temp).unwrap();
    assert!(!pipeline.airfoil_mesh_path().exists());
}

#[test]
fn reuse_flag_preserves_prior_artifacts() {
    let root = scratch("bg_pipeline_reuse_test");
    let temp = root.join("temp");
    std::fs::create_dir_all(&temp).unwrap();
    std::fs::write(temp.join("airfoil.msh"), "prior mesh").unwrap();

    let options = PipelineOptions {
        use_temp_airfoil: true,
        ..PipelineOptions::default()
    };
    let mut pipeline = Pipeline::new(tools_under(&root), options, &temp).unwrap();
    assert!(pipeline.airfoil_mesh_path().exists());

    // reuse short-circuits, so no mesh tool is invoked
    let naca = "0012".parse().unwrap();
    pipeline.generate_airfoil_mesh(naca, 0.0).unwrap();
    assert_eq!(
        std::fs::read_to_string(pipeline.airfoil_mesh_path()).unwrap(),
        "prior mesh"
    );
}

#[test]
fn boundary_reuse_finds_prior_run_output_on_disk() {
    let root = scratch("bg_pipeline_boundary_reuse_test");
    let tools = tools_under(&root);
    let output_dir = tools.boundary_output_dir();
    std::fs::create_dir_all(&output_dir).unwrap();
    std::fs::write(output_dir.join("naca_7.t"), "prior boundary mesh").unwrap();

    let options = PipelineOptions {
        use_temp_boundary: true,
        ..PipelineOptions::default()
    };
    let mut pipeline = Pipeline::new(tools, options, root.join("temp")).unwrap();

    // a fresh Pipeline must pick the artifact up from disk, before any
    // consent prompt or tool launch
    let path = pipeline
        .generate_boundary_layer_mesh(0.1, &mut RefuseAll)
        .unwrap();
    assert_eq!(path, output_dir.join("naca_7.t"));
}

#[test]
fn conversion_without_mesh_is_a_missing_artifact() {
    let root = scratch("bg_pipeline_missing_mesh_test");
    let mut pipeline = Pipeline::new(
        tools_under(&root),
        PipelineOptions::default(),
        root.join("temp"),
    )
    .unwrap();

    let err = pipeline.gmsh_to_mtc().unwrap_err();
    assert!(matches!(err, PipelineError::MissingArtifact { .. }));
}

#[test]
fn refusing_the_boundary_warning_aborts_before_any_write() {
    let root = scratch("bg_pipeline_refuse_test");
    let tools = tools_under(&root);
    let mut pipeline =
        Pipeline::new(tools.clone(), PipelineOptions::default(), root.join("temp")).unwrap();
    std::fs::write(pipeline.airfoil_mtc_path(), "mesh").unwrap();

    let err = pipeline
        .generate_boundary_layer_mesh(0.1, &mut RefuseAll)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Aborted { .. }));
    // the tool directory was never touched
    assert!(!tools.boundary_layer_dir.exists());
}

#[test]
fn solver_without_boundary_mesh_is_a_missing_artifact() {
    let root = scratch("bg_pipeline_solver_order_test");
    let mut pipeline = Pipeline::new(
        tools_under(&root),
        PipelineOptions::default(),
        root.join("temp"),
    )
    .unwrap();

    let err = pipeline.run_solver(&mut RefuseAll).unwrap_err();
    assert!(matches!(err, PipelineError::MissingArtifact { .. }));
}
