//! Staged 2D airfoil mesh generation through the gmsh executable.

use crate::geo;
use crate::{MeshError, MeshResult};
use bg_airfoil::{Naca4, PointGenerator};
use bg_core::{Point2, Real};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const GEO_FILE_NAME: &str = "blade.geo";

/// Progress through the generation pipeline. Each stage is computed
/// lazily and idempotently: requesting a later stage forces completion
/// of all earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MeshStage {
    Created,
    Points,
    GeoCode,
    FileWritten,
    MeshGenerated,
}

/// One airfoil section turned into a 2D mesh file.
pub struct MeshGenerator {
    /// Characteristic mesh size.
    h: Real,
    naca: Naca4,
    /// Angle of attack in radians.
    alpha_rad: Real,
    num_points: usize,
    gmsh_path: PathBuf,
    geo_dir: PathBuf,

    stage: MeshStage,
    points: Option<Vec<Point2>>,
    code: Option<String>,
}

impl MeshGenerator {
    pub fn new(h: Real, naca: Naca4, alpha_rad: Real) -> Self {
        Self {
            h,
            naca,
            alpha_rad,
            num_points: bg_airfoil::points::DEFAULT_NUM_POINTS,
            gmsh_path: PathBuf::from("gmsh"),
            geo_dir: std::env::temp_dir(),
            stage: MeshStage::Created,
            points: None,
            code: None,
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_gmsh_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.gmsh_path = path.into();
        self
    }

    pub fn with_geo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.geo_dir = dir.into();
        self
    }

    pub fn stage(&self) -> MeshStage {
        self.stage
    }

    pub fn geo_path(&self) -> PathBuf {
        self.geo_dir.join(GEO_FILE_NAME)
    }

    fn ensure_points(&mut self) -> MeshResult<()> {
        if self.points.is_none() {
            let pts = PointGenerator::new(self.naca)
                .with_num_points(self.num_points)
                .generate()?;
            self.points = Some(pts);
            self.stage = self.stage.max(MeshStage::Points);
        }
        Ok(())
    }

    fn ensure_geo_code(&mut self) -> MeshResult<()> {
        if self.code.is_none() {
            self.ensure_points()?;
            let points = self.points.as_deref().unwrap_or_default();
            self.code = Some(geo::airfoil_geo(points, self.h, self.alpha_rad));
            self.stage = self.stage.max(MeshStage::GeoCode);
        }
        Ok(())
    }

    /// The emitted script, forcing earlier stages.
    pub fn geo_code(&mut self) -> MeshResult<&str> {
        self.ensure_geo_code()?;
        Ok(self.code.as_deref().unwrap_or_default())
    }

    /// Write the script next to the mesher, forcing earlier stages.
    pub fn write_geo(&mut self) -> MeshResult<PathBuf> {
        self.ensure_geo_code()?;
        let path = self.geo_path();
        if self.stage < MeshStage::FileWritten {
            std::fs::write(&path, self.code.as_deref().unwrap_or_default())?;
            self.stage = MeshStage::FileWritten;
            debug!(path = %path.display(), "geo script written");
        }
        Ok(path)
    }

    /// Triangulate in 2D and write the mesh, forcing earlier stages.
    ///
    /// The mesh format is pinned to MSH 2.2: the downstream converter
    /// predates the version 4 format.
    pub fn save_mesh(&mut self, output: &Path) -> MeshResult<()> {
        let geo_path = self.write_geo()?;

        info!(
            naca = %self.naca,
            alpha_rad = self.alpha_rad,
            output = %output.display(),
            "meshing airfoil"
        );
        let status = Command::new(&self.gmsh_path)
            .arg(&geo_path)
            .args(["-2", "-format", "msh22", "-o"])
            .arg(output)
            .status()
            .map_err(|source| MeshError::ToolLaunch {
                tool: self.gmsh_path.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(MeshError::ToolFailed {
                tool: self.gmsh_path.display().to_string(),
                code: status.code(),
            });
        }

        self.stage = MeshStage::MeshGenerated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> MeshGenerator {
        MeshGenerator::new(0.01, Naca4::parse("2412").unwrap(), 0.1).with_num_points(12)
    }

    #[test]
    fn stages_advance_lazily() {
        let mut generator = generator();
        assert_eq!(generator.stage(), MeshStage::Created);
        generator.geo_code().unwrap();
        assert_eq!(generator.stage(), MeshStage::GeoCode);
    }

    #[test]
    fn geo_code_is_idempotent() {
        let mut generator = generator();
        let first = generator.geo_code().unwrap().to_string();
        let second = generator.geo_code().unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn write_geo_forces_earlier_stages() {
        let dir = std::env::temp_dir().join("bg_mesh_write_geo_test");
        std::fs::create_dir_all(&dir).unwrap();
        let mut generator = generator().with_geo_dir(&dir);
        let path = generator.write_geo().unwrap();
        assert_eq!(generator.stage(), MeshStage::FileWritten);
        let content = std::fs::read_to_string(path).unwrap();
        // 2n+1 boundary points for n samples
        assert_eq!(content.matches("Point(").count(), 25);
        assert!(content.contains("Plane Surface("));
    }

    #[test]
    fn save_mesh_surfaces_missing_tool() {
        let dir = std::env::temp_dir().join("bg_mesh_missing_tool_test");
        std::fs::create_dir_all(&dir).unwrap();
        let mut generator = generator()
            .with_geo_dir(&dir)
            .with_gmsh_path("/nonexistent/bin/gmsh");
        let err = generator
            .save_mesh(&dir.join("airfoil.msh"))
            .unwrap_err();
        assert!(matches!(err, MeshError::ToolLaunch { .. }));
    }
}
