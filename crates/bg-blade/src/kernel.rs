//! Host CAD capability interface.
//!
//! The core never holds concrete host types. Every construction request
//! goes through this trait and comes back as an opaque [`Id`] handle; the
//! adapter on the host side owns the mapping to real CAD entities.

use bg_core::{CurveId, Id, PlaneId, Point3, Real, SketchId, SolidId, Vec3};
use thiserror::Error;

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Construction failed: {what}")]
    Construction { what: String },

    #[error("Unknown entity handle: {id}")]
    UnknownEntity { id: Id },

    #[error("Bad request: {what}")]
    BadRequest { what: String },
}

/// Loft parameters. Defaults match the blade loft: solid new body, open,
/// tangent edges merged.
#[derive(Clone, Copy, Debug)]
pub struct LoftOptions {
    pub solid: bool,
    pub closed: bool,
    pub merge_tangent_edges: bool,
}

impl Default for LoftOptions {
    fn default() -> Self {
        Self {
            solid: true,
            closed: false,
            merge_tangent_edges: true,
        }
    }
}

/// Construction operations the host must provide.
///
/// Sketch-local coordinates are passed as 3D points with the sketch plane
/// at z = 0; the host applies the plane placement.
pub trait CadKernel {
    /// Handle of the document's base construction plane.
    fn base_plane(&mut self) -> KernelResult<PlaneId>;

    /// Plane parallel to the base construction plane at `offset`.
    fn create_offset_plane(&mut self, offset: Real, name: &str) -> KernelResult<PlaneId>;

    /// Empty sketch on an existing plane.
    fn create_sketch(&mut self, plane: PlaneId, name: &str) -> KernelResult<SketchId>;

    /// Fitted spline through the ordered point list.
    fn add_fitted_spline(&mut self, sketch: SketchId, points: &[Point3]) -> KernelResult<CurveId>;

    /// Circle in a sketch.
    fn add_circle(
        &mut self,
        sketch: SketchId,
        center: Point3,
        radius: Real,
    ) -> KernelResult<CurveId>;

    /// Loft through the profile sketches, guided by rail curves.
    fn loft(
        &mut self,
        sections: &[SketchId],
        rails: &[CurveId],
        options: LoftOptions,
        name: &str,
    ) -> KernelResult<SolidId>;

    /// Extrude a sketch profile by a distance.
    fn extrude(&mut self, sketch: SketchId, distance: Real, name: &str) -> KernelResult<SolidId>;

    /// Rigid translation of a solid.
    fn translate(&mut self, solid: SolidId, offset: Vec3) -> KernelResult<()>;

    /// Rigid rotation of a solid about an axis through `origin`.
    fn rotate(
        &mut self,
        solid: SolidId,
        axis: Vec3,
        origin: Point3,
        angle_rad: Real,
    ) -> KernelResult<()>;

    /// Show or hide a construction entity.
    fn set_visible(&mut self, entity: Id, visible: bool) -> KernelResult<()>;
}
