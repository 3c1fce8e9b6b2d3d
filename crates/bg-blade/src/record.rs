//! Op-logging kernel adapter.
//!
//! Records every construction request as a serializable operation. Used
//! by tests to assert build sequences and by the CLI to dump the
//! construction log for host-side replay.

use crate::kernel::{CadKernel, KernelResult, LoftOptions};
use bg_core::{CurveId, Id, PlaneId, Point3, Real, SketchId, SolidId, Vec3};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "op")]
pub enum ConstructionOp {
    BasePlane {
        plane: u32,
    },
    CreateOffsetPlane {
        plane: u32,
        offset: f64,
        name: String,
    },
    CreateSketch {
        sketch: u32,
        plane: u32,
        name: String,
    },
    AddFittedSpline {
        curve: u32,
        sketch: u32,
        points: Vec<[f64; 3]>,
    },
    AddCircle {
        curve: u32,
        sketch: u32,
        center: [f64; 3],
        radius: f64,
    },
    Loft {
        solid: u32,
        sections: Vec<u32>,
        rails: Vec<u32>,
        solid_body: bool,
        closed: bool,
        merge_tangent_edges: bool,
        name: String,
    },
    Extrude {
        solid: u32,
        sketch: u32,
        distance: f64,
        name: String,
    },
    Translate {
        solid: u32,
        offset: [f64; 3],
    },
    Rotate {
        solid: u32,
        axis: [f64; 3],
        origin: [f64; 3],
        angle_rad: f64,
    },
    SetVisible {
        entity: u32,
        visible: bool,
    },
}

/// Kernel that only records; every request succeeds and yields a fresh
/// handle.
#[derive(Debug, Default)]
pub struct RecordingKernel {
    next_index: u32,
    base_plane: Option<PlaneId>,
    ops: Vec<ConstructionOp>,
}

impl RecordingKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[ConstructionOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<ConstructionOp> {
        self.ops
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.ops)
    }

    fn fresh(&mut self) -> Id {
        let id = Id::from_index(self.next_index);
        self.next_index += 1;
        id
    }
}

fn p3(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

impl CadKernel for RecordingKernel {
    fn base_plane(&mut self) -> KernelResult<PlaneId> {
        if let Some(plane) = self.base_plane {
            return Ok(plane);
        }
        let plane = self.fresh();
        self.ops.push(ConstructionOp::BasePlane {
            plane: plane.index(),
        });
        self.base_plane = Some(plane);
        Ok(plane)
    }

    fn create_offset_plane(&mut self, offset: Real, name: &str) -> KernelResult<PlaneId> {
        let plane = self.fresh();
        self.ops.push(ConstructionOp::CreateOffsetPlane {
            plane: plane.index(),
            offset,
            name: name.to_string(),
        });
        Ok(plane)
    }

    fn create_sketch(&mut self, plane: PlaneId, name: &str) -> KernelResult<SketchId> {
        let sketch = self.fresh();
        self.ops.push(ConstructionOp::CreateSketch {
            sketch: sketch.index(),
            plane: plane.index(),
            name: name.to_string(),
        });
        Ok(sketch)
    }

    fn add_fitted_spline(&mut self, sketch: SketchId, points: &[Point3]) -> KernelResult<CurveId> {
        let curve = self.fresh();
        self.ops.push(ConstructionOp::AddFittedSpline {
            curve: curve.index(),
            sketch: sketch.index(),
            points: points.iter().map(p3).collect(),
        });
        Ok(curve)
    }

    fn add_circle(
        &mut self,
        sketch: SketchId,
        center: Point3,
        radius: Real,
    ) -> KernelResult<CurveId> {
        let curve = self.fresh();
        self.ops.push(ConstructionOp::AddCircle {
            curve: curve.index(),
            sketch: sketch.index(),
            center: p3(&center),
            radius,
        });
        Ok(curve)
    }

    fn loft(
        &mut self,
        sections: &[SketchId],
        rails: &[CurveId],
        options: LoftOptions,
        name: &str,
    ) -> KernelResult<SolidId> {
        let solid = self.fresh();
        self.ops.push(ConstructionOp::Loft {
            solid: solid.index(),
            sections: sections.iter().map(|s| s.index()).collect(),
            rails: rails.iter().map(|r| r.index()).collect(),
            solid_body: options.solid,
            closed: options.closed,
            merge_tangent_edges: options.merge_tangent_edges,
            name: name.to_string(),
        });
        Ok(solid)
    }

    fn extrude(&mut self, sketch: SketchId, distance: Real, name: &str) -> KernelResult<SolidId> {
        let solid = self.fresh();
        self.ops.push(ConstructionOp::Extrude {
            solid: solid.index(),
            sketch: sketch.index(),
            distance,
            name: name.to_string(),
        });
        Ok(solid)
    }

    fn translate(&mut self, solid: SolidId, offset: Vec3) -> KernelResult<()> {
        self.ops.push(ConstructionOp::Translate {
            solid: solid.index(),
            offset: [offset.x, offset.y, offset.z],
        });
        Ok(())
    }

    fn rotate(
        &mut self,
        solid: SolidId,
        axis: Vec3,
        origin: Point3,
        angle_rad: Real,
    ) -> KernelResult<()> {
        self.ops.push(ConstructionOp::Rotate {
            solid: solid.index(),
            axis: [axis.x, axis.y, axis.z],
            origin: p3(&origin),
            angle_rad,
        });
        Ok(())
    }

    fn set_visible(&mut self, entity: Id, visible: bool) -> KernelResult<()> {
        self.ops.push(ConstructionOp::SetVisible {
            entity: entity.index(),
            visible,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_sequential() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.create_offset_plane(0.0, "a").unwrap();
        let b = kernel.create_offset_plane(1.0, "b").unwrap();
        let c = kernel.create_sketch(a, "c").unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(kernel.ops().len(), 3);
    }

    #[test]
    fn json_dump_carries_op_tags() {
        let mut kernel = RecordingKernel::new();
        let plane = kernel.create_offset_plane(0.5, "Plane").unwrap();
        kernel.set_visible(plane, false).unwrap();
        let json = kernel.to_json().unwrap();
        assert!(json.contains("\"op\": \"CreateOffsetPlane\""));
        assert!(json.contains("\"op\": \"SetVisible\""));
    }
}
