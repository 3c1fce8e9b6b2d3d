//! Rotor orchestration: build every blade, then size the shared shaft.

use crate::blade::Blade;
use crate::kernel::CadKernel;
use crate::profile::RailConvention;
use crate::{BladeError, BladeResult};
use bg_airfoil::points::DEFAULT_NUM_POINTS;
use bg_core::{Consent, Point3, Real};
use bg_project::{OuterShaftDiameterDef, RotorDef};
use tracing::info;

/// Derived shaft geometry, computed once from all blades' extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaftSpec {
    pub inner_diameter: Real,
    pub outer_diameter: Real,
    /// Vertical span of the shaft body.
    pub delta_y: Real,
    /// Vertical position of the shaft base plane.
    pub offset_y: Real,
}

/// Builds each configured blade and the shaft hole between them.
pub struct Rotor {
    def: RotorDef,
    num_points: usize,
    rail_convention: RailConvention,
    blades: Vec<Blade>,
}

impl Rotor {
    pub fn new(def: RotorDef) -> Self {
        Self {
            def,
            num_points: DEFAULT_NUM_POINTS,
            rail_convention: RailConvention::default(),
            blades: Vec::new(),
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_rail_convention(mut self, convention: RailConvention) -> Self {
        self.rail_convention = convention;
        self
    }

    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    /// Build every blade, then the shaft. Blades already built when a
    /// later one fails stay in the document; there is no rollback.
    pub fn build(
        &mut self,
        kernel: &mut dyn CadKernel,
        consent: &mut dyn Consent,
    ) -> BladeResult<ShaftSpec> {
        for (blade_no, blade_def) in self.def.blades.iter().enumerate() {
            info!(blade_no, "building blade");
            let mut blade = Blade::new(blade_def.clone(), self.def.intermediate_profiles, blade_no)
                .with_num_points(self.num_points)
                .with_rail_convention(self.rail_convention);
            blade.build(kernel)?;
            self.blades.push(blade);
        }

        let spec = self.size_shaft(consent)?;
        self.construct_shaft(kernel, &spec)?;
        Ok(spec)
    }

    /// Resolve shaft diameters against the blades' computed clearances.
    fn size_shaft(&self, consent: &mut dyn Consent) -> BladeResult<ShaftSpec> {
        let extents: Vec<_> = self.blades.iter().filter_map(|b| b.extents()).collect();
        if extents.is_empty() {
            return Err(BladeError::Aborted {
                what: "no blade extents available for shaft sizing".to_string(),
            });
        }

        let max_min_r = extents.iter().map(|e| e.min_r).fold(Real::NEG_INFINITY, Real::max);
        let inner_clearance = 2.0 * max_min_r;
        let inner_diameter = self.def.inner_shaft_diameter;
        if inner_diameter > inner_clearance {
            let warning = format!(
                "inner shaft diameter {inner_diameter} exceeds blade clearance {inner_clearance}; \
                 the shaft would cut into the blade roots"
            );
            // Safe default is to abort: an oversized inner bore destroys
            // the blade attachment.
            if !consent.confirm(&warning, false) {
                return Err(BladeError::Aborted { what: warning });
            }
        }

        let auto_outer = 2.0
            * extents
                .iter()
                .map(|e| e.min_outer_shaft_radius)
                .fold(Real::NEG_INFINITY, Real::max);
        let outer_diameter = match self.def.outer_shaft_diameter {
            OuterShaftDiameterDef::Auto => auto_outer,
            OuterShaftDiameterDef::Fixed(requested) if requested < auto_outer => {
                let warning = format!(
                    "configured outer shaft diameter {requested} is below the computed safe \
                     minimum {auto_outer}"
                );
                // Safe default clamps to the computed minimum.
                if consent.confirm(&warning, true) {
                    auto_outer
                } else {
                    requested
                }
            }
            OuterShaftDiameterDef::Fixed(requested) => requested,
        };

        let max_y = extents.iter().map(|e| e.max_y).fold(Real::NEG_INFINITY, Real::max);
        let min_y = extents.iter().map(|e| e.min_y).fold(Real::INFINITY, Real::min);

        Ok(ShaftSpec {
            inner_diameter,
            outer_diameter,
            delta_y: max_y - min_y,
            offset_y: min_y,
        })
    }

    /// Two concentric circles on a plane at `offset_y`, extruded by the
    /// blades' vertical span.
    fn construct_shaft(&self, kernel: &mut dyn CadKernel, spec: &ShaftSpec) -> BladeResult<()> {
        let plane = kernel.create_offset_plane(spec.offset_y, "Shaft base plane")?;
        let sketch = kernel.create_sketch(plane, "Shaft sketch")?;
        let center = Point3::new(0.0, 0.0, 0.0);
        kernel.add_circle(sketch, center, spec.inner_diameter / 2.0)?;
        kernel.add_circle(sketch, center, spec.outer_diameter / 2.0)?;
        kernel.extrude(sketch, spec.delta_y, "Shaft")?;
        Ok(())
    }
}
