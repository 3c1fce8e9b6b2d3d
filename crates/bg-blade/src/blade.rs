//! Blade builder: a strictly sequential build state machine.
//!
//! One `build()` call takes a blade from its configuration to a placed
//! solid: load configs, interpolate intermediates, create planes and
//! sections, sketch splines and rails, hide construction, loft, compute
//! extents, translate, rotate. Any host failure aborts the build with no
//! partial-state recovery.

use crate::config::{self, ProfileConfig};
use crate::kernel::{CadKernel, LoftOptions};
use crate::profile::{Profile, RailConvention};
use crate::{BladeError, BladeResult};
use bg_airfoil::points::DEFAULT_NUM_POINTS;
use bg_core::{CurveId, Point3, Real, SketchId, SolidId, Vec3, deg_to_rad};
use bg_project::BladeDef;
use tracing::debug;

/// Build progress. Stages are strictly ordered; each depends on the
/// prior one completing without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    Created,
    ConfigLoaded,
    Interpolated,
    PlanesAndProfilesCreated,
    ProfilesGenerated,
    ConstructionHidden,
    Lofted,
    ExtentsComputed,
    Translated,
    Rotated,
    Built,
}

/// Scalar extents of a built blade, derived from its innermost profile.
/// Consumed by the rotor for shaft sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeExtents {
    /// Chordwise midpoint of the inner profile.
    pub med_x: Real,
    pub max_y: Real,
    pub min_y: Real,
    /// Radial position of the blade root.
    pub min_r: Real,
    /// Distance from the shaft axis to the farthest inner-profile point;
    /// the outer shaft must clear this not to clip the blade root.
    pub min_outer_shaft_radius: Real,
}

pub struct Blade {
    def: BladeDef,
    /// Blade rotation about the shaft axis, radians (degrees in config).
    angle_rad: Real,
    radial_blade_offset: Real,
    vertical_blade_offset: Real,
    intermediate_profiles: usize,
    blade_no: usize,
    num_points: usize,
    rail_convention: RailConvention,

    stage: BuildStage,
    configs: Vec<ProfileConfig>,
    profiles: Vec<Profile>,
    rails: Vec<Vec<Point3>>,
    rail_curves: Vec<CurveId>,
    rail_sketch: Option<SketchId>,
    solid: Option<SolidId>,
    extents: Option<BladeExtents>,
}

impl Blade {
    pub fn new(def: BladeDef, intermediate_profiles: usize, blade_no: usize) -> Self {
        let angle_rad = deg_to_rad(def.angle);
        let radial_blade_offset = def.radial_blade_offset;
        let vertical_blade_offset = def.vertical_blade_offset;
        Self {
            def,
            angle_rad,
            radial_blade_offset,
            vertical_blade_offset,
            intermediate_profiles,
            blade_no,
            num_points: DEFAULT_NUM_POINTS,
            rail_convention: RailConvention::default(),
            stage: BuildStage::Created,
            configs: Vec::new(),
            profiles: Vec::new(),
            rails: Vec::new(),
            rail_curves: Vec::new(),
            rail_sketch: None,
            solid: None,
            extents: None,
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

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    pub fn blade_no(&self) -> usize {
        self.blade_no
    }

    pub fn solid(&self) -> Option<SolidId> {
        self.solid
    }

    pub fn extents(&self) -> Option<&BladeExtents> {
        self.extents.as_ref()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Run every stage in order. Not reusable: a built (or failed) blade
    /// stays where it stopped.
    pub fn build(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        if self.stage != BuildStage::Created {
            return Err(BladeError::StageOutOfOrder {
                expected: BuildStage::Created,
                found: self.stage,
            });
        }
        self.load_config()?;
        self.interpolate_profiles();
        self.create_planes_and_profiles(kernel)?;
        self.generate_profiles(kernel)?;
        self.hide_construction(kernel)?;
        self.loft_profiles(kernel)?;
        self.compute_extents()?;
        self.translate_self(kernel)?;
        self.rotate_self(kernel)?;
        self.stage = BuildStage::Built;
        debug!(blade = self.blade_no, "blade built");
        Ok(())
    }

    fn load_config(&mut self) -> BladeResult<()> {
        if self.def.profiles.is_empty() {
            return Err(BladeError::NoProfiles {
                blade_no: self.blade_no,
            });
        }
        for def in &self.def.profiles {
            self.configs.push(ProfileConfig::from_def(def)?);
        }
        self.stage = BuildStage::ConfigLoaded;
        Ok(())
    }

    fn interpolate_profiles(&mut self) {
        config::insert_intermediates(&mut self.configs, self.intermediate_profiles);
        self.stage = BuildStage::Interpolated;
    }

    fn create_planes_and_profiles(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        for (i, cfg) in self.configs.iter().enumerate() {
            let plane = kernel.create_offset_plane(
                cfg.radial_offset,
                &format!("Plane for profile {} in blade {}", i, self.blade_no),
            )?;
            self.profiles
                .push(Profile::new(plane, cfg, i, self.num_points));
        }
        self.stage = BuildStage::PlanesAndProfilesCreated;
        Ok(())
    }

    fn generate_profiles(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        let anchor_count = self.rail_convention.anchor_indices(2 * self.num_points + 1).len();
        self.rails = vec![Vec::with_capacity(self.profiles.len()); anchor_count];

        for profile in &mut self.profiles {
            let points = profile.generate_points()?.to_vec();

            // Rail anchors carry the profile's radial offset as z.
            for (rail, &idx) in self
                .rails
                .iter_mut()
                .zip(self.rail_convention.anchor_indices(points.len()).iter())
            {
                let p = points[idx];
                rail.push(Point3::new(p.x, p.y, profile.radial_offset));
            }

            let sketch = kernel.create_sketch(
                profile.plane,
                &format!(
                    "Sketch for profile {} in blade {}",
                    profile.profile_no, self.blade_no
                ),
            )?;
            let sketch_points: Vec<Point3> =
                points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
            kernel.add_fitted_spline(sketch, &sketch_points)?;
            profile.sketch = Some(sketch);
        }

        // Longitudinal rails thread every profile's anchors, sketched on
        // the base plane.
        let base = kernel.base_plane()?;
        let rail_sketch =
            kernel.create_sketch(base, &format!("Rail sketch for blade {}", self.blade_no))?;
        for rail in &self.rails {
            let curve = kernel.add_fitted_spline(rail_sketch, rail)?;
            self.rail_curves.push(curve);
        }
        self.rail_sketch = Some(rail_sketch);

        self.stage = BuildStage::ProfilesGenerated;
        Ok(())
    }

    fn hide_construction(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        for profile in &self.profiles {
            kernel.set_visible(profile.plane, false)?;
            if let Some(sketch) = profile.sketch {
                kernel.set_visible(sketch, false)?;
            }
        }
        if let Some(rail_sketch) = self.rail_sketch {
            kernel.set_visible(rail_sketch, false)?;
        }
        self.stage = BuildStage::ConstructionHidden;
        Ok(())
    }

    fn loft_profiles(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        let sections: Vec<SketchId> = self.profiles.iter().filter_map(|p| p.sketch).collect();
        let solid = kernel.loft(
            &sections,
            &self.rail_curves,
            LoftOptions::default(),
            &format!("Blade {}", self.blade_no),
        )?;
        self.solid = Some(solid);
        self.stage = BuildStage::Lofted;
        Ok(())
    }

    fn compute_extents(&mut self) -> BladeResult<()> {
        let inner = self
            .profiles
            .iter()
            .min_by(|a, b| a.radial_offset.total_cmp(&b.radial_offset))
            .ok_or(BladeError::NoProfiles {
                blade_no: self.blade_no,
            })?;
        let points = inner.points().unwrap_or_default();

        let max_x = points.iter().map(|p| p.x).fold(Real::NEG_INFINITY, Real::max);
        let min_x = points.iter().map(|p| p.x).fold(Real::INFINITY, Real::min);
        let med_x = (max_x + min_x) / 2.0;
        let max_y = points.iter().map(|p| p.y).fold(Real::NEG_INFINITY, Real::max);
        let min_y = points.iter().map(|p| p.y).fold(Real::INFINITY, Real::min);
        let min_r = inner.radial_offset + self.radial_blade_offset;

        let farthest_sq = points
            .iter()
            .map(|p| (p.x - med_x) * (p.x - med_x) + min_r * min_r)
            .fold(Real::NEG_INFINITY, Real::max);

        self.extents = Some(BladeExtents {
            med_x,
            max_y,
            min_y,
            min_r,
            min_outer_shaft_radius: farthest_sq.sqrt(),
        });
        self.stage = BuildStage::ExtentsComputed;
        Ok(())
    }

    fn translate_self(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        let extents = self.extents.ok_or(BladeError::StageOutOfOrder {
            expected: BuildStage::ExtentsComputed,
            found: self.stage,
        })?;
        if let Some(solid) = self.solid {
            kernel.translate(
                solid,
                Vec3::new(
                    -extents.med_x,
                    self.vertical_blade_offset,
                    self.radial_blade_offset,
                ),
            )?;
        }
        self.stage = BuildStage::Translated;
        Ok(())
    }

    fn rotate_self(&mut self, kernel: &mut dyn CadKernel) -> BladeResult<()> {
        // Zero angle skips the request entirely: a no-op transform is a
        // degenerate feature on some hosts.
        if self.angle_rad != 0.0
            && let Some(solid) = self.solid
        {
            kernel.rotate(
                solid,
                Vec3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                self.angle_rad,
            )?;
        }
        self.stage = BuildStage::Rotated;
        Ok(())
    }
}
