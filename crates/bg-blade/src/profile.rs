//! Realized blade sections.

use crate::BladeResult;
use crate::config::ProfileConfig;
use bg_airfoil::{Naca4, PointGenerator, SectionTransform};
use bg_core::{PlaneId, Point2, Real, SketchId};

/// Which boundary points anchor the loft guide rails.
///
/// Two historical conventions exist and intent is ambiguous, so both are
/// kept. Anchor fractions are expressed in sample count `n` (half the
/// loop length), so every anchor sits on the upper surface between the
/// trailing edge (index 0) and the leading edge (index n). `Endpoints`
/// (the newer one) anchors at the trailing edge and just short of the
/// leading edge; `Quarters` adds the quarter-chord anchors used by the
/// oldest blade variant. The last closed-loop point must never be an
/// anchor: it duplicates index 0 and would collapse two rails into one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RailConvention {
    #[default]
    Endpoints,
    Quarters,
}

impl RailConvention {
    /// Anchor indices into a boundary loop of `len` (= 2n+1) points.
    pub fn anchor_indices(&self, len: usize) -> Vec<usize> {
        let n = len / 2;
        match self {
            RailConvention::Endpoints => vec![0, n - 1],
            RailConvention::Quarters => vec![0, n / 4, 3 * n / 4, n - 1],
        }
    }
}

/// A section placed on a host construction plane. Owned by its blade for
/// the duration of one build.
#[derive(Debug)]
pub struct Profile {
    pub plane: PlaneId,
    pub naca: Naca4,
    pub chord: Real,
    pub angle_deg: Real,
    pub radial_offset: Real,
    pub colinear_offset: Real,
    pub num_points: usize,
    pub profile_no: usize,
    pub sketch: Option<SketchId>,
    points: Option<Vec<Point2>>,
}

impl Profile {
    pub fn new(
        plane: PlaneId,
        config: &ProfileConfig,
        profile_no: usize,
        num_points: usize,
    ) -> Self {
        Self {
            plane,
            naca: config.naca,
            chord: config.c,
            angle_deg: config.angle,
            radial_offset: config.radial_offset,
            colinear_offset: config.colinear_offset,
            num_points,
            profile_no,
            sketch: None,
            points: None,
        }
    }

    /// Generate and transform the boundary points, once. The pipeline
    /// order is fixed: unit-chord generation, shear, scale by chord,
    /// chordwise offset.
    pub fn generate_points(&mut self) -> BladeResult<&[Point2]> {
        if self.points.is_none() {
            let mut pts = PointGenerator::new(self.naca)
                .with_num_points(self.num_points)
                .generate()?;
            SectionTransform::new(self.angle_deg, self.chord, self.colinear_offset)
                .apply(&mut pts);
            self.points = Some(pts);
        }
        Ok(self.points.as_deref().unwrap_or_default())
    }

    /// Transformed boundary points, if generated.
    pub fn points(&self) -> Option<&[Point2]> {
        self.points.as_deref()
    }
}
