//! Section transform pipeline: shear, scale by chord, chordwise offset.

use bg_core::{Point2, Real, deg_to_rad};

/// Transform applied to unit-chord boundary points, in fixed order:
/// shear, then scale, then colinear offset.
///
/// The "rotation" is deliberately a shear about the leading edge
/// (`y += tan(angle) * x`), not a rigid rotation: it twists the section
/// while keeping the leading edge pinned at the origin, at the cost of
/// altering apparent camber. Existing blade configurations depend on
/// this, so it must not be replaced by a true rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionTransform {
    /// Twist angle in degrees (shear, see above).
    pub angle_deg: Real,
    /// Chord length; scales both coordinates.
    pub chord: Real,
    /// Added to x only, after scaling.
    pub colinear_offset: Real,
}

impl SectionTransform {
    pub fn new(angle_deg: Real, chord: Real, colinear_offset: Real) -> Self {
        Self {
            angle_deg,
            chord,
            colinear_offset,
        }
    }

    /// Apply the full pipeline in place. The shear uses the unit-chord
    /// tangent, so it must run before scaling.
    pub fn apply(&self, points: &mut [Point2]) {
        shear(points, self.angle_deg);
        scale(points, self.chord);
        offset_x(points, self.colinear_offset);
    }
}

/// Shear about the leading edge: `y += tan(angle) * x`.
pub fn shear(points: &mut [Point2], angle_deg: Real) {
    let slope = deg_to_rad(angle_deg).tan();
    for p in points {
        p.y += slope * p.x;
    }
}

/// Uniform scale of both coordinates.
pub fn scale(points: &mut [Point2], factor: Real) {
    for p in points {
        p.x *= factor;
        p.y *= factor;
    }
}

/// Chordwise offset: x only.
pub fn offset_x(points: &mut [Point2], offset: Real) {
    for p in points {
        p.x += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.06),
            Point2::new(1.0, 0.0),
        ]
    }

    #[test]
    fn shear_keeps_leading_edge_fixed() {
        let mut pts = sample();
        shear(&mut pts, 15.0);
        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        assert!((pts[2].y - deg_to_rad(15.0).tan()).abs() < 1e-12);
    }

    #[test]
    fn pipeline_matches_manual_order() {
        let angle = 20.0;
        let chord = 3.0;
        let offset = 0.7;

        let mut pts = sample();
        SectionTransform::new(angle, chord, offset).apply(&mut pts);

        let mut manual = sample();
        shear(&mut manual, angle);
        scale(&mut manual, chord);
        offset_x(&mut manual, offset);
        assert_eq!(pts, manual);

        // Scaled shear keeps the sheared leading edge on the offset line.
        assert_eq!(pts[0], Point2::new(offset, 0.0));
    }

    #[test]
    fn shear_must_precede_offset() {
        // Shearing after the chordwise offset picks up a spurious
        // `tan(angle) * offset` term on every y coordinate.
        let angle = 10.0;
        let offset = 0.7;

        let mut correct = sample();
        shear(&mut correct, angle);
        offset_x(&mut correct, offset);

        let mut wrong = sample();
        offset_x(&mut wrong, offset);
        shear(&mut wrong, angle);

        assert!((correct[0].y - wrong[0].y).abs() > 1e-6);
    }

    #[test]
    fn offset_touches_x_only() {
        let mut pts = sample();
        offset_x(&mut pts, 1.5);
        assert_eq!(pts[1], Point2::new(2.0, 0.06));
    }
}
