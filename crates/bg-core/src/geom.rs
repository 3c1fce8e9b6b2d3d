//! Geometry aliases shared across the workspace.

use crate::numeric::Real;

/// 2D section-space point (chordwise x, thickness y).
pub type Point2 = nalgebra::Point2<Real>;
/// 3D model-space point.
pub type Point3 = nalgebra::Point3<Real>;
/// 3D translation / axis vector.
pub type Vec3 = nalgebra::Vector3<Real>;

/// Degrees to radians.
pub fn deg_to_rad(deg: Real) -> Real {
    deg * core::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deg_to_rad_quarter_turn() {
        assert!((deg_to_rad(90.0) - core::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }
}
