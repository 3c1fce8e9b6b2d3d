//! gmsh `.geo` script emission for one airfoil section.

use bg_core::{Point2, Real};
use std::fmt::Write;

/// Round to 8 decimal places; keeps the emitted script stable across
/// platforms.
fn round8(v: Real) -> Real {
    (v * 1e8).round() / 1e8
}

/// Emit the geometry script for a closed airfoil loop: one point per
/// boundary sample at mesh size `h`, a closing spline, a curve loop and
/// plane surface, then a rotation by `-alpha` about the origin and a
/// vertical recentering translation of `sin(alpha)/2`.
pub fn airfoil_geo(points: &[Point2], h: Real, alpha_rad: Real) -> String {
    let n = points.len();
    let mut code = String::new();

    let _ = writeln!(code, "h = {h};");
    for (i, p) in points.iter().enumerate() {
        let _ = writeln!(code, "Point({i}) = {{{}, {}, 0, h}};", round8(p.x), round8(p.y));
    }

    // closing spline threads every point and returns to 0
    let sequence: Vec<String> = (0..n).chain([0]).map(|i| i.to_string()).collect();
    let _ = writeln!(code, "Spline({n}) = {{{}}};", sequence.join(", "));
    let _ = writeln!(code, "Curve Loop({}) = {{{n}}};", n + 1);
    let _ = writeln!(code, "Plane Surface({}) = {{{}}};", n + 2, n + 1);

    // rotate + center the airfoil
    let _ = writeln!(
        code,
        "Rotate {{ {{0, 0, 1}}, {{0, 0, 0}}, -{alpha_rad} }} {{ Surface{{{}}}; Curve{{{n}}}; }}",
        n + 2
    );
    let _ = writeln!(
        code,
        "Translate {{ 0, {}, 0 }} {{ Surface{{{}}}; Curve{{{n}}}; }}",
        alpha_rad.sin() / 2.0,
        n + 2
    );

    code
}
