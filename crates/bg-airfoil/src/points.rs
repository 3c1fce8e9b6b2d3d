//! Closed-form NACA4 boundary point generation.
//!
//! Produces the ordered closed loop used for sketch splines and mesh
//! scripts: upper surface from trailing edge to leading edge, then lower
//! surface leading edge to trailing edge, with the duplicate leading-edge
//! point dropped. For `n` sample abscissas the output holds `2n+1` points
//! and starts/ends at the trailing edge.

use crate::naca::Naca4;
use bg_core::{BgError, BgResult, Point2, Real};

// Thickness polynomial coefficients (standard NACA4 definition).
const A0: Real = 0.2969;
const A1: Real = -0.1260;
const A2: Real = -0.3516;
const A3: Real = 0.2843;
const A4_SHARP: Real = -0.1036;
const A4_FINITE: Real = -0.1015;

pub const DEFAULT_NUM_POINTS: usize = 100;
pub const DEFAULT_FINITE_TE: bool = false;
pub const DEFAULT_HALF_COSINE_SPACING: bool = true;

/// Boundary point generator for one NACA4 section on a unit chord.
#[derive(Clone, Copy, Debug)]
pub struct PointGenerator {
    pub naca: Naca4,
    pub num_points: usize,
    pub finite_te: bool,
    pub half_cosine_spacing: bool,
}

impl PointGenerator {
    pub fn new(naca: Naca4) -> Self {
        Self {
            naca,
            num_points: DEFAULT_NUM_POINTS,
            finite_te: DEFAULT_FINITE_TE,
            half_cosine_spacing: DEFAULT_HALF_COSINE_SPACING,
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn with_finite_te(mut self, finite_te: bool) -> Self {
        self.finite_te = finite_te;
        self
    }

    pub fn with_half_cosine_spacing(mut self, half_cosine_spacing: bool) -> Self {
        self.half_cosine_spacing = half_cosine_spacing;
        self
    }

    /// Generate the closed boundary loop. Pure and deterministic; the
    /// leading edge is always at (0, 0).
    pub fn generate(&self) -> BgResult<Vec<Point2>> {
        if self.num_points < 2 {
            return Err(BgError::InvalidArg {
                what: "num_points must be at least 2",
            });
        }
        let n = self.num_points;

        let m = self.naca.m() as Real / 100.0;
        let p = self.naca.p() as Real / 10.0;
        let t = self.naca.t() as Real / 100.0;

        let a4 = if self.finite_te { A4_FINITE } else { A4_SHARP };

        // Sample abscissas on [0, 1]; half-cosine spacing concentrates
        // points near both edges.
        let x: Vec<Real> = (0..=n)
            .map(|i| {
                let s = i as Real / n as Real;
                if self.half_cosine_spacing {
                    let beta = core::f64::consts::PI * s;
                    0.5 * (1.0 - beta.cos())
                } else {
                    s
                }
            })
            .collect();

        let yt: Vec<Real> = x
            .iter()
            .map(|&xi| {
                5.0 * t
                    * (A0 * xi.sqrt() + A1 * xi + A2 * xi * xi + A3 * xi.powi(3) + a4 * xi.powi(4))
            })
            .collect();

        let mut upper = Vec::with_capacity(n + 1);
        let mut lower = Vec::with_capacity(n + 1);

        if self.naca.p() == 0 {
            // Symmetric section: the camber polynomials divide by p^2, so
            // this branch must bypass them entirely.
            for (&xi, &yti) in x.iter().zip(&yt) {
                upper.push(Point2::new(xi, yti));
                lower.push(Point2::new(xi, -yti));
            }
        } else {
            for (&xi, &yti) in x.iter().zip(&yt) {
                let (zc, dzc_dx) = if xi <= p {
                    (
                        m / (p * p) * xi * (2.0 * p - xi),
                        2.0 * m / (p * p) * (p - xi),
                    )
                } else {
                    let q = 1.0 - p;
                    (
                        m / (q * q) * (1.0 - 2.0 * p + xi) * (1.0 - xi),
                        2.0 * m / (q * q) * (p - xi),
                    )
                };
                let theta = dzc_dx.atan();
                upper.push(Point2::new(
                    xi - yti * theta.sin(),
                    zc + yti * theta.cos(),
                ));
                lower.push(Point2::new(
                    xi + yti * theta.sin(),
                    zc - yti * theta.cos(),
                ));
            }
        }

        // reverse(upper) ++ lower[1:] closes the loop trailing edge to
        // trailing edge without duplicating the leading edge.
        let mut points = Vec::with_capacity(2 * n + 1);
        points.extend(upper.into_iter().rev());
        points.extend(lower.into_iter().skip(1));
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_pts(code: &str, n: usize) -> Vec<Point2> {
        PointGenerator::new(Naca4::parse(code).unwrap())
            .with_num_points(n)
            .generate()
            .unwrap()
    }

    #[test]
    fn output_shape_is_2n_plus_1() {
        for n in [2, 4, 17, 100] {
            assert_eq!(gen_pts("2412", n).len(), 2 * n + 1);
            assert_eq!(gen_pts("0012", n).len(), 2 * n + 1);
        }
    }

    #[test]
    fn rejects_too_few_points() {
        let r = PointGenerator::new(Naca4::parse("0012").unwrap())
            .with_num_points(1)
            .generate();
        assert!(r.is_err());
    }

    #[test]
    fn closed_loop_at_trailing_edge() {
        let pts = gen_pts("2412", 50);
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!((first.x - last.x).abs() < 1e-9);
        assert!((first.y - last.y).abs() < 1e-9);
        assert!((first.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn leading_edge_at_origin() {
        // The x=0 abscissa lands at index n in the output loop.
        for code in ["0012", "4415"] {
            let n = 40;
            let pts = gen_pts(code, n);
            assert!(pts[n].x.abs() < 1e-12);
            assert!(pts[n].y.abs() < 1e-12);
        }
    }

    #[test]
    fn symmetric_section_mirrors() {
        let n = 30;
        let pts = gen_pts("0012", n);
        // upper half is pts[..=n] reversed, lower half is pts[n..]
        for i in 0..=n {
            let upper = pts[n - i];
            let lower = pts[n + i];
            assert!((upper.x - lower.x).abs() < 1e-12);
            assert!((upper.y + lower.y).abs() < 1e-12);
        }
    }

    #[test]
    fn end_to_end_naca0012_four_points() {
        let pts = gen_pts("0012", 4);
        assert_eq!(pts.len(), 9);
        assert!((pts[0].x - 1.0).abs() < 1e-9 && pts[0].y.abs() < 1e-3);
        assert!((pts[8].x - 1.0).abs() < 1e-9 && pts[8].y.abs() < 1e-3);
        assert!(pts[4].x.abs() < 1e-12 && pts[4].y.abs() < 1e-12);
    }

    #[test]
    fn finite_te_is_thicker_at_trailing_edge() {
        let sharp = gen_pts("0012", 20);
        let finite = PointGenerator::new(Naca4::parse("0012").unwrap())
            .with_num_points(20)
            .with_finite_te(true)
            .generate()
            .unwrap();
        assert!(finite[0].y > sharp[0].y);
    }

    #[test]
    fn uniform_spacing_is_uniform() {
        let pts = PointGenerator::new(Naca4::parse("0012").unwrap())
            .with_num_points(4)
            .with_half_cosine_spacing(false)
            .generate()
            .unwrap();
        // lower surface abscissas run 0.25, 0.5, 0.75, 1.0 after the LE
        let xs: Vec<f64> = pts[5..].iter().map(|p| p.x).collect();
        for (i, &x) in xs.iter().enumerate() {
            assert!((x - 0.25 * (i as f64 + 1.0)).abs() < 1e-12);
        }
    }
}
