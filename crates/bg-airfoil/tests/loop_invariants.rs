use bg_airfoil::{Naca4, PointGenerator};
use proptest::prelude::*;

proptest! {
    #[test]
    fn closed_loop_for_any_code(m in 0u8..=9, p in 0u8..=9, t in 1u8..=40, n in 2usize..=64) {
        let naca = Naca4::from_components(m, p, t).unwrap();
        let pts = PointGenerator::new(naca)
            .with_num_points(n)
            .generate()
            .unwrap();

        prop_assert_eq!(pts.len(), 2 * n + 1);

        let first = pts[0];
        let last = pts[pts.len() - 1];
        prop_assert!((first.x - last.x).abs() < 1e-9);
        prop_assert!((first.y - last.y).abs() < 1e-9);

        // Leading edge pinned at the origin
        prop_assert!(pts[n].x.abs() < 1e-12);
        prop_assert!(pts[n].y.abs() < 1e-12);

        for pt in &pts {
            prop_assert!(pt.x.is_finite() && pt.y.is_finite());
        }
    }

    #[test]
    fn interpolation_stays_in_digit_range(
        a in 0u32..=9999, b in 0u32..=9999, s in 0.0f64..=1.0
    ) {
        let na = Naca4::from_code(a).unwrap();
        let nb = Naca4::from_code(b).unwrap();
        let mid = na.interpolate(&nb, s);
        prop_assert!(mid.m() <= 9);
        prop_assert!(mid.p() <= 9);
        prop_assert!(mid.t() <= 99);
    }
}
