//! Interpolatable radial slice specifications.

use crate::BladeResult;
use bg_airfoil::Naca4;
use bg_core::{Real, lerp};
use bg_project::ProfileDef;

/// One radial slice of a blade: where it sits, which section, how big,
/// how twisted. Created once per configured profile; further instances
/// are synthesized by interpolation and the full list sorted by
/// `radial_offset` before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileConfig {
    pub radial_offset: Real,
    pub naca: Naca4,
    pub c: Real,
    /// Twist angle in degrees.
    pub angle: Real,
    pub colinear_offset: Real,
}

impl ProfileConfig {
    pub fn from_def(def: &ProfileDef) -> BladeResult<Self> {
        Ok(Self {
            radial_offset: def.radial_offset,
            naca: Naca4::parse(&def.naca)?,
            c: def.c,
            angle: def.angle,
            colinear_offset: def.colinear_offset,
        })
    }

    /// Field-wise linear interpolation at `t` in [0, 1], including the
    /// nested NACA lerp.
    pub fn interpolate(&self, other: &ProfileConfig, t: Real) -> ProfileConfig {
        ProfileConfig {
            radial_offset: lerp(self.radial_offset, other.radial_offset, t),
            naca: self.naca.interpolate(&other.naca, t),
            c: lerp(self.c, other.c, t),
            angle: lerp(self.angle, other.angle, t),
            colinear_offset: lerp(self.colinear_offset, other.colinear_offset, t),
        }
    }
}

/// Synthesize `intermediate` evenly spaced configs between every adjacent
/// pair in the original (pre-sort) order, then sort the whole list
/// ascending by radial offset. No-op when `intermediate` is 0.
pub fn insert_intermediates(configs: &mut Vec<ProfileConfig>, intermediate: usize) {
    if intermediate == 0 {
        return;
    }
    let original_len = configs.len();
    for i in 0..original_len.saturating_sub(1) {
        for j in 1..=intermediate {
            let t = j as Real / (intermediate + 1) as Real;
            let synthesized = configs[i].interpolate(&configs[i + 1], t);
            configs.push(synthesized);
        }
    }
    configs.sort_by(|a, b| a.radial_offset.total_cmp(&b.radial_offset));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(radial_offset: Real, naca: &str, c: Real, angle: Real) -> ProfileConfig {
        ProfileConfig {
            radial_offset,
            naca: Naca4::parse(naca).unwrap(),
            c,
            angle,
            colinear_offset: 0.1 * radial_offset,
        }
    }

    #[test]
    fn interpolation_endpoints_are_exact() {
        let a = cfg(0.0, "2412", 1.2, 25.0);
        let b = cfg(3.0, "0012", 0.6, 8.0);
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
    }

    #[test]
    fn interpolation_midpoint_blends_fields() {
        let a = cfg(0.0, "2412", 1.2, 25.0);
        let b = cfg(3.0, "0012", 0.6, 8.0);
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.radial_offset - 1.5).abs() < 1e-12);
        assert!((mid.c - 0.9).abs() < 1e-12);
        assert!((mid.angle - 16.5).abs() < 1e-12);
        assert_eq!(mid.naca.code(), "1212");
    }

    #[test]
    fn intermediates_sorted_by_radial_offset() {
        let mut configs = vec![
            cfg(0.0, "2412", 1.2, 25.0),
            cfg(3.0, "0012", 0.6, 8.0),
            cfg(1.5, "4415", 0.9, 15.0),
        ];
        insert_intermediates(&mut configs, 2);
        // 3 originals + 2 per adjacent pair (2 pairs in pre-sort order)
        assert_eq!(configs.len(), 7);
        for pair in configs.windows(2) {
            assert!(pair[0].radial_offset <= pair[1].radial_offset);
        }
    }

    #[test]
    fn zero_intermediates_is_a_noop() {
        let mut configs = vec![cfg(2.0, "2412", 1.0, 10.0), cfg(0.0, "0012", 0.5, 5.0)];
        let before = configs.clone();
        insert_intermediates(&mut configs, 0);
        // untouched, not even sorted
        assert_eq!(configs, before);
    }

    #[test]
    fn intermediates_span_pairs_in_original_order() {
        let mut configs = vec![cfg(0.0, "0012", 1.0, 0.0), cfg(2.0, "0012", 2.0, 0.0)];
        insert_intermediates(&mut configs, 1);
        assert_eq!(configs.len(), 3);
        let mid = configs[1];
        assert!((mid.radial_offset - 1.0).abs() < 1e-12);
        assert!((mid.c - 1.5).abs() < 1e-12);
    }
}
