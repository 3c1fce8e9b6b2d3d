use crate::BgError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, BgError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BgError::NonFinite { what, value: v })
    }
}

/// Linear interpolation between two scalars at parameter `t` in [0, 1].
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    a + t * (b - a)
}
