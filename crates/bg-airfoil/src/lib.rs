//! bg-airfoil: NACA 4-digit airfoil model and section geometry.
//!
//! Contains:
//! - naca (4-digit code parse/format/interpolation)
//! - points (closed-form boundary point generation)
//! - transform (shear/scale/offset section pipeline)

pub mod naca;
pub mod points;
pub mod transform;

pub use naca::{Naca4, NacaError};
pub use points::PointGenerator;
pub use transform::SectionTransform;
