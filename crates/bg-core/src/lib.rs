//! bg-core: stable foundation for bladegen.
//!
//! Contains:
//! - geom (nalgebra point/vector aliases + angle helpers)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for host-kernel entities)
//! - consent (caller decision points for warnings)
//! - error (shared error types)

pub mod consent;
pub mod error;
pub mod geom;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use consent::{AlwaysAccept, Consent, Unattended};
pub use error::{BgError, BgResult};
pub use geom::*;
pub use ids::*;
pub use numeric::*;
