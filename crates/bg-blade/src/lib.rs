//! bg-blade: blade assembly and rotor orchestration.
//!
//! Contains:
//! - config (interpolatable radial slice specifications)
//! - kernel (host CAD capability trait + opaque handles)
//! - record (op-logging kernel adapter)
//! - profile (realized sections with rail anchors)
//! - blade (sequential build state machine)
//! - rotor (multi-blade build + shaft sizing)

pub mod blade;
pub mod config;
pub mod kernel;
pub mod profile;
pub mod record;
pub mod rotor;

pub use blade::{Blade, BladeExtents, BuildStage};
pub use config::ProfileConfig;
pub use kernel::{CadKernel, KernelError, KernelResult, LoftOptions};
pub use profile::{Profile, RailConvention};
pub use record::{ConstructionOp, RecordingKernel};
pub use bg_core::{AlwaysAccept, Consent, Unattended};
pub use rotor::{Rotor, ShaftSpec};

use thiserror::Error;

pub type BladeResult<T> = Result<T, BladeError>;

#[derive(Error, Debug)]
pub enum BladeError {
    #[error("Bad NACA code: {0}")]
    Naca(#[from] bg_airfoil::NacaError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] bg_core::BgError),

    #[error("Host construction failed: {0}")]
    Kernel(#[from] kernel::KernelError),

    #[error("Build stage out of order: expected {expected:?}, found {found:?}")]
    StageOutOfOrder {
        expected: BuildStage,
        found: BuildStage,
    },

    #[error("Blade {blade_no} has no profiles to build")]
    NoProfiles { blade_no: usize },

    #[error("Build aborted: {what}")]
    Aborted { what: String },
}
