//! Caller decision points for warnings.

use tracing::warn;

/// Decision point for a warning the caller may veto.
///
/// `default` is the safe unattended answer; interactive adapters may ask
/// the user instead.
pub trait Consent {
    fn confirm(&mut self, warning: &str, default: bool) -> bool;
}

/// Logs the warning and takes the safe default. Suitable for scripted
/// runs.
#[derive(Debug, Default)]
pub struct Unattended;

impl Consent for Unattended {
    fn confirm(&mut self, warning: &str, default: bool) -> bool {
        warn!(warning, default, "unattended consent");
        default
    }
}

/// Accepts everything. For tests and callers that have already decided.
#[derive(Debug, Default)]
pub struct AlwaysAccept;

impl Consent for AlwaysAccept {
    fn confirm(&mut self, warning: &str, _default: bool) -> bool {
        warn!(warning, "auto-accepted");
        true
    }
}
