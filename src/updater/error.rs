//! Update policy violations.

use thiserror::Error;

/// Errors raised when an update would break an issue invariant.
///
/// These are fatal for the caller's transaction: nothing the updater did in
/// the failing call was applied, but earlier calls in the same transaction
/// must not be persisted either.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// Severity was set manually and an automated path tried to change it.
    #[error("Severity can't be changed")]
    ManualSeverityOverride {
        issue: String,
        current: Option<String>,
        attempted: Option<String>,
    },
}
