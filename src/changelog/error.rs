//! Change log error types.

use thiserror::Error;

/// Errors that can occur while encoding or restoring a change log
#[derive(Debug, Error)]
pub enum ChangeLogError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Change log version is not supported by this version
    #[error("Unsupported change log version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The log belongs to a different issue
    #[error("Change log for issue '{found}' cannot be restored into '{expected}'")]
    IssueMismatch { expected: String, found: String },
}
