//! Persistable change history.
//!
//! A [`ChangeLog`] is the form in which an issue's committed change sets
//! leave the core: the persistence collaborator encodes it as JSON or
//! binary, stores it, and later restores it into a freshly loaded issue.
//!
//! This module only encodes and decodes. Where the bytes are stored, and
//! how history records are batched, belong to the persistence collaborator.

use crate::core::FieldDiffs;
use crate::issue::Issue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::ChangeLogError;

/// Version identifier for the change log format
pub const CHANGELOG_VERSION: u32 = 1;

/// Committed change sets of one issue.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use issuetrack::changelog::ChangeLog;
/// use issuetrack::core::ChangeContext;
/// use issuetrack::issue::Issue;
/// use issuetrack::updater::Updater;
///
/// let mut issue = Issue::new("ISSUE-1");
/// let context = ChangeContext::user(Utc::now(), "emmerik");
/// Updater::new().set_status(&mut issue, Some("OPEN"), &context);
/// issue.commit_current_change();
///
/// let json = ChangeLog::from_issue(&issue).to_json().unwrap();
///
/// let mut reloaded = Issue::new("ISSUE-1");
/// ChangeLog::from_json(&json).unwrap().restore_into(&mut reloaded).unwrap();
/// assert_eq!(reloaded.changes(), issue.changes());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeLog {
    /// Change log format version
    pub version: u32,

    /// Unique identifier of this snapshot
    pub id: Uuid,

    pub issue_key: String,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// Committed change sets, oldest first
    pub changes: Vec<FieldDiffs>,
}

impl ChangeLog {
    /// Snapshot the committed history of `issue`.
    ///
    /// The in-progress change set is not included; commit it first.
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            version: CHANGELOG_VERSION,
            id: Uuid::new_v4(),
            issue_key: issue.key().to_string(),
            created_at: Utc::now(),
            changes: issue.changes().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, ChangeLogError> {
        serde_json::to_string(self).map_err(|e| ChangeLogError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ChangeLogError> {
        let log: Self = serde_json::from_str(json)
            .map_err(|e| ChangeLogError::DeserializationFailed(e.to_string()))?;
        log.validate()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ChangeLogError> {
        bincode::serialize(self).map_err(|e| ChangeLogError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChangeLogError> {
        let log: Self = bincode::deserialize(bytes)
            .map_err(|e| ChangeLogError::DeserializationFailed(e.to_string()))?;
        log.validate()
    }

    /// Append the logged change sets to `issue`'s history.
    pub fn restore_into(self, issue: &mut Issue) -> Result<(), ChangeLogError> {
        if self.issue_key != issue.key() {
            return Err(ChangeLogError::IssueMismatch {
                expected: issue.key().to_string(),
                found: self.issue_key,
            });
        }
        debug!(
            issue = issue.key(),
            changes = self.changes.len(),
            "restoring change log"
        );
        for change in self.changes {
            issue.add_change(change);
        }
        Ok(())
    }

    fn validate(self) -> Result<Self, ChangeLogError> {
        if self.version != CHANGELOG_VERSION {
            return Err(ChangeLogError::UnsupportedVersion {
                found: self.version,
                supported: CHANGELOG_VERSION,
            });
        }
        Ok(self)
    }
}
