//! Issuetrack: field-level change tracking for issues
//!
//! Issuetrack decides, field by field, what happens when an issue is
//! updated: whether the value really changed, whether the change is allowed,
//! whether it belongs in the audited history, and whether users must be
//! notified. It performs no I/O. Storing history and sending notifications
//! are left to the caller.
//!
//! # Core Concepts
//!
//! - **Issue**: current field values plus the transaction's change set
//! - **Updater**: stateless per-field update policies
//! - **Diffs**: old/new pairs, with an `UNUSED` sentinel distinct from empty
//! - **Change log**: versioned, serializable history for persistence
//!
//! # Example
//!
//! ```rust
//! use issuetrack::core::ChangeContext;
//! use issuetrack::issue::Issue;
//! use issuetrack::updater::{Updater, SEVERITY};
//! use chrono::Utc;
//!
//! let updater = Updater::new();
//! let context = ChangeContext::user(Utc::now(), "emmerik");
//!
//! let mut issue = Issue::new("ISSUE-1");
//! issue.set_severity(Some("BLOCKER"));
//!
//! assert!(updater.set_manual_severity(&mut issue, Some("MINOR"), &context));
//! assert!(issue.must_send_notifications());
//!
//! let diff = issue.current_change().and_then(|c| c.get(SEVERITY)).unwrap();
//! assert_eq!(diff.old_value().as_text(), Some("BLOCKER"));
//!
//! // Automated reclassification can no longer touch it.
//! assert!(updater.set_severity(&mut issue, Some("MAJOR"), &context).is_err());
//! ```

pub mod changelog;
pub mod core;
pub mod issue;
pub mod updater;

// Re-export commonly used types
pub use changelog::{ChangeLog, ChangeLogError};
pub use crate::core::{ChangeContext, Diff, DiffValue, FieldDiffs, FieldValue, UNUSED};
pub use issue::{ActionPlan, Issue, User};
pub use updater::{UpdateError, Updater};
