//! The issue entity.
//!
//! An [`Issue`] holds current field values plus the bookkeeping the updater
//! maintains: the in-progress change set, the committed change history, the
//! "changed" marker and the "send notifications" flag.
//!
//! Setters here apply no policy and record no diff. Loaders and tests use
//! them to put an issue into a known state; policy-aware mutation goes
//! through [`Updater`](crate::updater::Updater).
//!
//! # Example
//!
//! ```rust
//! use issuetrack::issue::Issue;
//!
//! let mut issue = Issue::new("ISSUE-1");
//! issue
//!     .set_severity(Some("MAJOR"))
//!     .set_status(Some("OPEN"))
//!     .set_line(Some(42));
//!
//! assert_eq!(issue.severity(), Some("MAJOR"));
//! assert!(!issue.is_changed());
//! assert!(issue.current_change().is_none());
//! ```

mod refs;

pub use refs::{ActionPlan, User};

use crate::core::{ChangeContext, DiffValue, FieldDiffs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A tracked issue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    key: String,
    severity: Option<String>,
    manual_severity: bool,
    message: Option<String>,
    line: Option<u32>,
    effort_to_fix: Option<f64>,
    debt: Option<Duration>,
    status: Option<String>,
    resolution: Option<String>,
    assignee: Option<String>,
    author_login: Option<String>,
    action_plan_key: Option<String>,
    attributes: BTreeMap<String, String>,
    update_date: Option<DateTime<Utc>>,
    current_change: Option<FieldDiffs>,
    changes: Vec<FieldDiffs>,
    changed: bool,
    send_notifications: bool,
}

impl Issue {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    pub fn set_severity(&mut self, severity: Option<&str>) -> &mut Self {
        self.severity = severity.map(str::to_string);
        self
    }

    /// Whether severity was set by a human and must not be recomputed.
    pub fn manual_severity(&self) -> bool {
        self.manual_severity
    }

    pub fn set_manual_severity(&mut self, manual: bool) -> &mut Self {
        self.manual_severity = manual;
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: Option<&str>) -> &mut Self {
        self.message = message.map(str::to_string);
        self
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn set_line(&mut self, line: Option<u32>) -> &mut Self {
        self.line = line;
        self
    }

    pub fn effort_to_fix(&self) -> Option<f64> {
        self.effort_to_fix
    }

    pub fn set_effort_to_fix(&mut self, effort: Option<f64>) -> &mut Self {
        self.effort_to_fix = effort;
        self
    }

    /// Technical debt.
    pub fn debt(&self) -> Option<Duration> {
        self.debt
    }

    pub fn set_debt(&mut self, debt: Option<Duration>) -> &mut Self {
        self.debt = debt;
        self
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: Option<&str>) -> &mut Self {
        self.status = status.map(str::to_string);
        self
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    pub fn set_resolution(&mut self, resolution: Option<&str>) -> &mut Self {
        self.resolution = resolution.map(str::to_string);
        self
    }

    /// Login of the assigned user.
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn set_assignee(&mut self, login: Option<&str>) -> &mut Self {
        self.assignee = login.map(str::to_string);
        self
    }

    pub fn author_login(&self) -> Option<&str> {
        self.author_login.as_deref()
    }

    pub fn set_author_login(&mut self, login: Option<&str>) -> &mut Self {
        self.author_login = login.map(str::to_string);
        self
    }

    pub fn action_plan_key(&self) -> Option<&str> {
        self.action_plan_key.as_deref()
    }

    pub fn set_action_plan_key(&mut self, key: Option<&str>) -> &mut Self {
        self.action_plan_key = key.map(str::to_string);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an ad-hoc attribute. `None` removes it.
    pub fn set_attribute(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => {
                self.attributes.insert(key.to_string(), v.to_string());
            }
            None => {
                self.attributes.remove(key);
            }
        }
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn update_date(&self) -> Option<DateTime<Utc>> {
        self.update_date
    }

    pub fn set_update_date(&mut self, date: Option<DateTime<Utc>>) -> &mut Self {
        self.update_date = date;
        self
    }

    /// Whether any update has changed this issue since it was loaded.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) -> &mut Self {
        self.changed = changed;
        self
    }

    pub fn must_send_notifications(&self) -> bool {
        self.send_notifications
    }

    /// The notification collaborator resets this after dispatch.
    pub fn set_send_notifications(&mut self, send: bool) -> &mut Self {
        self.send_notifications = send;
        self
    }

    /// Change set of the transaction in progress, if any field changed.
    pub fn current_change(&self) -> Option<&FieldDiffs> {
        self.current_change.as_ref()
    }

    /// Record a field diff in the current change set.
    ///
    /// Equal values are ignored. The change set is opened from `context` on
    /// the first recorded diff of a transaction.
    pub fn set_field_change(
        &mut self,
        context: &ChangeContext,
        field: &str,
        old_value: DiffValue,
        new_value: DiffValue,
    ) -> &mut Self {
        if old_value != new_value {
            self.current_change
                .get_or_insert_with(|| FieldDiffs::new(context))
                .set_diff(field, old_value, new_value);
        }
        self
    }

    /// Remove and return the current change set, ending the transaction.
    pub fn take_current_change(&mut self) -> Option<FieldDiffs> {
        self.current_change.take()
    }

    /// Move the current change set into the committed history.
    ///
    /// Returns `false` when there was nothing to commit.
    pub fn commit_current_change(&mut self) -> bool {
        match self.current_change.take() {
            Some(change) => {
                self.changes.push(change);
                true
            }
            None => false,
        }
    }

    /// Append a change set loaded from history.
    pub fn add_change(&mut self, change: FieldDiffs) -> &mut Self {
        self.changes.push(change);
        self
    }

    /// Committed change sets, oldest first.
    pub fn changes(&self) -> &[FieldDiffs] {
        &self.changes
    }
}
