//! Field update policies.
//!
//! The [`Updater`] is stateless: each operation reads the issue's current
//! value, applies that field's policy, and mutates the issue in place. It
//! returns whether anything observable changed and leaves persistence and
//! notification dispatch to the caller.
//!
//! Operations come in three shapes:
//!
//! - **Interactive** updates (`assign`, `set_status`, ...) change the value,
//!   record a diff when the field is audited, and notify per
//!   [`NOTIFICATION_POLICY`].
//! - **Past** updates (`set_past_*`) replay a historical value. They never
//!   override the current value. Severity and technical debt record a diff
//!   from the past value to the current one; the others only report whether
//!   the values differ.
//! - The **manual severity** override, which sticks: once set, automated
//!   severity updates fail with [`UpdateError::ManualSeverityOverride`].
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use issuetrack::core::ChangeContext;
//! use issuetrack::issue::{Issue, User};
//! use issuetrack::updater::{Updater, ASSIGNEE};
//!
//! let updater = Updater::new();
//! let context = ChangeContext::user(Utc::now(), "emmerik");
//! let mut issue = Issue::new("ISSUE-1");
//!
//! let user = User::new("emmerik", "Emmerik");
//! assert!(updater.assign(&mut issue, Some(&user), &context));
//! assert!(issue.must_send_notifications());
//!
//! let diff = issue.current_change().and_then(|c| c.get(ASSIGNEE)).unwrap();
//! assert_eq!(diff.new_value().as_text(), Some("Emmerik"));
//! ```

pub mod error;
pub mod policy;

pub use error::UpdateError;
pub use policy::{
    must_notify, Field, ACTION_PLAN, ASSIGNEE, AUTHOR, EFFORT_TO_FIX, LINE, MESSAGE,
    NOTIFICATION_POLICY, RESOLUTION, SEVERITY, STATUS, TECHNICAL_DEBT,
};

use crate::core::{ChangeContext, DiffValue, UNUSED};
use crate::issue::{ActionPlan, Issue, User};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Stateless policy engine applying field updates to an [`Issue`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Updater;

impl Updater {
    pub fn new() -> Self {
        Self
    }

    /// Assign the issue to `user`, or unassign it with `None`.
    ///
    /// Compared by login; an empty login counts as unassigned. The diff shows
    /// the user's display name.
    pub fn assign(&self, issue: &mut Issue, user: Option<&User>, context: &ChangeContext) -> bool {
        let login = user
            .map(|u| u.login.as_str())
            .filter(|login| !login.is_empty());
        if login == issue.assignee() {
            trace!(issue = issue.key(), "assignee unchanged");
            return false;
        }
        let name = user.map(|u| u.name.as_str());
        issue.set_assignee(login);
        self.record(issue, context, Field::Assignee, ASSIGNEE, UNUSED, name.into());
        true
    }

    /// Automated severity change.
    ///
    /// Fails without touching the issue when severity was set manually.
    /// `None` clears the severity.
    pub fn set_severity(
        &self,
        issue: &mut Issue,
        severity: Option<&str>,
        context: &ChangeContext,
    ) -> Result<bool, UpdateError> {
        self.ensure_not_manual(issue, severity)?;
        if issue.severity() == severity {
            trace!(issue = issue.key(), "severity unchanged");
            return Ok(false);
        }
        let old = issue.severity().map(str::to_string);
        issue.set_severity(severity);
        self.record(issue, context, Field::Severity, SEVERITY, old.into(), severity.into());
        Ok(true)
    }

    /// Replay a historical severity, keeping the current one.
    ///
    /// Records `previous -> current` when they differ.
    pub fn set_past_severity(
        &self,
        issue: &mut Issue,
        previous: Option<&str>,
        context: &ChangeContext,
    ) -> Result<bool, UpdateError> {
        self.ensure_not_manual(issue, previous)?;
        if issue.severity() == previous {
            return Ok(false);
        }
        let current = issue.severity().map(str::to_string);
        self.record(issue, context, Field::Severity, SEVERITY, previous.into(), current.into());
        Ok(true)
    }

    /// Human severity override. Marks the severity as manual and notifies.
    pub fn set_manual_severity(
        &self,
        issue: &mut Issue,
        severity: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.manual_severity() && issue.severity() == severity {
            trace!(issue = issue.key(), "manual severity unchanged");
            return false;
        }
        let old = issue.severity().map(str::to_string);
        issue.set_severity(severity).set_manual_severity(true);
        self.record(
            issue,
            context,
            Field::ManualSeverity,
            SEVERITY,
            old.into(),
            severity.into(),
        );
        true
    }

    /// Line changes are not part of the audited history.
    pub fn set_line(&self, issue: &mut Issue, line: Option<u32>) -> bool {
        if issue.line() == line {
            return false;
        }
        issue.set_line(line).set_changed(true);
        self.apply_policy(issue, Field::Line);
        true
    }

    pub fn set_past_line(&self, issue: &mut Issue, previous: Option<u32>) -> bool {
        issue.line() != previous
    }

    pub fn set_resolution(
        &self,
        issue: &mut Issue,
        resolution: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.resolution() == resolution {
            trace!(issue = issue.key(), "resolution unchanged");
            return false;
        }
        let old = issue.resolution().map(str::to_string);
        issue.set_resolution(resolution);
        self.record(issue, context, Field::Resolution, RESOLUTION, old.into(), resolution.into());
        true
    }

    pub fn set_status(
        &self,
        issue: &mut Issue,
        status: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.status() == status {
            trace!(issue = issue.key(), "status unchanged");
            return false;
        }
        let old = issue.status().map(str::to_string);
        issue.set_status(status);
        self.record(issue, context, Field::Status, STATUS, old.into(), status.into());
        true
    }

    /// Set or clear (`None`) an ad-hoc attribute. The diff is keyed by `key`.
    pub fn set_attribute(
        &self,
        issue: &mut Issue,
        key: &str,
        value: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.attribute(key) == value {
            trace!(issue = issue.key(), attribute = key, "attribute unchanged");
            return false;
        }
        let old = issue.attribute(key).map(str::to_string);
        issue.set_attribute(key, value);
        self.record(issue, context, Field::Attribute, key, old.into(), value.into());
        true
    }

    /// Schedule the issue into `plan`, or unplan it with `None`.
    ///
    /// Compared by plan key. The diff shows the plan name.
    pub fn plan(
        &self,
        issue: &mut Issue,
        plan: Option<&ActionPlan>,
        context: &ChangeContext,
    ) -> bool {
        let key = plan.map(ActionPlan::key);
        if issue.action_plan_key() == key {
            trace!(issue = issue.key(), "action plan unchanged");
            return false;
        }
        let name = plan.map(ActionPlan::name);
        issue.set_action_plan_key(key);
        self.record(issue, context, Field::ActionPlan, ACTION_PLAN, UNUSED, name.into());
        true
    }

    pub fn set_effort_to_fix(
        &self,
        issue: &mut Issue,
        effort: Option<f64>,
        context: &ChangeContext,
    ) -> bool {
        if issue.effort_to_fix() == effort {
            return false;
        }
        issue.set_effort_to_fix(effort);
        self.touch(issue, context);
        self.apply_policy(issue, Field::EffortToFix);
        true
    }

    pub fn set_past_effort_to_fix(
        &self,
        issue: &mut Issue,
        previous: Option<f64>,
        _context: &ChangeContext,
    ) -> bool {
        issue.effort_to_fix() != previous
    }

    pub fn set_technical_debt(
        &self,
        issue: &mut Issue,
        debt: Option<Duration>,
        context: &ChangeContext,
    ) -> bool {
        let old = issue.debt();
        if old == debt {
            return false;
        }
        issue.set_debt(debt);
        self.record(issue, context, Field::TechnicalDebt, TECHNICAL_DEBT, old.into(), debt.into());
        true
    }

    /// Backfill debt history: records `previous -> current` and keeps the
    /// current debt, which may itself be absent.
    pub fn set_past_technical_debt(
        &self,
        issue: &mut Issue,
        previous: Option<Duration>,
        context: &ChangeContext,
    ) -> bool {
        let current = issue.debt();
        issue.set_debt(previous);
        self.set_technical_debt(issue, current, context)
    }

    pub fn set_message(
        &self,
        issue: &mut Issue,
        message: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.message() == message {
            return false;
        }
        issue.set_message(message);
        self.touch(issue, context);
        self.apply_policy(issue, Field::Message);
        true
    }

    pub fn set_past_message(
        &self,
        issue: &mut Issue,
        previous: Option<&str>,
        _context: &ChangeContext,
    ) -> bool {
        issue.message() != previous
    }

    pub fn set_author_login(
        &self,
        issue: &mut Issue,
        login: Option<&str>,
        context: &ChangeContext,
    ) -> bool {
        if issue.author_login() == login {
            return false;
        }
        let old = issue.author_login().map(str::to_string);
        issue.set_author_login(login);
        self.record(issue, context, Field::Author, AUTHOR, old.into(), login.into());
        true
    }

    fn ensure_not_manual(&self, issue: &Issue, attempted: Option<&str>) -> Result<(), UpdateError> {
        if !issue.manual_severity() {
            return Ok(());
        }
        warn!(
            issue = issue.key(),
            current = issue.severity(),
            attempted,
            "automated severity change blocked by manual override"
        );
        Err(UpdateError::ManualSeverityOverride {
            issue: issue.key().to_string(),
            current: issue.severity().map(str::to_string),
            attempted: attempted.map(str::to_string),
        })
    }

    fn record(
        &self,
        issue: &mut Issue,
        context: &ChangeContext,
        field: Field,
        key: &str,
        old_value: DiffValue,
        new_value: DiffValue,
    ) {
        debug!(
            issue = issue.key(),
            field = key,
            old = %old_value,
            new = %new_value,
            "field changed"
        );
        issue.set_field_change(context, key, old_value, new_value);
        self.touch(issue, context);
        self.apply_policy(issue, field);
    }

    fn touch(&self, issue: &mut Issue, context: &ChangeContext) {
        issue.set_update_date(Some(context.date())).set_changed(true);
    }

    // Only ever raises the flag.
    fn apply_policy(&self, issue: &mut Issue, field: Field) {
        if must_notify(field) && !issue.must_send_notifications() {
            debug!(issue = issue.key(), ?field, "notification required");
            issue.set_send_notifications(true);
        }
    }
}
