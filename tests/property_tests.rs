//! Property-based tests for the update policies.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated issues and update sequences.

use chrono::Utc;
use issuetrack::core::ChangeContext;
use issuetrack::issue::{ActionPlan, Issue, User};
use issuetrack::updater::Updater;
use proptest::prelude::*;
use std::time::Duration;

fn context() -> ChangeContext {
    ChangeContext::user(Utc::now(), "emmerik")
}

prop_compose! {
    fn arbitrary_text()(variant in 0..4u8) -> Option<String> {
        match variant {
            0 => None,
            1 => Some("OPEN".to_string()),
            2 => Some("CLOSED".to_string()),
            _ => Some("RESOLVED".to_string()),
        }
    }
}

prop_compose! {
    fn arbitrary_issue()(
        severity in arbitrary_text(),
        status in arbitrary_text(),
        message in arbitrary_text(),
        line in prop::option::of(1..500u32),
        effort in prop::option::of(0..20u8),
        debt in prop::option::of(0..100u64),
    ) -> Issue {
        let mut issue = Issue::new("ISSUE-1");
        issue
            .set_severity(severity.as_deref())
            .set_status(status.as_deref())
            .set_message(message.as_deref())
            .set_line(line)
            .set_effort_to_fix(effort.map(f64::from))
            .set_debt(debt.map(|h| Duration::from_secs(h * 3600)));
        issue
    }
}

/// One interactive update, identified by the field it touches.
#[derive(Clone, Debug)]
enum Update {
    Assign(Option<String>),
    Status(Option<String>),
    Resolution(Option<String>),
    Attribute(Option<String>),
    Plan(Option<String>),
    Author(Option<String>),
    Severity(Option<String>),
    ManualSeverity(Option<String>),
    TechnicalDebt(Option<u64>),
    EffortToFix(Option<u8>),
    Message(Option<String>),
    Line(Option<u32>),
}

impl Update {
    /// Diffs a successful first application leaves in a fresh change set.
    ///
    /// `None` when it depends on the issue: a manual override of an unchanged
    /// severity only flips the marker.
    fn expected_diffs(&self) -> Option<usize> {
        match self {
            Self::EffortToFix(_) | Self::Message(_) | Self::Line(_) => Some(0),
            Self::ManualSeverity(_) => None,
            _ => Some(1),
        }
    }
}

fn arbitrary_update() -> impl Strategy<Value = Update> {
    let audited = prop_oneof![
        arbitrary_text().prop_map(Update::Assign),
        arbitrary_text().prop_map(Update::Status),
        arbitrary_text().prop_map(Update::Resolution),
        arbitrary_text().prop_map(Update::Attribute),
        arbitrary_text().prop_map(Update::Plan),
        arbitrary_text().prop_map(Update::Author),
        arbitrary_text().prop_map(Update::Severity),
        arbitrary_text().prop_map(Update::ManualSeverity),
        prop::option::of(0..100u64).prop_map(Update::TechnicalDebt),
    ];
    let unaudited = prop_oneof![
        prop::option::of(0..20u8).prop_map(Update::EffortToFix),
        arbitrary_text().prop_map(Update::Message),
        prop::option::of(1..500u32).prop_map(Update::Line),
    ];
    prop_oneof![3 => audited, 1 => unaudited]
}

fn apply(updater: &Updater, issue: &mut Issue, update: &Update, ctx: &ChangeContext) -> bool {
    match update {
        Update::Assign(login) => {
            let user = login.as_ref().map(|l| User::new(l.clone(), l.to_lowercase()));
            updater.assign(issue, user.as_ref(), ctx)
        }
        Update::Status(v) => updater.set_status(issue, v.as_deref(), ctx),
        Update::Resolution(v) => updater.set_resolution(issue, v.as_deref(), ctx),
        Update::Attribute(v) => updater.set_attribute(issue, "JIRA", v.as_deref(), ctx),
        Update::Plan(key) => {
            let plan = key.as_ref().map(|k| ActionPlan::create("plan").with_key(k.clone()));
            updater.plan(issue, plan.as_ref(), ctx)
        }
        Update::Author(v) => updater.set_author_login(issue, v.as_deref(), ctx),
        // Blocked once an earlier update made the severity manual.
        Update::Severity(v) => updater
            .set_severity(issue, v.as_deref(), ctx)
            .unwrap_or(false),
        Update::ManualSeverity(v) => updater.set_manual_severity(issue, v.as_deref(), ctx),
        Update::TechnicalDebt(hours) => {
            let debt = hours.map(|h| Duration::from_secs(h * 3600));
            updater.set_technical_debt(issue, debt, ctx)
        }
        Update::EffortToFix(v) => updater.set_effort_to_fix(issue, v.map(f64::from), ctx),
        Update::Message(v) => updater.set_message(issue, v.as_deref(), ctx),
        Update::Line(v) => updater.set_line(issue, *v),
    }
}

proptest! {
    #[test]
    fn repeated_update_is_a_no_op(issue in arbitrary_issue(), update in arbitrary_update()) {
        let updater = Updater::new();
        let ctx = context();
        let mut issue = issue;

        let first = apply(&updater, &mut issue, &update, &ctx);
        let diffs_after_first = issue.current_change().map_or(0, |c| c.len());
        let notify_after_first = issue.must_send_notifications();
        let changed_after_first = issue.is_changed();
        let update_date_after_first = issue.update_date();

        let second = apply(&updater, &mut issue, &update, &ctx);

        prop_assert!(!second);
        prop_assert_eq!(issue.current_change().map_or(0, |c| c.len()), diffs_after_first);
        prop_assert_eq!(issue.must_send_notifications(), notify_after_first);
        prop_assert_eq!(issue.is_changed(), changed_after_first);
        prop_assert_eq!(issue.update_date(), update_date_after_first);
        if first {
            prop_assert!(issue.is_changed());
            match update.expected_diffs() {
                Some(expected) => prop_assert_eq!(diffs_after_first, expected),
                None => prop_assert!(diffs_after_first <= 1),
            }
        } else {
            prop_assert!(!issue.is_changed());
            prop_assert!(issue.current_change().is_none());
        }
    }

    #[test]
    fn past_updates_never_change_current_values(
        issue in arbitrary_issue(),
        line in prop::option::of(1..500u32),
        effort in prop::option::of(0..20u8),
        message in arbitrary_text(),
        repeat in 1..4usize,
    ) {
        let updater = Updater::new();
        let ctx = context();
        let mut issue = issue;
        let before = issue.clone();
        let effort = effort.map(f64::from);

        for _ in 0..repeat {
            let line_differs = updater.set_past_line(&mut issue, line);
            let effort_differs = updater.set_past_effort_to_fix(&mut issue, effort, &ctx);
            let message_differs = updater.set_past_message(&mut issue, message.as_deref(), &ctx);

            prop_assert_eq!(line_differs, before.line() != line);
            prop_assert_eq!(effort_differs, before.effort_to_fix() != effort);
            prop_assert_eq!(message_differs, before.message() != message.as_deref());
        }

        prop_assert_eq!(&issue, &before);
        prop_assert!(!issue.is_changed());
        prop_assert!(issue.current_change().is_none());
    }

    #[test]
    fn past_debt_keeps_current_debt(issue in arbitrary_issue(), previous in prop::option::of(0..100u64)) {
        let updater = Updater::new();
        let mut issue = issue;
        let current = issue.debt();
        let previous = previous.map(|h| Duration::from_secs(h * 3600));

        let updated = updater.set_past_technical_debt(&mut issue, previous, &context());

        prop_assert_eq!(updated, current != previous);
        prop_assert_eq!(issue.debt(), current);
        prop_assert!(!issue.must_send_notifications());
        prop_assert_eq!(issue.current_change().is_some(), updated);
    }

    #[test]
    fn notification_flag_never_resets(
        issue in arbitrary_issue(),
        updates in prop::collection::vec(arbitrary_update(), 1..12),
    ) {
        let updater = Updater::new();
        let ctx = context();
        let mut issue = issue;
        let mut notified = false;

        for update in &updates {
            apply(&updater, &mut issue, update, &ctx);
            if notified {
                prop_assert!(issue.must_send_notifications());
            }
            notified = issue.must_send_notifications();
        }
    }

    #[test]
    fn manual_severity_is_sticky(
        issue in arbitrary_issue(),
        manual in "[A-Z]{4,7}",
        attempts in prop::collection::vec("[A-Z]{4,7}", 1..5),
    ) {
        let updater = Updater::new();
        let ctx = context();
        let mut issue = issue;

        updater.set_manual_severity(&mut issue, Some(manual.as_str()), &ctx);
        prop_assert!(issue.manual_severity());

        for attempt in &attempts {
            prop_assert!(updater.set_severity(&mut issue, Some(attempt.as_str()), &ctx).is_err());
            prop_assert!(updater.set_past_severity(&mut issue, Some(attempt.as_str()), &ctx).is_err());
            prop_assert_eq!(issue.severity(), Some(manual.as_str()));
        }
    }

    #[test]
    fn diffs_span_the_whole_transaction(statuses in prop::collection::vec(arbitrary_text(), 1..8)) {
        let updater = Updater::new();
        let ctx = context();
        let mut issue = Issue::new("ISSUE-1");

        for status in &statuses {
            updater.set_status(&mut issue, status.as_deref(), &ctx);
        }

        let last = statuses.last().and_then(|s| s.as_deref());
        match issue.current_change().and_then(|c| c.get("status")) {
            Some(diff) => {
                prop_assert!(diff.old_value().is_unset());
                prop_assert_eq!(diff.new_value().as_text(), last);
            }
            None => prop_assert!(statuses.iter().all(Option::is_none)),
        }
    }
}
