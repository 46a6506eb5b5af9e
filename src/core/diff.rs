//! Field diffs recorded against an issue.
//!
//! A [`FieldDiffs`] is the change set of one transaction: the ordered list of
//! fields that changed, each with its value before and after, attributed to
//! the actor and date of the [`ChangeContext`] that opened it.

use super::context::ChangeContext;
use super::value::DiffValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Old/new value pair for a single field.
///
/// # Example
///
/// ```rust
/// use issuetrack::core::{Diff, DiffValue, UNUSED};
///
/// let diff = Diff::new(UNUSED, DiffValue::from("Emmerik"));
/// assert!(diff.old_value().is_unused());
/// assert_eq!(diff.new_value().as_text(), Some("Emmerik"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    old_value: DiffValue,
    new_value: DiffValue,
}

impl Diff {
    pub fn new(old_value: DiffValue, new_value: DiffValue) -> Self {
        Self {
            old_value,
            new_value,
        }
    }

    pub fn old_value(&self) -> &DiffValue {
        &self.old_value
    }

    pub fn new_value(&self) -> &DiffValue {
        &self.new_value
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.old_value, self.new_value)
    }
}

/// Ordered set of diffs for one transaction, keyed by field name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDiffs {
    login: Option<String>,
    created_at: DateTime<Utc>,
    diffs: Vec<(String, Diff)>,
}

impl FieldDiffs {
    /// Open an empty change set attributed to `context`.
    pub fn new(context: &ChangeContext) -> Self {
        Self {
            login: context.login().map(str::to_string),
            created_at: context.date(),
            diffs: Vec::new(),
        }
    }

    /// Record a diff for `field`.
    ///
    /// When the field already has a diff in this set, its first old value
    /// is kept and only the new value is replaced, so the diff always spans
    /// the whole transaction.
    pub fn set_diff(&mut self, field: &str, old_value: DiffValue, new_value: DiffValue) {
        match self.diffs.iter().position(|(key, _)| key == field) {
            Some(index) => self.diffs[index].1.new_value = new_value,
            None => self
                .diffs
                .push((field.to_string(), Diff::new(old_value, new_value))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Diff> {
        self.diffs
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, diff)| diff)
    }

    /// Diffs in the order the fields were first changed.
    pub fn diffs(&self) -> impl Iterator<Item = (&str, &Diff)> {
        self.diffs.iter().map(|(key, diff)| (key.as_str(), diff))
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Renders as `field=old|new` entries joined by commas.
impl fmt::Display for FieldDiffs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, diff)) in self.diffs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={diff}")?;
        }
        Ok(())
    }
}
