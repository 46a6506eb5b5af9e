//! Attribution for a change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who changed an issue, and when.
///
/// Supplied by the caller for every interactive update. The updater only
/// passes it through to the change set and the issue's update date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeContext {
    date: DateTime<Utc>,
    login: Option<String>,
    scan: bool,
}

impl ChangeContext {
    /// Change made by a user.
    pub fn user(date: DateTime<Utc>, login: impl Into<String>) -> Self {
        Self {
            date,
            login: Some(login.into()),
            scan: false,
        }
    }

    /// Change made by an analysis run, with no user attached.
    pub fn scan(date: DateTime<Utc>) -> Self {
        Self {
            date,
            login: None,
            scan: true,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn is_scan(&self) -> bool {
        self.scan
    }
}
