//! Objects supplied by collaborators outside the core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as known to the user directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: String,
}

impl User {
    pub fn new(login: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
        }
    }
}

/// An action plan an issue can be scheduled into.
///
/// Only the key is compared; the name is what change history displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    key: String,
    name: String,
}

impl ActionPlan {
    /// Create a plan with a freshly generated key.
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            key: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
