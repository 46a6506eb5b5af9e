//! Field values and the values stored in diffs.
//!
//! A diff side is one of three things: no value, the `UNUSED` sentinel, or a
//! concrete field value. The sentinel marks fields whose previous value is not
//! meaningful for display (assignee, action plan), which is different from a
//! previous value that was explicitly empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A concrete value held by an issue field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Double(f64),
    Duration(Duration),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Duration(d) => write!(f, "{}", d.as_secs()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<Duration> for FieldValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

/// One side of a [`Diff`](super::Diff).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DiffValue {
    /// No value (the field was or became empty).
    #[default]
    Unset,
    /// Placeholder for "no comparable prior value".
    Unused,
    Value(FieldValue),
}

/// The `UNUSED` sentinel.
pub const UNUSED: DiffValue = DiffValue::Unused;

impl DiffValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_unused(&self) -> bool {
        matches!(self, Self::Unused)
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Unused => None,
        }
    }

    /// Text content, for string-valued fields.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Value(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for DiffValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, |v| Self::Value(v.into()))
    }
}

impl From<&str> for DiffValue {
    fn from(value: &str) -> Self {
        Self::Value(FieldValue::from(value))
    }
}

impl From<String> for DiffValue {
    fn from(value: String) -> Self {
        Self::Value(FieldValue::from(value))
    }
}

impl From<Duration> for DiffValue {
    fn from(value: Duration) -> Self {
        Self::Value(FieldValue::from(value))
    }
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Unused => f.write_str("UNUSED"),
            Self::Value(v) => v.fmt(f),
        }
    }
}
