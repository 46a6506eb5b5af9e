//! Value types shared by the issue entity and the updater.
//!
//! - Field and diff values, including the `UNUSED` sentinel
//! - Per-transaction change sets
//! - Change attribution
//!
//! Everything in this module is plain data with no I/O.

mod context;
mod diff;
mod value;

pub use context::ChangeContext;
pub use diff::{Diff, FieldDiffs};
pub use value::{DiffValue, FieldValue, UNUSED};
