//! Submission entry points
//!
//! Called directly by request handlers. Each one wraps an activity and never
//! returns an error: failures come back as `ActionResult { success: false }`.

mod entry_points;

pub use entry_points::{approve, reject, submit_creation, submit_edit, withdraw};
