//! Submission activities - moderation engine core logic
//!
//! Activities return `CatalogResult` and are composed by the entry points in
//! `actions`, which convert failures into status payloads.

pub mod queries;
pub mod review;
pub mod submit;
pub mod withdraw;

pub use queries::{find_pending_edit_for, list_own_submissions, list_pending_queue};
pub use review::{approve, reject};
pub use submit::{submit_creation, submit_edit};
pub use withdraw::withdraw;
