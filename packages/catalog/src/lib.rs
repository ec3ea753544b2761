// Channel Directory - Catalog Core
//
// Published channel catalog with a moderated submission workflow: submitters
// propose new entries or edits, reviewers approve or reject them before they
// reach the public catalog.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
