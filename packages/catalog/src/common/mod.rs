// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod outcome;
pub mod patch;

pub use auth::{Actor, AuthError, Caller, Capability};
pub use entity_ids::*;
pub use errors::{CatalogError, CatalogResult, ErrorKind};
pub use outcome::ActionResult;
pub use patch::Patch;
