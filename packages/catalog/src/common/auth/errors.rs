use thiserror::Error;

use super::Capability;

/// Authorization errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Admin access required to {}", .0.describe())]
    AdminRequired(Capability),

    #[error("Permission denied: {0}")]
    NotOwner(String),
}
