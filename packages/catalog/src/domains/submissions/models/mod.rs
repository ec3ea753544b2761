mod pending_creation;
mod pending_edit;
mod status;

pub use pending_creation::PendingCreation;
pub use pending_edit::{PendingEdit, PendingEditWithChannel};
pub use status::SubmissionStatus;

use crate::common::CatalogError;

/// Explain why a status-guarded transition matched no row
pub(crate) fn transition_error(what: &str, current: Option<SubmissionStatus>) -> CatalogError {
    match current {
        None => CatalogError::not_found(what.to_string()),
        Some(status) => CatalogError::InvalidState(format!("{} is already {}", what, status)),
    }
}
