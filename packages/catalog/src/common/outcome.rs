use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::{CatalogError, ErrorKind};

/// Status payload returned by every mutation entry point.
///
/// Mutations never propagate errors to the request handler; the handler
/// renders `error` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            kind: None,
            data: Some(data),
        }
    }

    pub fn failed(err: &CatalogError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
            data: None,
        }
    }

    /// Convert an activity result, logging failures under `action`.
    pub fn from_result(action: &str, result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                match err.kind() {
                    ErrorKind::StorageFailure => {
                        tracing::error!(action, error = %err, "Action failed")
                    }
                    _ => warn!(action, error = %err, "Action rejected"),
                }
                Self::failed(&err)
            }
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == Some(kind)
    }
}
