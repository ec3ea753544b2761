use thiserror::Error;

use super::auth::AuthError;
use super::ChannelId;

/// Error taxonomy shared by the moderation engine and the search service
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("channel {0} already exists")]
    DuplicateIdentifier(ChannelId),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("blob store failure: {0}")]
    BlobStore(anyhow::Error),
}

/// Stable machine-readable classification of a [`CatalogError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    DuplicateIdentifier,
    InvalidState,
    Validation,
    StorageFailure,
}

impl CatalogError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Unauthorized(_) => ErrorKind::Unauthorized,
            CatalogError::Forbidden(_) => ErrorKind::Forbidden,
            CatalogError::DuplicateIdentifier(_) => ErrorKind::DuplicateIdentifier,
            CatalogError::InvalidState(_) => ErrorKind::InvalidState,
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::Storage(_) | CatalogError::BlobStore(_) => ErrorKind::StorageFailure,
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AdminRequired(_) => CatalogError::Unauthorized(err.to_string()),
            AuthError::NotOwner(_) => CatalogError::Forbidden(err.to_string()),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
