//! Identifier types for every persisted entity.
//!
//! Submission and file ids are engine-assigned UUIDs (`Id<T>`). Catalog
//! entries are keyed by the external channel id, and users by the opaque id
//! handed to us by the identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use super::id::Id;

/// Marker type for pending channel creations.
pub struct PendingCreationMarker;

/// Marker type for pending channel edits.
pub struct PendingEditMarker;

/// Marker type for uploaded avatar files.
pub struct AvatarFileMarker;

pub type CreationId = Id<PendingCreationMarker>;
pub type EditId = Id<PendingEditMarker>;
pub type FileId = Id<AvatarFileMarker>;

/// External channel identifier; the natural key of a catalog entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ChannelId(i64);

impl ChannelId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ChannelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity-provider user id (opaque text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
