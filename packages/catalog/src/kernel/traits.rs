// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseBlobStore)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// =============================================================================
// Blob Store Trait (Infrastructure - avatar storage)
// =============================================================================

/// Image processing preset applied by the blob store on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePreset {
    /// 96x96 channel avatar
    Logo,
}

impl ImagePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePreset::Logo => "logo",
        }
    }
}

impl fmt::Display for ImagePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of an uploaded object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
}

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Upload an object; the store picks the key
    async fn upload(&self, bytes: Bytes, content_type: &str, preset: ImagePreset)
        -> Result<StoredBlob>;

    /// Time-limited download URL for an object
    async fn signed_download_url(&self, key: &str, ttl: Duration) -> Result<String>;

    /// Delete an object
    async fn delete(&self, key: &str) -> Result<()>;
}
