//! HTTP blob store client for avatar files.
//!
//! Objects live under `{base}/{key}`. Writes authenticate with a bearer
//! token; reads go through signed URLs of the form
//! `{base}/{key}?expires=UNIX&signature=HEX` where the signature is
//! HMAC-SHA256 over `"{key}\n{expires}"` with the shared signing secret.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::traits::{BaseBlobStore, ImagePreset, StoredBlob};

type HmacSha256 = Hmac<Sha256>;

pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    signing_secret: String,
}

impl HttpBlobStore {
    pub fn new(base_url: &str, token: String, signing_secret: String) -> Result<Self> {
        // A trailing slash makes Url::join append keys instead of replacing
        // the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).context("BLOB_STORE_URL is not a valid URL")?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token,
            signing_secret,
        })
    }

    fn object_url(&self, key: &str) -> Result<Url> {
        self.base_url
            .join(key.trim_start_matches('/'))
            .with_context(|| format!("Invalid blob key: {}", key))
    }

    fn signature(&self, key: &str, expires: i64) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .context("Invalid signing secret")?;
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Signed URL that stops working at `expires` (unix seconds)
    pub fn signed_url_at(&self, key: &str, expires: i64) -> Result<String> {
        let mut url = self.object_url(key)?;
        let signature = self.signature(key, expires)?;
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);
        Ok(url.into())
    }

    fn new_key(preset: ImagePreset) -> String {
        format!("avatars/{}/{}", preset, Uuid::now_v7())
    }
}

#[async_trait]
impl BaseBlobStore for HttpBlobStore {
    async fn upload(
        &self,
        bytes: Bytes,
        content_type: &str,
        preset: ImagePreset,
    ) -> Result<StoredBlob> {
        let key = Self::new_key(preset);
        let url = self.object_url(&key)?;
        let size = bytes.len();

        self.client
            .put(url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, content_type)
            .query(&[("preset", preset.as_str())])
            .body(bytes)
            .send()
            .await
            .context("Blob upload request failed")?
            .error_for_status()
            .context("Blob store rejected upload")?;

        debug!(key = %key, size, "Uploaded blob");
        Ok(StoredBlob { key })
    }

    async fn signed_download_url(&self, key: &str, ttl: Duration) -> Result<String> {
        let ttl_secs = i64::try_from(ttl.as_secs()).context("Signed URL TTL too large")?;
        self.signed_url_at(key, Utc::now().timestamp() + ttl_secs)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let url = self.object_url(key)?;

        self.client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Blob delete request failed")?
            .error_for_status()
            .context("Blob store rejected delete")?;

        debug!(key = %key, "Deleted blob");
        Ok(())
    }
}
