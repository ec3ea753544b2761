// Test doubles for kernel infrastructure traits
//
// MockBlobStore keeps objects in memory, records every call and can be told
// to fail signing or deletion for individual keys.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseBlobStore, ImagePreset, StoredBlob};

/// Arguments captured from an upload call
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub key: String,
    pub content_type: String,
    pub size: usize,
    pub preset: ImagePreset,
}

#[derive(Default)]
struct MockState {
    objects: HashMap<String, Bytes>,
    uploads: Vec<UploadCall>,
    deletes: Vec<String>,
    fail_sign: HashSet<String>,
    fail_delete: HashSet<String>,
    fail_uploads: bool,
    next_key: u64,
}

#[derive(Clone, Default)]
pub struct MockBlobStore {
    state: Arc<Mutex<MockState>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without recording an upload
    pub fn with_object(self, key: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(key.to_string(), Bytes::from_static(b"seed"));
        self
    }

    /// Make signing fail for `key`
    pub fn failing_sign_for(self, key: &str) -> Self {
        self.state.lock().unwrap().fail_sign.insert(key.to_string());
        self
    }

    /// Make deletion fail for `key`
    pub fn failing_delete_for(self, key: &str) -> Self {
        self.state.lock().unwrap().fail_delete.insert(key.to_string());
        self
    }

    pub fn failing_uploads(self) -> Self {
        self.state.lock().unwrap().fail_uploads = true;
        self
    }

    pub fn fail_delete_for(&self, key: &str) {
        self.state.lock().unwrap().fail_delete.insert(key.to_string());
    }

    pub fn fail_sign_for(&self, key: &str) {
        self.state.lock().unwrap().fail_sign.insert(key.to_string());
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.state.lock().unwrap().uploads.clone()
    }

    /// Keys passed to `delete`, including failed attempts
    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().deletes.clone()
    }

    pub fn was_deleted(&self, key: &str) -> bool {
        self.state.lock().unwrap().deletes.iter().any(|k| k == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().unwrap().objects.contains_key(key)
    }
}

#[async_trait]
impl BaseBlobStore for MockBlobStore {
    async fn upload(
        &self,
        bytes: Bytes,
        content_type: &str,
        preset: ImagePreset,
    ) -> Result<StoredBlob> {
        let mut state = self.state.lock().unwrap();
        if state.fail_uploads {
            return Err(anyhow!("mock upload failure"));
        }

        state.next_key += 1;
        let key = format!("mock/{}/{}-{}", preset, state.next_key, uuid::Uuid::new_v4());
        state.uploads.push(UploadCall {
            key: key.clone(),
            content_type: content_type.to_string(),
            size: bytes.len(),
            preset,
        });
        state.objects.insert(key.clone(), bytes);
        Ok(StoredBlob { key })
    }

    async fn signed_download_url(&self, key: &str, ttl: Duration) -> Result<String> {
        let state = self.state.lock().unwrap();
        if state.fail_sign.contains(key) {
            return Err(anyhow!("mock signing failure for {}", key));
        }
        Ok(format!("https://blobs.test/{}?ttl={}", key, ttl.as_secs()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.deletes.push(key.to_string());
        if state.fail_delete.contains(key) {
            return Err(anyhow!("mock delete failure for {}", key));
        }
        state.objects.remove(key);
        Ok(())
    }
}
