//! Avatar lifecycle: upload, signed read URLs and best-effort cleanup.

use tracing::{debug, info, warn};

use crate::common::{Actor, Caller, CatalogError, CatalogResult, ChannelId, FileId};
use crate::domains::media::data::AvatarUpload;
use crate::domains::media::models::{AvatarFile, CreateAvatarFile};
use crate::kernel::{ImagePreset, ServerDeps};

/// Store an uploaded image and record it as an avatar file owned by `caller`
pub async fn upload_avatar(
    caller: &Caller,
    upload: AvatarUpload,
    deps: &ServerDeps,
) -> CatalogResult<AvatarFile> {
    if !upload.content_type.starts_with("image/") {
        return Err(CatalogError::validation("Avatar must be an image"));
    }
    if upload.bytes.is_empty() {
        return Err(CatalogError::validation("Avatar file is empty"));
    }
    if upload.bytes.len() > deps.avatar_max_bytes {
        return Err(CatalogError::validation(format!(
            "Avatar exceeds {} bytes",
            deps.avatar_max_bytes
        )));
    }
    let size_bytes = i32::try_from(upload.bytes.len())
        .map_err(|_| CatalogError::validation("Avatar file is too large"))?;

    let file_name = match upload.file_name.trim() {
        "" => "avatar".to_string(),
        name => name.to_string(),
    };

    let stored = deps
        .blob_store
        .upload(upload.bytes, &upload.content_type, ImagePreset::Logo)
        .await
        .map_err(CatalogError::BlobStore)?;

    let record = AvatarFile::create(
        CreateAvatarFile {
            key: stored.key.clone(),
            file_name,
            content_type: upload.content_type,
            size_bytes,
            uploaded_by: caller.user_id.clone(),
        },
        &deps.db_pool,
    )
    .await;

    match record {
        Ok(file) => {
            info!(file_id = %file.id, key = %file.key, uploaded_by = %caller.user_id, "Avatar uploaded");
            Ok(file)
        }
        Err(e) => {
            if let Err(cleanup) = deps.blob_store.delete(&stored.key).await {
                warn!(key = %stored.key, error = %cleanup, "Failed to delete orphaned avatar blob");
            }
            Err(e.into())
        }
    }
}

/// Signed URL for an avatar key; failures are logged and yield `None`
pub async fn resolve_avatar_url(
    key: &str,
    channel_id: ChannelId,
    deps: &ServerDeps,
) -> Option<String> {
    match deps
        .blob_store
        .signed_download_url(key, deps.avatar_url_ttl)
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(channel_id = %channel_id, key = %key, error = %e, "Failed to sign avatar URL");
            None
        }
    }
}

/// A submission may only point at an existing file uploaded by its author
/// (reviewers may reuse any file).
pub async fn ensure_avatar_usable(
    file_id: FileId,
    caller: &Caller,
    deps: &ServerDeps,
) -> CatalogResult<()> {
    let file = AvatarFile::find_by_id(file_id, &deps.db_pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Avatar file {}", file_id)))?;

    if !caller.is_admin {
        Actor::from_caller(caller).owns(&file.uploaded_by, "avatar uploads")?;
    }
    Ok(())
}

/// Delete an avatar that nothing references any more.
///
/// Never fails: every problem is logged and the primary operation that
/// triggered the cleanup stands.
pub async fn release_avatar(file_id: FileId, deps: &ServerDeps) {
    let file = match AvatarFile::find_by_id(file_id, &deps.db_pool).await {
        Ok(Some(file)) => file,
        Ok(None) => return,
        Err(e) => {
            warn!(file_id = %file_id, error = %e, "Failed to load avatar for cleanup");
            return;
        }
    };

    match AvatarFile::is_referenced(file_id, &deps.db_pool).await {
        Ok(true) => {
            debug!(file_id = %file_id, "Avatar still referenced, keeping");
            return;
        }
        Ok(false) => {}
        Err(e) => {
            warn!(file_id = %file_id, error = %e, "Failed to check avatar references");
            return;
        }
    }

    if let Err(e) = deps.blob_store.delete(&file.key).await {
        warn!(file_id = %file_id, key = %file.key, error = %e, "Failed to delete avatar blob");
    }

    match AvatarFile::delete(file_id, &deps.db_pool).await {
        Ok(()) => info!(file_id = %file_id, key = %file.key, "Avatar released"),
        Err(e) => warn!(file_id = %file_id, error = %e, "Failed to delete avatar record"),
    }
}
