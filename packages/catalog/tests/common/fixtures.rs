//! Test fixtures for creating catalog data.
//!
//! The database is shared between concurrently running tests, so every
//! fixture works with ids and names that no other test can produce.

use bytes::Bytes;
use catalog_core::common::{Caller, ChannelId, CreationId, EditId};
use catalog_core::domains::catalog::Region;
use catalog_core::domains::media::activities::upload_avatar;
use catalog_core::domains::media::{AvatarFile, AvatarUpload};
use catalog_core::domains::submissions::activities::{submit_creation, submit_edit};
use catalog_core::domains::submissions::{
    ChannelChanges, NewChannel, SubmissionOutcome, SubmissionRef,
};
use catalog_core::kernel::ServerDeps;
use uuid::Uuid;

/// Channel id no other test will use
pub fn unique_channel_id() -> ChannelId {
    let raw = (Uuid::new_v4().as_u128() as i64) & i64::MAX;
    ChannelId::new(raw.max(1))
}

/// Short random token to make names searchable per test
pub fn unique_token() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn admin() -> Caller {
    Caller::reviewer(format!("admin-{}", unique_token()))
}

pub fn submitter() -> Caller {
    Caller::submitter(format!("user-{}", unique_token()))
}

/// Public channel payload with a unique id and handle
pub fn public_channel(name: &str, region: Region) -> NewChannel {
    NewChannel {
        channel_id: unique_channel_id(),
        channel_name: name.to_string(),
        bias: region,
        username: Some(format!("@h_{}", unique_token())),
        invite: None,
        avatar_id: None,
        patterns: vec![],
    }
}

/// Private channel payload (invite link, no handle)
pub fn private_channel(name: &str, region: Region) -> NewChannel {
    NewChannel {
        username: None,
        invite: Some(format!("https://t.me/+{}", unique_token())),
        ..public_channel(name, region)
    }
}

/// Publish through the reviewer fast path
pub async fn publish(payload: NewChannel, deps: &ServerDeps) -> ChannelId {
    match submit_creation(&admin(), payload, deps)
        .await
        .expect("Failed to publish channel")
    {
        SubmissionOutcome::Published { channel_id } => channel_id,
        other => panic!("expected direct publish, got {:?}", other),
    }
}

pub async fn submit_pending_creation(
    caller: &Caller,
    payload: NewChannel,
    deps: &ServerDeps,
) -> CreationId {
    match submit_creation(caller, payload, deps)
        .await
        .expect("Failed to submit creation")
    {
        SubmissionOutcome::Pending {
            submission: SubmissionRef::Creation(id),
            ..
        } => id,
        other => panic!("expected pending creation, got {:?}", other),
    }
}

pub async fn submit_pending_edit(
    caller: &Caller,
    channel_id: ChannelId,
    changes: ChannelChanges,
    deps: &ServerDeps,
) -> EditId {
    match submit_edit(caller, channel_id, changes, deps)
        .await
        .expect("Failed to submit edit")
    {
        SubmissionOutcome::Pending {
            submission: SubmissionRef::Edit(id),
            ..
        } => id,
        other => panic!("expected pending edit, got {:?}", other),
    }
}

/// Upload a tiny PNG as `caller`
pub async fn upload_test_avatar(caller: &Caller, deps: &ServerDeps) -> AvatarFile {
    upload_avatar(
        caller,
        AvatarUpload {
            file_name: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        },
        deps,
    )
    .await
    .expect("Failed to upload avatar")
}
