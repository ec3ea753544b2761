//! Submitting creations and edits.
//!
//! Privileged callers publish straight to the catalog inside a transaction;
//! everyone else lands in the review queue.

use sqlx::PgConnection;
use tracing::info;

use crate::common::{Actor, Caller, Capability, CatalogError, CatalogResult, ChannelId, FileId};
use crate::domains::catalog::models::{BlocklistPattern, Channel};
use crate::domains::media::activities::{ensure_avatar_usable, release_avatar};
use crate::domains::submissions::data::{
    ChannelChanges, NewChannel, SubmissionOutcome, SubmissionRef,
};
use crate::domains::submissions::models::{PendingCreation, PendingEdit};
use crate::kernel::ServerDeps;

/// Propose (or, for reviewers, publish) a new catalog entry
pub async fn submit_creation(
    caller: &Caller,
    payload: NewChannel,
    deps: &ServerDeps,
) -> CatalogResult<SubmissionOutcome> {
    let payload = payload.normalize()?;

    if let Some(avatar_id) = payload.avatar_id {
        ensure_avatar_usable(avatar_id, caller, deps).await?;
    }

    if Actor::from_caller(caller).has(Capability::PublishDirectly) {
        let mut tx = deps.db_pool.begin().await?;

        let channel = Channel::insert_if_absent(&payload.record(), &mut *tx)
            .await?
            .ok_or(CatalogError::DuplicateIdentifier(payload.channel_id))?;
        BlocklistPattern::insert_all(channel.channel_id, &payload.patterns, &mut *tx).await?;

        tx.commit().await?;

        info!(
            channel_id = %channel.channel_id,
            published_by = %caller.user_id,
            patterns = payload.patterns.len(),
            "Channel published directly"
        );
        return Ok(SubmissionOutcome::Published {
            channel_id: channel.channel_id,
        });
    }

    // Early feedback only; approval re-checks atomically.
    if Channel::exists(payload.channel_id, &deps.db_pool).await? {
        return Err(CatalogError::DuplicateIdentifier(payload.channel_id));
    }

    let creation = PendingCreation::create(&caller.user_id, &payload, &deps.db_pool).await?;

    info!(
        creation_id = %creation.id,
        channel_id = %creation.channel_id,
        submitted_by = %caller.user_id,
        "Channel creation submitted for review"
    );
    Ok(SubmissionOutcome::Pending {
        submission: SubmissionRef::Creation(creation.id),
        replaced_previous: false,
    })
}

/// Propose (or, for reviewers, apply) changes to an existing entry
pub async fn submit_edit(
    caller: &Caller,
    channel_id: ChannelId,
    changes: ChannelChanges,
    deps: &ServerDeps,
) -> CatalogResult<SubmissionOutcome> {
    let changes = changes.normalize()?;

    if let Some(avatar_id) = changes.proposed_avatar() {
        ensure_avatar_usable(avatar_id, caller, deps).await?;
    }

    if Actor::from_caller(caller).has(Capability::PublishDirectly) {
        let mut tx = deps.db_pool.begin().await?;
        let superseded = apply_changes(channel_id, &changes, &mut *tx).await?;
        tx.commit().await?;
        if let Some(old_avatar) = superseded {
            release_avatar(old_avatar, deps).await;
        }

        info!(
            channel_id = %channel_id,
            published_by = %caller.user_id,
            "Channel edited directly"
        );
        return Ok(SubmissionOutcome::Published { channel_id });
    }

    let current = Channel::find_by_id(channel_id, &deps.db_pool)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Channel {}", channel_id)))?;
    // Reject edits that could never be approved against the current entry.
    changes.merge_into(&current)?;

    let mut tx = deps.db_pool.begin().await?;
    let previous = PendingEdit::lock_pending_for(&caller.user_id, channel_id, &mut *tx).await?;
    let edit = PendingEdit::upsert_pending(&caller.user_id, channel_id, &changes, &mut *tx).await?;
    tx.commit().await?;

    let replaced_previous = previous.is_some();
    if let Some(old_avatar) = previous.and_then(|p| p.avatar_id) {
        if Some(old_avatar) != edit.avatar_id {
            release_avatar(old_avatar, deps).await;
        }
    }

    info!(
        edit_id = %edit.id,
        channel_id = %channel_id,
        submitted_by = %caller.user_id,
        replaced_previous,
        "Channel edit submitted for review"
    );
    Ok(SubmissionOutcome::Pending {
        submission: SubmissionRef::Edit(edit.id),
        replaced_previous,
    })
}

/// Merge `changes` into a row-locked channel and replace its patterns when
/// a new list is given. Shared by direct edits and edit approval; the caller
/// owns the transaction.
///
/// Returns the avatar the entry no longer points at, for cleanup after
/// commit.
pub(crate) async fn apply_changes(
    channel_id: ChannelId,
    changes: &ChannelChanges,
    conn: &mut PgConnection,
) -> CatalogResult<Option<FileId>> {
    let current = Channel::lock_for_update(channel_id, &mut *conn)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("Channel {}", channel_id)))?;
    let record = changes.merge_into(&current)?;
    let updated = Channel::overwrite(&record, &mut *conn).await?;

    if let Some(patterns) = &changes.patterns {
        BlocklistPattern::replace_all(channel_id, patterns, &mut *conn).await?;
    }

    Ok(superseded_avatar(current.avatar_id, updated.avatar_id))
}

fn superseded_avatar(before: Option<FileId>, after: Option<FileId>) -> Option<FileId> {
    before.filter(|old| Some(*old) != after)
}
