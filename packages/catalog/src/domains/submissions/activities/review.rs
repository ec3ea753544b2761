//! Reviewer decisions on pending submissions.
//!
//! Every transition is a status-guarded UPDATE (`... WHERE status = 'pending'`)
//! so two reviewers racing on the same submission cannot both win. Approval
//! runs the guard and the catalog write in one transaction.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::common::{
    Actor, Caller, Capability, CatalogError, CatalogResult, ChannelId, CreationId, EditId,
};
use crate::domains::catalog::models::{BlocklistPattern, Channel};
use crate::domains::media::activities::release_avatar;
use crate::domains::submissions::activities::submit::apply_changes;
use crate::domains::submissions::data::{ReviewOutcome, SubmissionRef};
use crate::domains::submissions::models::{
    transition_error, PendingCreation, PendingEdit, SubmissionStatus,
};
use crate::kernel::ServerDeps;

/// Approve a pending submission and publish its payload
pub async fn approve(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> CatalogResult<ReviewOutcome> {
    Actor::from_caller(caller)
        .can(Capability::ReviewSubmissions)
        .check()?;

    match submission {
        SubmissionRef::Creation(id) => approve_creation(caller, id, deps).await,
        SubmissionRef::Edit(id) => approve_edit(caller, id, deps).await,
    }
}

/// Reject a pending submission and release the avatar it carried
pub async fn reject(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> CatalogResult<ReviewOutcome> {
    Actor::from_caller(caller)
        .can(Capability::ReviewSubmissions)
        .check()?;

    let mut conn = deps.db_pool.acquire().await?;

    let (outcome, avatar) = match submission {
        SubmissionRef::Creation(id) => {
            let creation = match PendingCreation::mark_reviewed(
                id,
                SubmissionStatus::Rejected,
                &caller.user_id,
                &mut *conn,
            )
            .await?
            {
                Some(creation) => creation,
                None => return Err(creation_transition_error(id, deps).await),
            };
            let outcome = review_outcome(
                submission,
                creation.channel_id,
                SubmissionStatus::Rejected,
                creation.reviewed_at,
                caller,
            );
            (outcome, creation.avatar_id)
        }
        SubmissionRef::Edit(id) => {
            let edit = match PendingEdit::mark_reviewed(
                id,
                SubmissionStatus::Rejected,
                &caller.user_id,
                &mut *conn,
            )
            .await?
            {
                Some(edit) => edit,
                None => return Err(edit_transition_error(id, deps).await),
            };
            let outcome = review_outcome(
                submission,
                edit.channel_id,
                SubmissionStatus::Rejected,
                edit.reviewed_at,
                caller,
            );
            (outcome, edit.avatar_id)
        }
    };
    drop(conn);

    if let Some(avatar_id) = avatar {
        release_avatar(avatar_id, deps).await;
    }

    info!(
        submission = %submission,
        channel_id = %outcome.channel_id,
        reviewed_by = %caller.user_id,
        "Submission rejected"
    );
    Ok(outcome)
}

async fn approve_creation(
    caller: &Caller,
    id: CreationId,
    deps: &ServerDeps,
) -> CatalogResult<ReviewOutcome> {
    let mut tx = deps.db_pool.begin().await?;

    let creation = match PendingCreation::mark_reviewed(
        id,
        SubmissionStatus::Approved,
        &caller.user_id,
        &mut *tx,
    )
    .await?
    {
        Some(creation) => creation,
        None => {
            tx.rollback().await?;
            return Err(creation_transition_error(id, deps).await);
        }
    };

    // Dropping `tx` on any error below rolls the status change back, so a
    // failed approval leaves the submission pending.
    let record = creation.to_record()?;
    let channel = Channel::insert_if_absent(&record, &mut *tx)
        .await?
        .ok_or(CatalogError::DuplicateIdentifier(record.channel_id))?;
    BlocklistPattern::insert_all(channel.channel_id, &creation.patterns, &mut *tx).await?;

    tx.commit().await?;

    info!(
        creation_id = %id,
        channel_id = %channel.channel_id,
        submitted_by = %creation.user_id,
        reviewed_by = %caller.user_id,
        "Channel creation approved"
    );
    Ok(review_outcome(
        SubmissionRef::Creation(id),
        channel.channel_id,
        SubmissionStatus::Approved,
        creation.reviewed_at,
        caller,
    ))
}

async fn approve_edit(
    caller: &Caller,
    id: EditId,
    deps: &ServerDeps,
) -> CatalogResult<ReviewOutcome> {
    let mut tx = deps.db_pool.begin().await?;

    let edit = match PendingEdit::mark_reviewed(
        id,
        SubmissionStatus::Approved,
        &caller.user_id,
        &mut *tx,
    )
    .await?
    {
        Some(edit) => edit,
        None => {
            tx.rollback().await?;
            return Err(edit_transition_error(id, deps).await);
        }
    };

    let superseded = apply_changes(edit.channel_id, &edit.changes.0, &mut *tx).await?;
    tx.commit().await?;

    if let Some(old_avatar) = superseded {
        release_avatar(old_avatar, deps).await;
    }

    info!(
        edit_id = %id,
        channel_id = %edit.channel_id,
        submitted_by = %edit.user_id,
        reviewed_by = %caller.user_id,
        "Channel edit approved"
    );
    Ok(review_outcome(
        SubmissionRef::Edit(id),
        edit.channel_id,
        SubmissionStatus::Approved,
        edit.reviewed_at,
        caller,
    ))
}

fn review_outcome(
    submission: SubmissionRef,
    channel_id: ChannelId,
    status: SubmissionStatus,
    reviewed_at: Option<DateTime<Utc>>,
    caller: &Caller,
) -> ReviewOutcome {
    ReviewOutcome {
        submission,
        channel_id,
        status,
        reviewed_by: caller.user_id.clone(),
        reviewed_at: reviewed_at.unwrap_or_else(Utc::now),
    }
}

async fn creation_transition_error(id: CreationId, deps: &ServerDeps) -> CatalogError {
    match PendingCreation::find_by_id(id, &deps.db_pool).await {
        Ok(found) => transition_error(&format!("Submission {}", id), found.map(|c| c.status())),
        Err(e) => e.into(),
    }
}

async fn edit_transition_error(id: EditId, deps: &ServerDeps) -> CatalogError {
    match PendingEdit::find_by_id(id, &deps.db_pool).await {
        Ok(found) => transition_error(&format!("Submission {}", id), found.map(|e| e.status())),
        Err(e) => e.into(),
    }
}
