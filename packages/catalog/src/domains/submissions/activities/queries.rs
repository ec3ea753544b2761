use crate::common::{Actor, Caller, Capability, CatalogResult, ChannelId};
use crate::domains::submissions::data::SubmissionQueue;
use crate::domains::submissions::models::{PendingCreation, PendingEdit};
use crate::kernel::ServerDeps;

/// Pending submissions visible to the caller, oldest first.
///
/// Reviewers see the whole queue; submitters see only their own items. Each
/// edit carries the entry it targets so the two can be compared side by side.
pub async fn list_pending_queue(
    caller: &Caller,
    deps: &ServerDeps,
) -> CatalogResult<SubmissionQueue> {
    let pool = &deps.db_pool;

    if Actor::from_caller(caller).has(Capability::ViewReviewQueue) {
        return Ok(SubmissionQueue {
            creations: PendingCreation::find_pending(pool).await?,
            edits: PendingEdit::find_pending(pool).await?,
        });
    }

    Ok(SubmissionQueue {
        creations: PendingCreation::find_pending_for_user(&caller.user_id, pool).await?,
        edits: PendingEdit::find_pending_for_user(&caller.user_id, pool).await?,
    })
}

/// Every submission the caller has made, whatever its status
pub async fn list_own_submissions(
    caller: &Caller,
    deps: &ServerDeps,
) -> CatalogResult<SubmissionQueue> {
    Ok(SubmissionQueue {
        creations: PendingCreation::find_for_user(&caller.user_id, &deps.db_pool).await?,
        edits: PendingEdit::find_for_user(&caller.user_id, &deps.db_pool).await?,
    })
}

/// The caller's outstanding edit on a channel, used to pre-fill an edit form
pub async fn find_pending_edit_for(
    caller: &Caller,
    channel_id: ChannelId,
    deps: &ServerDeps,
) -> CatalogResult<Option<PendingEdit>> {
    Ok(
        PendingEdit::find_pending_by_user_and_channel(&caller.user_id, channel_id, &deps.db_pool)
            .await?,
    )
}
