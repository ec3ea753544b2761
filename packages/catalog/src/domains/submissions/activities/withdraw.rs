use tracing::info;

use crate::common::{Actor, Caller, CatalogError, CatalogResult, UserId};
use crate::domains::media::activities::release_avatar;
use crate::domains::submissions::data::SubmissionRef;
use crate::domains::submissions::models::{PendingCreation, PendingEdit, SubmissionStatus};
use crate::kernel::ServerDeps;

/// Delete the caller's own pending submission.
///
/// Withdrawal removes the row outright; only the author may withdraw, and
/// only while the submission is still pending.
pub async fn withdraw(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> CatalogResult<()> {
    let avatar = match submission {
        SubmissionRef::Creation(id) => {
            let creation = PendingCreation::find_by_id(id, &deps.db_pool)
                .await?
                .ok_or_else(|| CatalogError::not_found(format!("Submission {}", id)))?;
            check_withdrawable(caller, &creation.user_id, creation.status())?;

            let removed = PendingCreation::delete_pending(id, &caller.user_id, &deps.db_pool).await?;
            ensure_removed(removed, submission)?;
            creation.avatar_id
        }
        SubmissionRef::Edit(id) => {
            let edit = PendingEdit::find_by_id(id, &deps.db_pool)
                .await?
                .ok_or_else(|| CatalogError::not_found(format!("Submission {}", id)))?;
            check_withdrawable(caller, &edit.user_id, edit.status())?;

            let removed = PendingEdit::delete_pending(id, &caller.user_id, &deps.db_pool).await?;
            ensure_removed(removed, submission)?;
            edit.avatar_id
        }
    };

    if let Some(file_id) = avatar {
        release_avatar(file_id, deps).await;
    }

    info!(submission = %submission, withdrawn_by = %caller.user_id, "Submission withdrawn");
    Ok(())
}

fn check_withdrawable(
    caller: &Caller,
    author: &UserId,
    status: SubmissionStatus,
) -> CatalogResult<()> {
    Actor::from_caller(caller).owns(author, "submissions")?;
    if status.is_terminal() {
        return Err(CatalogError::InvalidState(format!(
            "Only pending submissions can be withdrawn (this one is {})",
            status
        )));
    }
    Ok(())
}

/// The row was reviewed between the read and the delete
fn ensure_removed(removed: u64, submission: SubmissionRef) -> CatalogResult<()> {
    if removed == 0 {
        return Err(CatalogError::InvalidState(format!(
            "Submission {} is no longer pending",
            submission
        )));
    }
    Ok(())
}
