use crate::common::{ActionResult, Caller, ChannelId};
use crate::domains::submissions::activities;
use crate::domains::submissions::data::{
    ChannelChanges, NewChannel, ReviewOutcome, SubmissionOutcome, SubmissionRef,
};
use crate::kernel::ServerDeps;

pub async fn submit_creation(
    caller: &Caller,
    payload: NewChannel,
    deps: &ServerDeps,
) -> ActionResult<SubmissionOutcome> {
    ActionResult::from_result(
        "submit_creation",
        activities::submit_creation(caller, payload, deps).await,
    )
}

pub async fn submit_edit(
    caller: &Caller,
    channel_id: ChannelId,
    changes: ChannelChanges,
    deps: &ServerDeps,
) -> ActionResult<SubmissionOutcome> {
    ActionResult::from_result(
        "submit_edit",
        activities::submit_edit(caller, channel_id, changes, deps).await,
    )
}

pub async fn approve(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> ActionResult<ReviewOutcome> {
    ActionResult::from_result("approve", activities::approve(caller, submission, deps).await)
}

pub async fn reject(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> ActionResult<ReviewOutcome> {
    ActionResult::from_result("reject", activities::reject(caller, submission, deps).await)
}

pub async fn withdraw(
    caller: &Caller,
    submission: SubmissionRef,
    deps: &ServerDeps,
) -> ActionResult<()> {
    ActionResult::from_result("withdraw", activities::withdraw(caller, submission, deps).await)
}
