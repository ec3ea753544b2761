//! Media entry points

use crate::common::{ActionResult, Caller};
use crate::domains::media::activities;
use crate::domains::media::data::AvatarUpload;
use crate::domains::media::models::AvatarFile;
use crate::kernel::ServerDeps;

/// Upload an avatar, reporting failures as a status payload
pub async fn upload_avatar(
    caller: &Caller,
    upload: AvatarUpload,
    deps: &ServerDeps,
) -> ActionResult<AvatarFile> {
    ActionResult::from_result(
        "upload_avatar",
        activities::upload_avatar(caller, upload, deps).await,
    )
}
