//! Submitting creations and edits, direct publishing and queue visibility.

mod common;

use crate::common::*;
use catalog_core::common::{CatalogError, ChannelId, Patch};
use catalog_core::domains::catalog::activities::{get_blocklist, get_by_id, search};
use catalog_core::domains::catalog::{Region, SearchFilter};
use catalog_core::domains::submissions::activities::{
    approve, find_pending_edit_for, list_own_submissions, list_pending_queue, submit_creation,
    submit_edit,
};
use catalog_core::domains::submissions::{
    ChannelChanges, PendingEdit, SubmissionOutcome, SubmissionRef,
};
use test_context::test_context;

// ============================================================================
// Creations
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn reviewer_publishes_directly(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let mut payload = private_channel("  Direct Publish ", Region::Japan);
    payload.patterns = vec!["spam".to_string()];
    let channel_id = payload.channel_id;

    let outcome = submit_creation(&admin(), payload, &deps).await.unwrap();
    assert_eq!(outcome, SubmissionOutcome::Published { channel_id });

    let published = get_by_id(channel_id, &deps).await.unwrap();
    assert_eq!(published.channel_name, "Direct Publish");
    assert_eq!(published.username, None);
    assert!(published.invite_link.unwrap().starts_with("https://t.me/+"));
    assert_eq!(get_blocklist(channel_id, &deps).await.unwrap(), vec!["spam"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn submitter_creation_waits_for_review(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let token = unique_token();
    let payload = public_channel(&format!("Queued {}", token), Region::Canada);
    let channel_id = payload.channel_id;

    let outcome = submit_creation(&submitter(), payload, &deps).await.unwrap();
    assert!(matches!(
        outcome,
        SubmissionOutcome::Pending {
            submission: SubmissionRef::Creation(_),
            replaced_previous: false
        }
    ));

    assert!(matches!(
        get_by_id(channel_id, &deps).await,
        Err(CatalogError::NotFound(_))
    ));
    let found = search(&SearchFilter::by_name(token), &deps).await.unwrap();
    assert!(found.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn creation_with_existing_id_is_duplicate(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let channel_id = publish(public_channel("Taken", Region::Global), &deps).await;

    let mut payload = public_channel("Again", Region::Global);
    payload.channel_id = channel_id;
    let err = submit_creation(&submitter(), payload.clone(), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateIdentifier(_)));

    let err = submit_creation(&admin(), payload, &deps).await.unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateIdentifier(_)));
    assert_eq!(get_by_id(channel_id, &deps).await.unwrap().channel_name, "Taken");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn handle_or_invite_rule_applies_to_everyone(ctx: &mut TestHarness) {
    let deps = ctx.deps();

    let mut neither = public_channel("Neither", Region::Global);
    neither.username = None;
    let err = submit_creation(&admin(), neither, &deps).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let mut both = public_channel("Both", Region::Global);
    both.invite = Some("+abc".to_string());
    let err = submit_creation(&submitter(), both, &deps).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn look_around_patterns_are_accepted_and_published(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let mut payload = public_channel("Fancy Patterns", Region::Global);
    payload.patterns = vec!["spam(?!free)".to_string(), r"(\w)\1".to_string()];
    let channel_id = payload.channel_id;

    let id = submit_pending_creation(&submitter(), payload, &deps).await;
    approve(&admin(), SubmissionRef::Creation(id), &deps)
        .await
        .unwrap();

    assert_eq!(
        get_blocklist(channel_id, &deps).await.unwrap(),
        vec![r"(\w)\1", "spam(?!free)"]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cannot_attach_someone_elses_avatar(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let owner = submitter();
    let avatar = upload_test_avatar(&owner, &deps).await;

    let mut payload = public_channel("Borrowed Avatar", Region::Global);
    payload.avatar_id = Some(avatar.id);
    let err = submit_creation(&submitter(), payload.clone(), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Forbidden(_)));

    // Reviewers may reuse any uploaded file.
    assert!(submit_creation(&admin(), payload, &deps).await.is_ok());
}

// ============================================================================
// Edits
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn edit_of_unknown_channel_is_not_found(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    for caller in [submitter(), admin()] {
        let err = submit_edit(
            &caller,
            unique_channel_id(),
            ChannelChanges::rename("Ghost"),
            &deps,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_edit_is_rejected(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let channel_id = publish(public_channel("Untouched", Region::Global), &deps).await;

    let err = submit_edit(&submitter(), channel_id, ChannelChanges::default(), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reviewer_edit_applies_immediately(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let mut payload = public_channel("Go Private", Region::Germany);
    payload.patterns = vec!["a".to_string(), "b".to_string()];
    let channel_id = publish(payload, &deps).await;

    let changes = ChannelChanges {
        username: Patch::Clear,
        invite: Patch::Set("https://t.me/joinchat/PrivHash".to_string()),
        bias: Patch::Set(Region::France),
        patterns: Some(vec!["c".to_string()]),
        ..Default::default()
    };
    let outcome = submit_edit(&admin(), channel_id, changes, &deps).await.unwrap();
    assert_eq!(outcome, SubmissionOutcome::Published { channel_id });

    let after = get_by_id(channel_id, &deps).await.unwrap();
    assert_eq!(after.channel_name, "Go Private");
    assert_eq!(after.username, None);
    assert_eq!(after.invite.as_deref(), Some("PrivHash"));
    assert_eq!(after.bias, Region::France.tag());
    assert_eq!(get_blocklist(channel_id, &deps).await.unwrap(), vec!["c"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn resubmitting_an_edit_overwrites_the_pending_one(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let author = submitter();
    let channel_id = publish(public_channel("Upsert", Region::Global), &deps).await;

    let first = submit_pending_edit(&author, channel_id, ChannelChanges::rename("First"), &deps)
        .await;
    let before = PendingEdit::find_by_id(first, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    let outcome = submit_edit(&author, channel_id, ChannelChanges::rename("Second"), &deps)
        .await
        .unwrap();
    match outcome {
        SubmissionOutcome::Pending {
            submission: SubmissionRef::Edit(id),
            replaced_previous,
        } => {
            assert_eq!(id, first);
            assert!(replaced_previous);
        }
        other => panic!("expected pending edit, got {:?}", other),
    }

    let pending = find_pending_edit_for(&author, channel_id, &deps)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pending.id, first);
    assert_eq!(pending.changes.0.channel_name, Patch::Set("Second".to_string()));
    assert!(pending.created_at >= before.created_at);

    let own = list_own_submissions(&author, &deps).await.unwrap();
    assert_eq!(own.edits.len(), 1);
    assert_eq!(own.edits[0].current_channel.0.channel_name, "Upsert");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn different_submitters_keep_separate_edits(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let channel_id = publish(public_channel("Popular", Region::Global), &deps).await;

    let a = submit_pending_edit(&submitter(), channel_id, ChannelChanges::rename("A"), &deps).await;
    let b = submit_pending_edit(&submitter(), channel_id, ChannelChanges::rename("B"), &deps).await;
    assert_ne!(a, b);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn replaced_edit_releases_its_unused_avatar(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let author = submitter();
    let channel_id = publish(public_channel("Avatar Upsert", Region::Global), &deps).await;

    let first_avatar = upload_test_avatar(&author, &deps).await;
    let changes = ChannelChanges {
        avatar: Patch::Set(first_avatar.id),
        ..Default::default()
    };
    submit_pending_edit(&author, channel_id, changes, &deps).await;

    let second_avatar = upload_test_avatar(&author, &deps).await;
    let changes = ChannelChanges {
        avatar: Patch::Set(second_avatar.id),
        ..Default::default()
    };
    submit_pending_edit(&author, channel_id, changes, &deps).await;

    assert!(ctx.blobs.was_deleted(&first_avatar.key));
    assert!(!ctx.blobs.was_deleted(&second_avatar.key));
}

// ============================================================================
// Queue visibility
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn submitters_only_see_their_own_queue(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let alice = submitter();
    let bob = submitter();

    let alice_creation =
        submit_pending_creation(&alice, public_channel("Alice", Region::Global), &deps).await;
    let bob_creation =
        submit_pending_creation(&bob, public_channel("Bob", Region::Global), &deps).await;

    let target = publish(public_channel("Before Edit", Region::Japan), &deps).await;
    let alice_edit =
        submit_pending_edit(&alice, target, ChannelChanges::rename("After Edit"), &deps).await;
    let bob_edit =
        submit_pending_edit(&bob, target, ChannelChanges::rename("Bob's Name"), &deps).await;

    let queue = list_pending_queue(&alice, &deps).await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.creations[0].id, alice_creation);
    assert_eq!(queue.edits[0].edit.id, alice_edit);

    // Each edit comes with the live entry it would change.
    let current = &queue.edits[0].current_channel.0;
    assert_eq!(current.channel_id, target);
    assert_eq!(current.channel_name, "Before Edit");
    assert_eq!(current.bias, Region::Japan.tag());
    assert_eq!(
        queue.edits[0].edit.changes.0.channel_name,
        Patch::Set("After Edit".to_string())
    );

    let everything = list_pending_queue(&admin(), &deps).await.unwrap();
    let ids: Vec<_> = everything.creations.iter().map(|c| c.id).collect();
    assert!(ids.contains(&alice_creation));
    assert!(ids.contains(&bob_creation));
    assert!(everything.creations.iter().all(|c| c.is_pending()));

    let edits: Vec<_> = everything
        .edits
        .iter()
        .filter(|e| e.edit.channel_id == target)
        .collect();
    assert_eq!(edits.len(), 2);
    assert!(edits.iter().any(|e| e.edit.id == bob_edit));
    assert!(edits
        .iter()
        .all(|e| e.current_channel.0.channel_name == "Before Edit"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn negative_channel_ids_are_accepted(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let mut payload = public_channel("Supergroup", Region::Global);
    payload.channel_id = ChannelId::new(-(unique_channel_id().get()));
    let channel_id = payload.channel_id;

    publish(payload, &deps).await;
    assert_eq!(get_by_id(channel_id, &deps).await.unwrap().channel_id, channel_id.get());
}
