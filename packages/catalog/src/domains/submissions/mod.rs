//! Submissions domain - pending creations/edits and the review workflow

pub mod actions;
pub mod activities;
pub mod data;
pub mod models;

pub use data::{
    ChannelChanges, NewChannel, ReviewOutcome, SubmissionOutcome, SubmissionQueue, SubmissionRef,
};
pub use models::{PendingCreation, PendingEdit, PendingEditWithChannel, SubmissionStatus};
