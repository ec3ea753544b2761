use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::common::{CatalogResult, ChannelId, CreationId, FileId, UserId};
use crate::domains::catalog::models::ChannelRecord;
use crate::domains::catalog::validation::check_handle_or_invite;
use crate::domains::submissions::data::NewChannel;

use super::SubmissionStatus;

/// Proposed new channel (row in `pending_creations`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingCreation {
    pub id: CreationId,
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub bias: String,
    pub username: Option<String>,
    pub invite: Option<String>,
    pub avatar_id: Option<FileId>,
    pub patterns: Json<Vec<String>>,

    // Review workflow
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<UserId>,
}

impl PendingCreation {
    pub fn status(&self) -> SubmissionStatus {
        // The CHECK constraint limits the column to known values.
        self.status.parse().unwrap_or(SubmissionStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == SubmissionStatus::Pending
    }

    /// Re-validate the stored payload into a catalog record
    pub fn to_record(&self) -> CatalogResult<ChannelRecord> {
        check_handle_or_invite(self.username.as_deref(), self.invite.as_deref())?;
        Ok(ChannelRecord {
            channel_id: self.channel_id,
            channel_name: self.channel_name.clone(),
            bias: self.bias.parse()?,
            username: self.username.clone(),
            invite: self.invite.clone(),
            avatar_id: self.avatar_id,
        })
    }

    /// Insert a pending creation for a normalized payload
    pub async fn create(
        submitter: &UserId,
        payload: &NewChannel,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO pending_creations (
                id, user_id, channel_id, channel_name, bias,
                username, invite, avatar_id, patterns, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
            RETURNING *
            "#,
        )
        .bind(CreationId::new())
        .bind(submitter)
        .bind(payload.channel_id)
        .bind(&payload.channel_name)
        .bind(payload.bias.tag())
        .bind(&payload.username)
        .bind(&payload.invite)
        .bind(payload.avatar_id)
        .bind(Json(&payload.patterns))
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: CreationId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM pending_creations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending creation to a terminal status.
    ///
    /// Guarded on `status = 'pending'`: returns `None` when the row is gone
    /// or was already reviewed, so a second reviewer never re-applies it.
    pub async fn mark_reviewed(
        id: CreationId,
        status: SubmissionStatus,
        reviewer: &UserId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE pending_creations SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(reviewer)
        .fetch_optional(conn)
        .await
    }

    /// Delete the submitter's own pending creation; returns rows removed
    pub async fn delete_pending(
        id: CreationId,
        submitter: &UserId,
        pool: &PgPool,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "DELETE FROM pending_creations WHERE id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(id)
        .bind(submitter)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// All pending creations, oldest first (review queue)
    pub async fn find_pending(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM pending_creations WHERE status = 'pending' ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_pending_for_user(user: &UserId, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM pending_creations
            WHERE user_id = $1 AND status = 'pending'
            ORDER BY created_at ASC
            "#,
        )
        .bind(user)
        .fetch_all(pool)
        .await
    }

    /// Every creation a user submitted, any status
    pub async fn find_for_user(user: &UserId, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM pending_creations WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user)
        .fetch_all(pool)
        .await
    }
}
