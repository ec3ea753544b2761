use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::common::{ChannelId, EditId, FileId, UserId};
use crate::domains::catalog::models::Channel;
use crate::domains::submissions::data::ChannelChanges;

use super::SubmissionStatus;

/// Proposed change to a published channel (row in `pending_edits`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingEdit {
    pub id: EditId,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    pub changes: Json<ChannelChanges>,
    /// Avatar newly proposed by `changes`; kept as a column for the file FK
    pub avatar_id: Option<FileId>,

    // Review workflow
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<UserId>,
}

/// Pending edit next to the entry it would change, as it stands now
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingEditWithChannel {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub edit: PendingEdit,
    pub current_channel: Json<Channel>,
}

const SELECT_WITH_CHANNEL: &str = r#"
    SELECT e.*, to_jsonb(s) AS current_channel
    FROM pending_edits e
    INNER JOIN sources s ON s.channel_id = e.channel_id
"#;

impl PendingEdit {
    pub fn status(&self) -> SubmissionStatus {
        self.status.parse().unwrap_or(SubmissionStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == SubmissionStatus::Pending
    }

    /// The submitter's outstanding edit on a channel, row-locked
    pub async fn lock_pending_for(
        submitter: &UserId,
        channel_id: ChannelId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM pending_edits
            WHERE user_id = $1 AND channel_id = $2 AND status = 'pending'
            FOR UPDATE
            "#,
        )
        .bind(submitter)
        .bind(channel_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a pending edit, or overwrite the submitter's outstanding one
    /// for the same channel and refresh its timestamp.
    pub async fn upsert_pending(
        submitter: &UserId,
        channel_id: ChannelId,
        changes: &ChannelChanges,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO pending_edits (id, channel_id, user_id, changes, avatar_id, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            ON CONFLICT (user_id, channel_id) WHERE status = 'pending'
            DO UPDATE SET
                changes = EXCLUDED.changes,
                avatar_id = EXCLUDED.avatar_id,
                created_at = NOW()
            RETURNING *
            "#,
        )
        .bind(EditId::new())
        .bind(channel_id)
        .bind(submitter)
        .bind(Json(changes))
        .bind(changes.proposed_avatar())
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(id: EditId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM pending_edits WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Guarded terminal transition; `None` when absent or no longer pending
    pub async fn mark_reviewed(
        id: EditId,
        status: SubmissionStatus,
        reviewer: &UserId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE pending_edits SET
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

    pub async fn delete_pending(id: EditId, submitter: &UserId, pool: &PgPool) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "DELETE FROM pending_edits WHERE id = $1 AND user_id = $2 AND status = 'pending'",
        )
        .bind(id)
        .bind(submitter)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_pending(pool: &PgPool) -> sqlx::Result<Vec<PendingEditWithChannel>> {
        let query = format!(
            "{} WHERE e.status = 'pending' ORDER BY e.created_at ASC",
            SELECT_WITH_CHANNEL
        );
        sqlx::query_as::<_, PendingEditWithChannel>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_pending_for_user(
        user: &UserId,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<PendingEditWithChannel>> {
        let query = format!(
            r#"{}
            WHERE e.user_id = $1 AND e.status = 'pending'
            ORDER BY e.created_at ASC
            "#,
            SELECT_WITH_CHANNEL
        );
        sqlx::query_as::<_, PendingEditWithChannel>(&query)
            .bind(user)
            .fetch_all(pool)
            .await
    }

    pub async fn find_pending_by_user_and_channel(
        user: &UserId,
        channel_id: ChannelId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM pending_edits
            WHERE user_id = $1 AND channel_id = $2 AND status = 'pending'
            "#,
        )
        .bind(user)
        .bind(channel_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_for_user(
        user: &UserId,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<PendingEditWithChannel>> {
        let query = format!(
            "{} WHERE e.user_id = $1 ORDER BY e.created_at ASC",
            SELECT_WITH_CHANNEL
        );
        sqlx::query_as::<_, PendingEditWithChannel>(&query)
            .bind(user)
            .fetch_all(pool)
            .await
    }
}
