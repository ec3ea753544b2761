use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::ChannelId;

/// Text-filtering pattern attached to a catalog entry (row in `bloats`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlocklistPattern {
    pub channel_id: ChannelId,
    pub pattern: String,
    pub created_at: DateTime<Utc>,
}

impl BlocklistPattern {
    pub async fn find_for_channel(channel_id: ChannelId, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bloats WHERE channel_id = $1 ORDER BY pattern ASC",
        )
        .bind(channel_id)
        .fetch_all(pool)
        .await
    }

    /// Insert patterns for a channel. Callers pass a de-duplicated list.
    pub async fn insert_all(
        channel_id: ChannelId,
        patterns: &[String],
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        if patterns.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO bloats (channel_id, pattern)
            SELECT $1, p FROM UNNEST($2::text[]) AS p
            "#,
        )
        .bind(channel_id)
        .bind(patterns)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every pattern of a channel and insert `patterns` in its place.
    /// An empty list clears the set. Run inside the caller's transaction.
    pub async fn replace_all(
        channel_id: ChannelId,
        patterns: &[String],
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        sqlx::query("DELETE FROM bloats WHERE channel_id = $1")
            .bind(channel_id)
            .execute(&mut *conn)
            .await?;

        Self::insert_all(channel_id, patterns, conn).await
    }
}
