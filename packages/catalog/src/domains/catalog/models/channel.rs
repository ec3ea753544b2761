use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ChannelId, FileId};

use super::Region;

/// Published catalog entry (row in `sources`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Channel {
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub bias: String,
    pub username: Option<String>,
    pub invite: Option<String>,
    pub avatar_id: Option<FileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry joined with the storage key of its avatar
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelWithAvatar {
    #[sqlx(flatten)]
    pub channel: Channel,
    pub avatar_key: Option<String>,
}

/// Fully validated field set written to `sources`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub bias: Region,
    pub username: Option<String>,
    pub invite: Option<String>,
    pub avatar_id: Option<FileId>,
}

/// Search filters; `None` fields are no-ops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub region: Option<Region>,
}

impl SearchFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            region: None,
        }
    }

    pub fn by_region(region: Region) -> Self {
        Self {
            name: None,
            region: Some(region),
        }
    }

    /// ILIKE pattern for the name filter, or `None` when it is absent/blank
    fn name_pattern(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("%{}%", escape_like(n)))
    }
}

/// Escape LIKE metacharacters so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const SELECT_WITH_AVATAR: &str = r#"
    SELECT s.*, f.key AS avatar_key
    FROM sources s
    LEFT JOIN files f ON f.id = s.avatar_id
"#;

impl Channel {
    /// Find channel by ID
    pub async fn find_by_id(id: ChannelId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sources WHERE channel_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(id: ChannelId, pool: &PgPool) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sources WHERE channel_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Load and row-lock a channel inside a transaction
    pub async fn lock_for_update(
        id: ChannelId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sources WHERE channel_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a channel; returns `None` when the id is already taken
    pub async fn insert_if_absent(
        record: &ChannelRecord,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sources (channel_id, channel_name, bias, username, invite, avatar_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (channel_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(record.channel_id)
        .bind(&record.channel_name)
        .bind(record.bias.tag())
        .bind(&record.username)
        .bind(&record.invite)
        .bind(record.avatar_id)
        .fetch_optional(conn)
        .await
    }

    /// Replace every mutable column of an existing channel
    pub async fn overwrite(record: &ChannelRecord, conn: &mut PgConnection) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE sources SET
                channel_name = $2,
                bias = $3,
                username = $4,
                invite = $5,
                avatar_id = $6,
                updated_at = NOW()
            WHERE channel_id = $1
            RETURNING *
            "#,
        )
        .bind(record.channel_id)
        .bind(&record.channel_name)
        .bind(record.bias.tag())
        .bind(&record.username)
        .bind(&record.invite)
        .bind(record.avatar_id)
        .fetch_one(conn)
        .await
    }

    /// Filtered search ordered by name (byte order)
    pub async fn search(filter: &SearchFilter, pool: &PgPool) -> sqlx::Result<Vec<ChannelWithAvatar>> {
        let query = format!(
            r#"{}
            WHERE ($1::text IS NULL OR s.channel_name ILIKE $1)
              AND ($2::text IS NULL OR s.bias = $2)
            ORDER BY s.channel_name COLLATE "C" ASC, s.channel_id ASC
            "#,
            SELECT_WITH_AVATAR
        );

        sqlx::query_as::<_, ChannelWithAvatar>(&query)
            .bind(filter.name_pattern())
            .bind(filter.region.map(|r| r.tag()))
            .fetch_all(pool)
            .await
    }

    pub async fn find_with_avatar(
        id: ChannelId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<ChannelWithAvatar>> {
        let query = format!("{} WHERE s.channel_id = $1", SELECT_WITH_AVATAR);
        sqlx::query_as::<_, ChannelWithAvatar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every existing channel among `ids`; unknown ids are skipped
    pub async fn find_many_with_avatar(
        ids: &[ChannelId],
        pool: &PgPool,
    ) -> sqlx::Result<Vec<ChannelWithAvatar>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let query = format!(
            r#"{}
            WHERE s.channel_id = ANY($1)
            ORDER BY s.channel_name COLLATE "C" ASC, s.channel_id ASC
            "#,
            SELECT_WITH_AVATAR
        );
        sqlx::query_as::<_, ChannelWithAvatar>(&query)
            .bind(raw)
            .fetch_all(pool)
            .await
    }
}
