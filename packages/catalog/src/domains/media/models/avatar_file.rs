use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FileId, UserId};

/// Uploaded avatar recorded against its blob store key (row in `files`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AvatarFile {
    pub id: FileId,
    pub key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i32,
    pub uploaded_by: UserId,
    pub uploaded_at: DateTime<Utc>,
}

/// Input for recording an uploaded avatar
#[derive(Debug, Clone)]
pub struct CreateAvatarFile {
    pub key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i32,
    pub uploaded_by: UserId,
}

impl AvatarFile {
    pub async fn create(input: CreateAvatarFile, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO files (id, key, file_name, content_type, size_bytes, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(FileId::new())
        .bind(&input.key)
        .bind(&input.file_name)
        .bind(&input.content_type)
        .bind(input.size_bytes)
        .bind(&input.uploaded_by)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: FileId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// True while a catalog entry or a still-pending submission points at the file
    pub async fn is_referenced(id: FileId, pool: &PgPool) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM sources WHERE avatar_id = $1)
                OR EXISTS(SELECT 1 FROM pending_creations WHERE avatar_id = $1 AND status = 'pending')
                OR EXISTS(SELECT 1 FROM pending_edits WHERE avatar_id = $1 AND status = 'pending')
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(id: FileId, pool: &PgPool) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
