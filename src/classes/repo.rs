use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, Time};
use uuid::Uuid;

use crate::{error::ApiError, users::repo::User};

/// Scheduled class, owned by the teacher who created it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub teacher_id: Uuid,
}

const CLASS_COLUMNS: &str = "id, name, date, start_time, end_time, teacher_id";

impl Class {
    /// The owner id comes from the authenticated caller, but the registry
    /// re-checks it resolves to an active user so the invariant does not
    /// depend on the transport layer.
    pub async fn create(
        db: &PgPool,
        name: &str,
        date: Date,
        start_time: Time,
        end_time: Time,
        teacher_id: Uuid,
    ) -> Result<Class, ApiError> {
        if User::find_active_by_id(db, teacher_id).await?.is_none() {
            return Err(ApiError::InvalidReference("user"));
        }

        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            INSERT INTO classes (name, date, start_time, end_time, teacher_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLASS_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;
        Ok(class)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Class>, ApiError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(class)
    }

    pub async fn list(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<Class>, ApiError> {
        let rows = sqlx::query_as::<_, Class>(&format!(
            r#"
            SELECT {CLASS_COLUMNS}
            FROM classes
            ORDER BY date, start_time, id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Full-field replace; the owner is not reassignable.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        date: Date,
        start_time: Time,
        end_time: Time,
    ) -> Result<Class, ApiError> {
        sqlx::query_as::<_, Class>(&format!(
            r#"
            UPDATE classes
            SET name = $2, date = $3, start_time = $4, end_time = $5
            WHERE id = $1
            RETURNING {CLASS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("class"))
    }

    /// Hard delete; echoes the removed record. Attendance rows pointing at
    /// the class go with it (FK cascade).
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<Class, ApiError> {
        sqlx::query_as::<_, Class>(&format!(
            "DELETE FROM classes WHERE id = $1 RETURNING {CLASS_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("class"))
    }
}
