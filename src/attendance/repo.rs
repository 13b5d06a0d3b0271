use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{classes::repo::Class, error::ApiError, users::repo::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// One attendance event: a user seen (or not) in a class at a point in time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub recorded_at: OffsetDateTime,
    pub status: AttendanceStatus,
}

/// Optional list filters; both combine with logical AND.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttendanceFilter {
    pub class_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

const ATTENDANCE_COLUMNS: &str = "id, user_id, class_id, recorded_at, status";

impl Attendance {
    /// Both references are checked explicitly before the insert so the
    /// caller learns WHICH one is dangling, not just that an FK tripped.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        class_id: Uuid,
        status: AttendanceStatus,
        recorded_at: Option<OffsetDateTime>,
    ) -> Result<Attendance, ApiError> {
        if User::find_active_by_id(db, user_id).await?.is_none() {
            return Err(ApiError::InvalidReference("user"));
        }
        if Class::find_by_id(db, class_id).await?.is_none() {
            return Err(ApiError::InvalidReference("class"));
        }

        let recorded_at = recorded_at.unwrap_or_else(OffsetDateTime::now_utc);
        let row = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            INSERT INTO attendance (user_id, class_id, recorded_at, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(class_id)
        .bind(recorded_at)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Attendance>, ApiError> {
        let row = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list(
        db: &PgPool,
        filter: AttendanceFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Attendance>, ApiError> {
        let rows = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance
            WHERE ($1::uuid IS NULL OR class_id = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY recorded_at, id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.class_id)
        .bind(filter.user_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Merge-patch: status and, when supplied, the references move; absent
    /// fields stay put. Status transitions are unconstrained (corrections
    /// are expected).
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        status: Option<AttendanceStatus>,
        user_id: Option<Uuid>,
        class_id: Option<Uuid>,
    ) -> Result<Attendance, ApiError> {
        if let Some(user_id) = user_id {
            if User::find_active_by_id(db, user_id).await?.is_none() {
                return Err(ApiError::InvalidReference("user"));
            }
        }
        if let Some(class_id) = class_id {
            if Class::find_by_id(db, class_id).await?.is_none() {
                return Err(ApiError::InvalidReference("class"));
            }
        }

        sqlx::query_as::<_, Attendance>(&format!(
            r#"
            UPDATE attendance
            SET status = COALESCE($2, status),
                user_id = COALESCE($3, user_id),
                class_id = COALESCE($4, class_id)
            WHERE id = $1
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(user_id)
        .bind(class_id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("attendance"))
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<Attendance, ApiError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "DELETE FROM attendance WHERE id = $1 RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("attendance"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Late).unwrap(),
            "\"late\""
        );
        let parsed: AttendanceStatus = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Absent);
    }
}
