use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, never exposed in JSON
    pub role: Role,
    pub registered_at: OffsetDateTime,
    pub active: bool,
}

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, role, registered_at, active";

impl User {
    /// Insert a new active user. A racing duplicate registration slips past
    /// the caller's pre-check and trips the partial unique index instead;
    /// both paths surface as `DuplicateEmail`.
    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, ApiError> {
        let res = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ApiError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find an active user by id. Deactivated rows are invisible here.
    pub async fn find_active_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND active"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find an active user by email.
    pub async fn find_active_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND active"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// All users in registration order, deactivated ones included (this
    /// backs the admin listing).
    pub async fn list(db: &PgPool, skip: i64, limit: i64) -> Result<Vec<User>, ApiError> {
        let rows = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY registered_at, id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Merge-patch: absent fields keep their current value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        password_hash: Option<&str>,
        role: Option<Role>,
    ) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role)
            WHERE id = $1 AND active
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(password_hash)
        .bind(role)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("user"))
    }

    /// Soft delete: the row stays, lookups scoped to active users stop
    /// seeing it. Does not cascade to classes or attendance.
    pub async fn deactivate(db: &PgPool, id: Uuid) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET active = FALSE
            WHERE id = $1 AND active
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_user_never_contains_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".into(),
            role: Role::Teacher,
            registered_at: OffsetDateTime::now_utc(),
            active: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("grace@example.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        let parsed: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(parsed, Role::Student);
    }
}
