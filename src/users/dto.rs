use serde::Deserialize;

use crate::users::repo::Role;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Merge-patch body: only fields present in the payload are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_treats_absent_fields_as_none() {
        let patch: UpdateUserRequest = serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("Ada"));
        assert!(patch.last_name.is_none());
        assert!(patch.password.is_none());
        assert!(patch.role.is_none());
    }

    #[test]
    fn update_accepts_full_payload() {
        let patch: UpdateUserRequest = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","password":"new-secret","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(patch.role, Some(Role::Admin));
        assert_eq!(patch.password.as_deref(), Some("new-secret"));
    }

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
    }
}
