use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::attendance::repo::AttendanceStatus;

#[derive(Debug, Deserialize)]
pub struct CreateAttendanceRequest {
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub status: AttendanceStatus,
    /// Defaults to now (UTC) when omitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub recorded_at: Option<OffsetDateTime>,
}

/// Merge-patch body; references are re-validated when present.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub user_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub class_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_recorded_at_to_none() {
        let req: CreateAttendanceRequest = serde_json::from_str(&format!(
            r#"{{"user_id":"{}","class_id":"{}","status":"present"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
        ))
        .unwrap();
        assert!(req.recorded_at.is_none());
        assert_eq!(req.status, AttendanceStatus::Present);
    }

    #[test]
    fn create_accepts_explicit_timestamp() {
        let req: CreateAttendanceRequest = serde_json::from_str(&format!(
            r#"{{"user_id":"{}","class_id":"{}","status":"late","recorded_at":"2026-03-02T08:15:00Z"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
        ))
        .unwrap();
        let ts = req.recorded_at.expect("timestamp");
        assert_eq!(ts.year(), 2026);
        assert_eq!(u8::from(ts.month()), 3);
    }

    #[test]
    fn update_treats_absent_fields_as_none() {
        let patch: UpdateAttendanceRequest = serde_json::from_str(r#"{"status":"late"}"#).unwrap();
        assert_eq!(patch.status, Some(AttendanceStatus::Late));
        assert!(patch.user_id.is_none());
        assert!(patch.class_id.is_none());
    }

    #[test]
    fn list_query_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(q.class_id.is_none());
        assert!(q.user_id.is_none());
        assert_eq!(q.skip, 0);
        assert_eq!(q.limit, 10);
    }
}
