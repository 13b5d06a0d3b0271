use serde::Deserialize;
use time::{Date, Time};

/// Body for class creation; the owner comes from the caller's token, not
/// the payload.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
}

/// Full replace on update (same shape as creation).
pub type UpdateClassRequest = CreateClassRequest;

#[derive(Debug, Deserialize)]
pub struct Pagination {
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
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn create_request_parses_date_and_times() {
        let req: CreateClassRequest = serde_json::from_str(
            r#"{"name":"Algebra I","date":"2026-09-01","start_time":"09:00:00.0","end_time":"10:30:00.0"}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Algebra I");
        assert_eq!(req.date, time::macros::date!(2026 - 09 - 01));
        assert_eq!(req.start_time, time::macros::time!(09:00));
    }
}
