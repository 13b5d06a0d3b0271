use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure taxonomy for the whole API. Everything below the router raises
/// one of these and propagates it unhandled; translation to a transport
/// status happens exactly once, in `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("referenced {0} not found")]
    InvalidReference(&'static str),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("permission denied")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidReference(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidReference(_) => "INVALID_REFERENCE",
            ApiError::DuplicateEmail => "DUPLICATE_EMAIL",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            // The source error stays in the logs; clients get a generic line.
            tracing::error!(error = ?err, "internal error");
        }
        let body = json!({
            "error": true,
            "message": self.to_string(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::NotFound("user").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidReference("class").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthenticated("missing token").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Validation("bad email".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_never_leak_internal_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused (10.0.0.3:5432)"));
        assert_eq!(err.to_string(), "internal error");
        assert_eq!(err.code(), "INTERNAL");
    }

    #[test]
    fn reference_errors_name_the_entity() {
        assert_eq!(
            ApiError::InvalidReference("user").to_string(),
            "referenced user not found"
        );
        assert_eq!(
            ApiError::InvalidReference("class").to_string(),
            "referenced class not found"
        );
        assert_eq!(ApiError::NotFound("attendance").to_string(), "attendance not found");
    }
}
