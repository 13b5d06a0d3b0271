use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    auth::jwt::JwtKeys,
    error::ApiError,
    state::AppState,
    users::repo::{Role, User},
};

/// Resolves the bearer token to an active user before the handler body runs.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthenticated("missing Authorization header"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthenticated("invalid auth scheme"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthenticated("invalid or expired token")
        })?;

        // Deactivated accounts keep their tokens until expiry; the lookup
        // below is what actually locks them out.
        let user = User::find_active_by_id(&state.db, claims.sub)
            .await?
            .ok_or(ApiError::Unauthenticated("user not found or inactive"))?;

        Ok(CurrentUser(user))
    }
}

impl CurrentUser {
    /// Strict role gate: the caller's role must equal `role` exactly. There
    /// is no hierarchy, so an admin does not pass a teacher-only check.
    pub fn require_role(self, role: Role) -> Result<User, ApiError> {
        if self.0.role != role {
            return Err(ApiError::Forbidden);
        }
        Ok(self.0)
    }
}
