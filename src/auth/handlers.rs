use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, TokenResponse},
        jwt::JwtKeys,
        password::verify_password,
    },
    error::ApiError,
    state::AppState,
    users::repo::User,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Exchanges email + password for a bearer token. The failure reason is
/// deliberately generic so callers cannot enumerate registered emails.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_active_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(token)))
}
