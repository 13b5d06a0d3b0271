use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{extractors::CurrentUser, password::hash_password},
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, Pagination, UpdateUserRequest},
        repo::{Role, User},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register).get(list_users))
        .route("/users/me", get(me))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(deactivate_user),
        )
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

const MIN_PASSWORD_LEN: usize = 8;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::Validation("password too short".into()));
    }

    // Pre-check for a clear error; the partial unique index backstops races.
    if User::find_active_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;
    let user = User::create(
        &state.db,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &hash,
        payload.role,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(user))
}

#[instrument(skip(state, caller))]
pub async fn list_users(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<User>>, ApiError> {
    caller.require_role(Role::Admin)?;
    let users = User::list(&state.db, p.skip, p.limit).await?;
    Ok(Json(users))
}

#[instrument(skip(caller))]
pub async fn me(caller: CurrentUser) -> Json<User> {
    Json(caller.0)
}

#[instrument(skip(state, _caller))]
pub async fn get_user(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = User::find_active_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user))
}

#[instrument(skip(state, caller, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let target = User::find_active_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    if caller.role != Role::Admin && caller.id != target.id {
        warn!(caller = %caller.id, target = %target.id, "update denied");
        return Err(ApiError::Forbidden);
    }

    let new_hash = match payload.password.as_deref() {
        Some(p) if p.len() < MIN_PASSWORD_LEN => {
            return Err(ApiError::Validation("password too short".into()))
        }
        Some(p) => Some(hash_password(p).map_err(ApiError::Internal)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        id,
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        new_hash.as_deref(),
        payload.role,
    )
    .await?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state, caller))]
pub async fn deactivate_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let target = User::find_active_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    if caller.role != Role::Admin && caller.id != target.id {
        warn!(caller = %caller.id, target = %target.id, "deactivate denied");
        return Err(ApiError::Forbidden);
    }

    let user = User::deactivate(&state.db, id).await?;
    info!(user_id = %user.id, "user deactivated");
    Ok(Json(user))
}
