use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    classes::{
        dto::{CreateClassRequest, Pagination, UpdateClassRequest},
        repo::Class,
    },
    error::ApiError,
    state::AppState,
    users::repo::Role,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/:id",
            get(get_class).put(update_class).delete(delete_class),
        )
}

/// Teacher-only; the caller becomes the recorded owner.
#[instrument(skip(state, caller, payload))]
pub async fn create_class(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(payload): Json<CreateClassRequest>,
) -> Result<Json<Class>, ApiError> {
    let teacher = caller.require_role(Role::Teacher)?;
    let class = Class::create(
        &state.db,
        &payload.name,
        payload.date,
        payload.start_time,
        payload.end_time,
        teacher.id,
    )
    .await?;
    info!(class_id = %class.id, teacher_id = %teacher.id, "class created");
    Ok(Json(class))
}

#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Class>>, ApiError> {
    let classes = Class::list(&state.db, p.skip, p.limit).await?;
    Ok(Json(classes))
}

#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Class>, ApiError> {
    let class = Class::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("class"))?;
    Ok(Json(class))
}

#[instrument(skip(state, _caller, payload))]
pub async fn update_class(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<Json<Class>, ApiError> {
    let class = Class::update(
        &state.db,
        id,
        &payload.name,
        payload.date,
        payload.start_time,
        payload.end_time,
    )
    .await?;
    info!(class_id = %class.id, "class updated");
    Ok(Json(class))
}

#[instrument(skip(state, _caller))]
pub async fn delete_class(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Class>, ApiError> {
    let class = Class::delete(&state.db, id).await?;
    info!(class_id = %class.id, "class deleted");
    Ok(Json(class))
}
