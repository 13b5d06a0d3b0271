use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    attendance::{
        dto::{CreateAttendanceRequest, ListQuery, UpdateAttendanceRequest},
        repo::{Attendance, AttendanceFilter},
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(list_attendance).post(create_attendance))
        .route(
            "/attendance/:id",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_attendance(
    State(state): State<AppState>,
    Json(payload): Json<CreateAttendanceRequest>,
) -> Result<Json<Attendance>, ApiError> {
    let row = Attendance::create(
        &state.db,
        payload.user_id,
        payload.class_id,
        payload.status,
        payload.recorded_at,
    )
    .await?;
    info!(attendance_id = %row.id, user_id = %row.user_id, class_id = %row.class_id, "attendance recorded");
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    let filter = AttendanceFilter {
        class_id: q.class_id,
        user_id: q.user_id,
    };
    let rows = Attendance::list(&state.db, filter, q.skip, q.limit).await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Attendance>, ApiError> {
    let row = Attendance::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("attendance"))?;
    Ok(Json(row))
}

#[instrument(skip(state, payload))]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendanceRequest>,
) -> Result<Json<Attendance>, ApiError> {
    let row = Attendance::update(
        &state.db,
        id,
        payload.status,
        payload.user_id,
        payload.class_id,
    )
    .await?;
    info!(attendance_id = %row.id, "attendance updated");
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Attendance>, ApiError> {
    let row = Attendance::delete(&state.db, id).await?;
    info!(attendance_id = %row.id, "attendance deleted");
    Ok(Json(row))
}
