//! Schedule API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::{repo_error, validated};
use crate::core::ServerState;
use crate::db::models::{Schedule, ScheduleCreate, ScheduleUpdate};
use crate::db::repository::{RouteRepository, ScheduleRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List all schedules
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Schedule>>> {
    let repo = ScheduleRepository::new(state.db.clone());
    let schedules = repo.find_all().await.map_err(repo_error)?;
    Ok(Json(schedules))
}

/// Get schedule by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Schedule>> {
    let repo = ScheduleRepository::new(state.db.clone());
    let schedule = repo
        .find_by_id(&id)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ScheduleNotFound,
                format!("Schedule {} not found", id),
            )
        })?;
    Ok(Json(schedule))
}

/// Create a schedule on a named route, snapshotting its station order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ScheduleCreate>,
) -> AppResult<Json<Schedule>> {
    let payload = validated(payload)?;

    let routes = RouteRepository::new(state.db.clone());
    let route = routes
        .find_by_name(&payload.route)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RouteNotFound,
                format!("Route '{}' not found", payload.route),
            )
        })?;

    let repo = ScheduleRepository::new(state.db.clone());
    let schedule = repo.create(payload, &route).await.map_err(repo_error)?;
    Ok(Json(schedule))
}

/// Update fares, operating days, and times
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ScheduleUpdate>,
) -> AppResult<Json<Schedule>> {
    let payload = validated(payload)?;
    let repo = ScheduleRepository::new(state.db.clone());
    let schedule = repo.update(&id, payload).await.map_err(repo_error)?;
    Ok(Json(schedule))
}

/// Delete a schedule
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ScheduleRepository::new(state.db.clone());
    let result = repo.delete(&id).await.map_err(repo_error)?;
    Ok(Json(result))
}
