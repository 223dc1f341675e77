//! Train API Handlers
//!
//! Fleet lifecycle rules: trains are created inactive, activate only with
//! a schedule, and cannot be edited, rescheduled, or retired while
//! reservations are bound to them.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::api::convert::{repo_error, validated};
use crate::booking::{ReservationEngine, TrainReconciliation};
use crate::core::ServerState;
use crate::db::models::{Train, TrainCreate, TrainForBooking, TrainUpdate};
use crate::db::repository::{ScheduleRepository, TrainRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

async fn fetch_train(repo: &TrainRepository, id: &str) -> AppResult<(Train, RecordId)> {
    let train = repo
        .find_by_id(id)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::TrainNotFound, format!("Train {} not found", id))
        })?;
    let rid = train
        .id
        .clone()
        .ok_or_else(|| AppError::internal("train record has no id"))?;
    Ok((train, rid))
}

/// List all trains
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Train>>> {
    let repo = TrainRepository::new(state.db.clone());
    let trains = repo.find_all().await.map_err(repo_error)?;
    Ok(Json(trains))
}

/// List active trains with seat availability for the booking screens
pub async fn for_booking(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TrainForBooking>>> {
    let repo = TrainRepository::new(state.db.clone());
    let trains = repo.find_for_booking().await.map_err(repo_error)?;
    Ok(Json(trains))
}

/// Get train by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Train>> {
    let repo = TrainRepository::new(state.db.clone());
    let (train, _) = fetch_train(&repo, &id).await?;
    Ok(Json(train))
}

/// Create a train (inactive, no schedule, zero occupancy)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TrainCreate>,
) -> AppResult<Json<Train>> {
    let payload = validated(payload)?;
    let repo = TrainRepository::new(state.db.clone());
    let train = repo.create(payload).await.map_err(repo_error)?;
    Ok(Json(train))
}

/// Update name and capacities; rejected while reservations are bound
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TrainUpdate>,
) -> AppResult<Json<Train>> {
    let payload = validated(payload)?;
    let repo = TrainRepository::new(state.db.clone());
    let (train, rid) = fetch_train(&repo, &id).await?;

    if !train.reservations.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::TrainHasReservations,
            "Cannot update reserved trains",
        ));
    }

    let train = repo.update_details(&rid, payload).await.map_err(repo_error)?;
    Ok(Json(train))
}

#[derive(Debug, Deserialize)]
pub struct AssignScheduleRequest {
    pub schedule_id: String,
}

/// Assign a schedule to a train and activate it
pub async fn assign_schedule(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssignScheduleRequest>,
) -> AppResult<Json<Train>> {
    let repo = TrainRepository::new(state.db.clone());
    let (train, rid) = fetch_train(&repo, &id).await?;

    if !train.reservations.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::TrainHasReservations,
            "Cannot change schedule of reserved trains",
        ));
    }

    let schedules = ScheduleRepository::new(state.db.clone());
    let schedule = schedules
        .find_by_id(&payload.schedule_id)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ScheduleNotFound,
                format!("Schedule {} not found", payload.schedule_id),
            )
        })?;
    let schedule_id = schedule
        .id
        .ok_or_else(|| AppError::internal("schedule record has no id"))?;

    let train = repo
        .assign_schedule(&rid, &schedule_id)
        .await
        .map_err(repo_error)?;
    Ok(Json(train))
}

/// Activate a train; it must already carry a schedule
pub async fn activate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Train>> {
    let repo = TrainRepository::new(state.db.clone());
    let (train, rid) = fetch_train(&repo, &id).await?;

    if train.schedule.is_none() {
        return Err(AppError::with_message(
            ErrorCode::ScheduleNotAssigned,
            "Please assign a schedule first",
        ));
    }

    let train = repo.activate(&rid).await.map_err(repo_error)?;
    Ok(Json(train))
}

/// Deactivate a train; rejected while reservations are bound
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Train>> {
    let repo = TrainRepository::new(state.db.clone());
    let (train, rid) = fetch_train(&repo, &id).await?;

    if !train.reservations.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::TrainHasReservations,
            "Cannot deactivate train with reservations",
        ));
    }

    let train = repo.deactivate(&rid).await.map_err(repo_error)?;
    Ok(Json(train))
}

/// Delete an inactive train
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TrainRepository::new(state.db.clone());
    let (train, rid) = fetch_train(&repo, &id).await?;

    if train.is_active {
        return Err(AppError::with_message(
            ErrorCode::TrainStillActive,
            "Cannot delete an active train",
        ));
    }

    let result = repo.delete(&rid).await.map_err(repo_error)?;
    Ok(Json(result))
}

/// Recompute the occupancy aggregate from the active reservations
pub async fn reconcile(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TrainReconciliation>> {
    let engine = ReservationEngine::new(state.db.clone());
    let report = engine.reconcile_train(&id).await?;
    Ok(Json(report))
}
