//! Reservation API Handlers
//!
//! Thin wrappers over the reservation engine; every business rule lives in
//! `booking::ReservationEngine`.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::validated;
use crate::booking::ReservationEngine;
use crate::core::ServerState;
use crate::db::models::{
    Reservation, ReservationCreate, ReservationRequestCreate, ReservationUpdate, is_valid_nic,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List all reservations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let engine = ReservationEngine::new(state.db.clone());
    let reservations = engine.get_all().await?;
    Ok(Json(reservations))
}

/// Get reservation by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let engine = ReservationEngine::new(state.db.clone());
    let reservation = engine.get_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ReservationNotFound,
            format!("Reservation {} not found", id),
        )
    })?;
    Ok(Json(reservation))
}

/// Get all reservations held by a user
pub async fn get_by_user(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    if !is_valid_nic(&nic) {
        return Err(AppError::new(ErrorCode::InvalidNic));
    }
    let engine = ReservationEngine::new(state.db.clone());
    let reservations = engine.get_by_user(&nic).await?;
    Ok(Json(reservations))
}

/// Create a reservation (direct booking)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let payload = validated(payload)?;
    let engine = ReservationEngine::new(state.db.clone());
    let reservation = engine.create(payload).await?;
    Ok(Json(reservation))
}

/// Record a reservation request (travel intent)
pub async fn create_request(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationRequestCreate>,
) -> AppResult<Json<Reservation>> {
    let payload = validated(payload)?;
    let engine = ReservationEngine::new(state.db.clone());
    let reservation = engine.create_request(payload).await?;
    Ok(Json(reservation))
}

/// Update an active reservation
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let payload = validated(payload)?;
    let engine = ReservationEngine::new(state.db.clone());
    let reservation = engine.update(&id, payload).await?;
    Ok(Json(reservation))
}

/// Delete a reservation
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let engine = ReservationEngine::new(state.db.clone());
    engine.delete(&id).await?;
    Ok(Json(true))
}

/// Mark a reservation as travelled (kept as history)
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let engine = ReservationEngine::new(state.db.clone());
    let reservation = engine.complete(&id).await?;
    Ok(Json(reservation))
}
