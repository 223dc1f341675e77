//! User API Handlers
//!
//! Account lifecycle. Deactivation cascades through the reservation engine
//! so held seats are released; deletion is only allowed for inactive
//! accounts.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::{repo_error, validated};
use crate::booking::{ReservationEngine, UserReconciliation};
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate, is_valid_nic};
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

async fn fetch_user(repo: &UserRepository, nic: &str) -> AppResult<User> {
    repo.find_by_nic(nic)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", nic))
        })
}

/// List all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await.map_err(repo_error)?;
    Ok(Json(users))
}

/// Get user by NIC
pub async fn get_by_nic(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    let user = fetch_user(&repo, &nic).await?;
    Ok(Json(user))
}

/// Create a new user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let payload = validated(payload)?;
    if !is_valid_nic(&payload.nic) {
        return Err(AppError::new(ErrorCode::InvalidNic));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await.map_err(|err| match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::NicExists, msg),
        other => repo_error(other),
    })?;
    Ok(Json(user))
}

/// Update profile fields
pub async fn update(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let payload = validated(payload)?;
    let repo = UserRepository::new(state.db.clone());
    fetch_user(&repo, &nic).await?;
    let user = repo.update(&nic, payload).await.map_err(repo_error)?;
    Ok(Json(user))
}

/// Activate a user account
pub async fn activate(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    fetch_user(&repo, &nic).await?;
    let user = repo.activate(&nic).await.map_err(repo_error)?;
    Ok(Json(user))
}

/// Deactivate a user account, cancelling their live reservations first
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    let user = fetch_user(&repo, &nic).await?;

    // Cascade: each live reservation releases its seats through the
    // engine. Near-term reservations inside the booking window stay
    // behind and are surfaced for reconciliation.
    let engine = ReservationEngine::new(state.db.clone());
    for rid in &user.reservation_ids {
        if let Err(err) = engine.delete(&rid.to_string()).await {
            tracing::warn!(
                user = %nic, reservation = %rid, error = %err,
                "failed to cancel reservation while deactivating user"
            );
        }
    }

    let user = repo.deactivate(&nic).await.map_err(repo_error)?;
    Ok(Json(user))
}

/// Delete an inactive user
pub async fn delete(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    let user = fetch_user(&repo, &nic).await?;

    if user.is_active {
        return Err(AppError::with_message(
            ErrorCode::UserStillActive,
            "Cannot delete an active user",
        ));
    }

    let result = repo.delete(&nic).await.map_err(repo_error)?;
    Ok(Json(result))
}

/// Rebuild the reservation back-reference list
pub async fn reconcile(
    State(state): State<ServerState>,
    Path(nic): Path<String>,
) -> AppResult<Json<UserReconciliation>> {
    let engine = ReservationEngine::new(state.db.clone());
    let report = engine.reconcile_user(&nic).await?;
    Ok(Json(report))
}
