//! Route API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert::{repo_error, validated};
use crate::core::ServerState;
use crate::db::models::{Route, RouteCreate, RouteUpdate};
use crate::db::repository::{RepoError, RouteRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List all routes
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Route>>> {
    let repo = RouteRepository::new(state.db.clone());
    let routes = repo.find_all().await.map_err(repo_error)?;
    Ok(Json(routes))
}

/// Get route by name
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Route>> {
    let repo = RouteRepository::new(state.db.clone());
    let route = repo
        .find_by_name(&name)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RouteNotFound,
                format!("Route '{}' not found", name),
            )
        })?;
    Ok(Json(route))
}

/// Create a route with an ordered station list
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RouteCreate>,
) -> AppResult<Json<Route>> {
    let payload = validated(payload)?;
    let repo = RouteRepository::new(state.db.clone());
    let route = repo.create(payload).await.map_err(|err| match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::RouteNameExists, msg),
        other => repo_error(other),
    })?;
    Ok(Json(route))
}

/// Replace the station list
pub async fn update(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(payload): Json<RouteUpdate>,
) -> AppResult<Json<Route>> {
    let payload = validated(payload)?;
    let repo = RouteRepository::new(state.db.clone());
    let route = repo.update(&name, payload).await.map_err(repo_error)?;
    Ok(Json(route))
}

/// Delete a route
pub async fn delete(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RouteRepository::new(state.db.clone());
    let result = repo.delete(&name).await.map_err(repo_error)?;
    Ok(Json(result))
}
