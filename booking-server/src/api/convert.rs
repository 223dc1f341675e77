//! Handler-side error conversions

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

/// Map a repository error onto the shared error-code space
pub fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        RepoError::Database(msg) => AppError::database(msg),
    }
}

/// Run payload validation and surface failures as a validation error
pub fn validated<T: validator::Validate>(payload: T) -> Result<T, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(payload)
}
