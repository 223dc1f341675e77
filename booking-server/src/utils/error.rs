//! Error re-exports
//!
//! The canonical definitions live in `shared::error` so that any future
//! client crates share the same codes and response envelope.

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
