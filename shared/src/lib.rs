//! Shared types for the booking backend
//!
//! Currently this crate carries the unified error system (codes, categories,
//! [`error::AppError`], [`error::ApiResponse`]) used by the server and any
//! future clients. Keeping it in its own crate keeps the wire contract in
//! one place.

pub mod error;

// Re-export the common error surface at the crate root
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
