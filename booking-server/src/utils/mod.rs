//! Utility module - shared helpers and re-exported error types
//!
//! # Contents
//!
//! - [`AppError`] / [`ApiResponse`] - unified error surface (from `shared::error`)
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

// Re-export error types from the error module (which re-exports from shared)
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
