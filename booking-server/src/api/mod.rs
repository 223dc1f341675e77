//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`reservations`] - reservation lifecycle (the booking core)
//! - [`trains`] - fleet management
//! - [`users`] - account management
//! - [`schedules`] / [`routes`] - catalog management
//!
//! Each resource module exposes a `router()` merged by
//! `core::server::build_app`.

pub mod convert;

pub mod health;

// Data model APIs
pub mod reservations;
pub mod routes;
pub mod schedules;
pub mod trains;
pub mod users;
