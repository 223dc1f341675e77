//! Booking error taxonomy

use crate::db::models::UserRole;
use crate::db::repository::RepoError;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use std::fmt;
use thiserror::Error;

use super::MAX_LIVE_RESERVATIONS;
use super::window::MIN_BOOKING_LEAD_DAYS;

/// The two independently capacitated seat pools on a train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    Luxury,
    Economy,
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatClass::Luxury => f.write_str("luxury"),
            SeatClass::Economy => f.write_str("economy"),
        }
    }
}

/// Failure reasons for reservation operations
///
/// Every expected validation failure is a variant here; only unexpected
/// store faults travel through `Repo`.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("reservation {0} not found")]
    ReservationNotFound(String),

    #[error("schedule for {0} not found")]
    ScheduleNotFound(String),

    #[error("invalid user NIC or train reference")]
    InvalidReference,

    #[error("role {0} cannot hold a reservation")]
    InvalidRole(UserRole),

    #[error("cannot reserve seats on an inactive train")]
    InactiveTrain,

    #[error("cannot create a reservation for an inactive user")]
    InactiveUser,

    #[error("user has reached the maximum limit of {} reservations", MAX_LIVE_RESERVATIONS)]
    QuotaExceeded,

    #[error("a reservation needs at least one seat")]
    InvalidSeatCount,

    #[error("start and end stations are the same")]
    ZeroDistance,

    #[error(
        "reservations cannot be placed or changed within {} days of the travel date",
        MIN_BOOKING_LEAD_DAYS
    )]
    BookingWindowViolation,

    #[error("{0} seat capacity exceeded, reduce the number of seats")]
    CapacityExceeded(SeatClass),

    #[error("station '{0}' is not on this schedule")]
    StationNotFound(String),

    #[error("reservation requests cannot be edited or completed directly")]
    RequestNotEditable,

    #[error("reservation has already been completed")]
    AlreadyCompleted,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let code = match &err {
            BookingError::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            BookingError::ScheduleNotFound(_) => ErrorCode::ScheduleNotFound,
            BookingError::InvalidReference => ErrorCode::InvalidReference,
            BookingError::InvalidRole(_) => ErrorCode::InvalidRole,
            BookingError::InactiveTrain | BookingError::InactiveUser => ErrorCode::InactiveEntity,
            BookingError::QuotaExceeded => ErrorCode::QuotaExceeded,
            BookingError::InvalidSeatCount => ErrorCode::InvalidSeatCount,
            BookingError::ZeroDistance => ErrorCode::ZeroDistanceJourney,
            BookingError::BookingWindowViolation => ErrorCode::BookingWindowViolation,
            BookingError::CapacityExceeded(SeatClass::Luxury) => ErrorCode::LuxuryCapacityExceeded,
            BookingError::CapacityExceeded(SeatClass::Economy) => {
                ErrorCode::EconomyCapacityExceeded
            }
            BookingError::StationNotFound(_) => ErrorCode::StationNotFound,
            BookingError::RequestNotEditable => ErrorCode::RequestNotEditable,
            BookingError::AlreadyCompleted => ErrorCode::ReservationAlreadyCompleted,
            BookingError::Repo(RepoError::NotFound(_)) => ErrorCode::NotFound,
            BookingError::Repo(RepoError::Duplicate(_)) => ErrorCode::AlreadyExists,
            BookingError::Repo(RepoError::Validation(_)) => ErrorCode::ValidationFailed,
            BookingError::Repo(RepoError::Database(_)) => ErrorCode::DatabaseError,
        };
        AppError::with_message(code, err.to_string())
    }
}
