//! Unified error codes for the booking backend
//!
//! This module defines all error codes used across the server and any
//! future clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Reservation errors
//! - 5xxx: Train errors
//! - 6xxx: Catalog errors (schedules, routes)
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Referenced user or train does not exist
    InvalidReference = 4002,
    /// User role cannot hold a reservation
    InvalidRole = 4003,
    /// User or train is inactive
    InactiveEntity = 4004,
    /// User holds the maximum number of live reservations
    QuotaExceeded = 4005,
    /// Requested seat total is below one
    InvalidSeatCount = 4006,
    /// Mutation attempted inside the booking window
    BookingWindowViolation = 4007,
    /// Luxury seat capacity exceeded
    LuxuryCapacityExceeded = 4008,
    /// Economy seat capacity exceeded
    EconomyCapacityExceeded = 4009,
    /// Station is not on the schedule's route
    StationNotFound = 4010,
    /// Reservation request cannot be edited or completed directly
    RequestNotEditable = 4011,
    /// Reservation has already been completed
    ReservationAlreadyCompleted = 4012,
    /// Start and end stations are the same
    ZeroDistanceJourney = 4013,

    // ==================== 5xxx: Train ====================
    /// Train not found
    TrainNotFound = 5001,
    /// Train has bound reservations
    TrainHasReservations = 5002,
    /// Train has no assigned schedule
    ScheduleNotAssigned = 5003,
    /// Train is still active
    TrainStillActive = 5004,

    // ==================== 6xxx: Catalog ====================
    /// Schedule not found
    ScheduleNotFound = 6001,
    /// Route not found
    RouteNotFound = 6101,
    /// Route name already exists
    RouteNameExists = 6102,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// User is still active
    UserStillActive = 8002,
    /// NIC format is invalid
    InvalidNic = 8003,
    /// A user with this NIC already exists
    NicExists = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidReference => "Referenced user or train does not exist",
            ErrorCode::InvalidRole => "User role cannot hold a reservation",
            ErrorCode::InactiveEntity => "User or train is inactive",
            ErrorCode::QuotaExceeded => "Maximum number of live reservations reached",
            ErrorCode::InvalidSeatCount => "A reservation needs at least one seat",
            ErrorCode::BookingWindowViolation => {
                "Reservations cannot be changed within 5 days of travel"
            }
            ErrorCode::LuxuryCapacityExceeded => "Luxury seat capacity exceeded",
            ErrorCode::EconomyCapacityExceeded => "Economy seat capacity exceeded",
            ErrorCode::StationNotFound => "Station is not on the schedule's route",
            ErrorCode::RequestNotEditable => "Reservation requests cannot be edited directly",
            ErrorCode::ReservationAlreadyCompleted => "Reservation has already been completed",
            ErrorCode::ZeroDistanceJourney => "Start and end stations are the same",

            // Train
            ErrorCode::TrainNotFound => "Train not found",
            ErrorCode::TrainHasReservations => "Train has bound reservations",
            ErrorCode::ScheduleNotAssigned => "Train has no assigned schedule",
            ErrorCode::TrainStillActive => "Train is still active",

            // Catalog
            ErrorCode::ScheduleNotFound => "Schedule not found",
            ErrorCode::RouteNotFound => "Route not found",
            ErrorCode::RouteNameExists => "Route name already exists",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserStillActive => "User is still active",
            ErrorCode::InvalidNic => "NIC must be 12 digits or 9 digits followed by 'v'",
            ErrorCode::NicExists => "A user with this NIC already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::InvalidReference),
            4003 => Ok(ErrorCode::InvalidRole),
            4004 => Ok(ErrorCode::InactiveEntity),
            4005 => Ok(ErrorCode::QuotaExceeded),
            4006 => Ok(ErrorCode::InvalidSeatCount),
            4007 => Ok(ErrorCode::BookingWindowViolation),
            4008 => Ok(ErrorCode::LuxuryCapacityExceeded),
            4009 => Ok(ErrorCode::EconomyCapacityExceeded),
            4010 => Ok(ErrorCode::StationNotFound),
            4011 => Ok(ErrorCode::RequestNotEditable),
            4012 => Ok(ErrorCode::ReservationAlreadyCompleted),
            4013 => Ok(ErrorCode::ZeroDistanceJourney),

            // Train
            5001 => Ok(ErrorCode::TrainNotFound),
            5002 => Ok(ErrorCode::TrainHasReservations),
            5003 => Ok(ErrorCode::ScheduleNotAssigned),
            5004 => Ok(ErrorCode::TrainStillActive),

            // Catalog
            6001 => Ok(ErrorCode::ScheduleNotFound),
            6101 => Ok(ErrorCode::RouteNotFound),
            6102 => Ok(ErrorCode::RouteNameExists),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserStillActive),
            8003 => Ok(ErrorCode::InvalidNic),
            8004 => Ok(ErrorCode::NicExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ReservationNotFound.code(), 4001);
        assert_eq!(ErrorCode::LuxuryCapacityExceeded.code(), 4008);
        assert_eq!(ErrorCode::TrainNotFound.code(), 5001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::QuotaExceeded,
            ErrorCode::BookingWindowViolation,
            ErrorCode::EconomyCapacityExceeded,
            ErrorCode::NicExists,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::QuotaExceeded.to_string(), "E4005");
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::StationNotFound).unwrap();
        assert_eq!(json, "4010");
        let code: ErrorCode = serde_json::from_str("4007").unwrap();
        assert_eq!(code, ErrorCode::BookingWindowViolation);
    }
}
