//! Reservation Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Reservation lifecycle state
///
/// `Requested` is a recorded travel intent with no train binding; `Active`
/// holds seats on a train; `Completed` is terminal history (seats already
/// released). Deletion removes the document entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Requested,
    Active,
    Completed,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning user (NIC)
    pub user_nic: String,
    /// Bound train; absent while the reservation is a request
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub train: Option<RecordId>,
    pub created_on: DateTime<Utc>,
    pub travel_date: DateTime<Utc>,
    pub start_station: String,
    pub end_station: String,
    pub luxury_seats: u32,
    pub economy_seats: u32,
    /// Total fare in whole rupees; zero for requests
    pub total_fare: i64,
    pub status: ReservationStatus,
    /// Train name snapshotted when the reservation completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_train_name: Option<String>,
    /// Requester NIC (requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    /// Requested travel date (requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_for: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn seat_total(&self) -> u32 {
        self.luxury_seats + self.economy_seats
    }
}

/// Create reservation payload (direct booking)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationCreate {
    pub user_nic: String,
    pub train_id: String,
    pub travel_date: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub start_station: String,
    #[validate(length(min = 1))]
    pub end_station: String,
    pub luxury_seats: u32,
    pub economy_seats: u32,
}

/// Create reservation request payload (travel intent, no train binding)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationRequestCreate {
    pub requested_by: String,
    pub requested_for: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub start_station: String,
    #[validate(length(min = 1))]
    pub end_station: String,
    pub luxury_seats: u32,
    pub economy_seats: u32,
}

/// Update reservation payload
///
/// All fields are required: an update always re-states the full mutable
/// part of the booking (seats, stations, travel date).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationUpdate {
    pub travel_date: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub start_station: String,
    #[validate(length(min = 1))]
    pub end_station: String,
    pub luxury_seats: u32,
    pub economy_seats: u32,
}
