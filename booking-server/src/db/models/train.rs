//! Train Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Train entity
///
/// The occupied seat counters are a cached aggregate over the active
/// reservations bound to the train. Only `booking::SeatInventory` may
/// change them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub train_name: String,
    /// Assigned schedule; a train without one cannot be activated
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub schedule: Option<RecordId>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    pub luxury_seat_count: u32,
    pub economy_seat_count: u32,
    #[serde(default)]
    pub occupied_luxury_seat_count: u32,
    #[serde(default)]
    pub occupied_economy_seat_count: u32,
    /// Back-reference list of bound reservation ids (lookup convenience,
    /// never authoritative for seat state)
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub reservations: Vec<RecordId>,
}

impl Train {
    pub fn available_luxury_seats(&self) -> u32 {
        self.luxury_seat_count
            .saturating_sub(self.occupied_luxury_seat_count)
    }

    pub fn available_economy_seats(&self) -> u32 {
        self.economy_seat_count
            .saturating_sub(self.occupied_economy_seat_count)
    }
}

/// Create train payload
///
/// New trains start inactive with no schedule and zero occupancy.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrainCreate {
    #[validate(length(min = 1))]
    pub train_name: String,
    #[validate(range(min = 1, max = 1000))]
    pub luxury_seat_count: u32,
    #[validate(range(min = 1, max = 1000))]
    pub economy_seat_count: u32,
}

/// Update train payload (name and capacities only; allowed only while the
/// train has no bound reservations)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrainUpdate {
    #[validate(length(min = 1))]
    pub train_name: String,
    #[validate(range(min = 1, max = 1000))]
    pub luxury_seat_count: u32,
    #[validate(range(min = 1, max = 1000))]
    pub economy_seat_count: u32,
}

/// Active train listing for the booking screens, with availability derived
/// from capacity minus occupancy
#[derive(Debug, Clone, Serialize)]
pub struct TrainForBooking {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub schedule: RecordId,
    pub train_name: String,
    pub stations: Vec<String>,
    pub operating_days: Vec<chrono::Weekday>,
    pub luxury_seat_count: u32,
    pub economy_seat_count: u32,
    pub available_luxury_seats: u32,
    pub available_economy_seats: u32,
}
