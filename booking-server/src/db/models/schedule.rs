//! Schedule Model

use super::serde_helpers;
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Schedule entity
///
/// `stations` is snapshotted from the route at creation time as an explicit
/// ordered list, so fare distance stays deterministic even if the route is
/// edited later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Route this schedule runs on
    #[serde(with = "serde_helpers::record_id")]
    pub route: RecordId,
    /// Ordered station sequence (copied from the route)
    pub stations: Vec<String>,
    /// Per-seat fare in whole rupees
    pub luxury_fare: i64,
    pub economy_fare: i64,
    #[serde(default)]
    pub operating_days: Vec<Weekday>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

/// Create schedule payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleCreate {
    /// Name of the route the schedule runs on
    #[validate(length(min = 1))]
    pub route: String,
    #[validate(range(min = 1))]
    pub luxury_fare: i64,
    #[validate(range(min = 1))]
    pub economy_fare: i64,
    #[serde(default)]
    pub operating_days: Vec<Weekday>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

/// Update schedule payload (fares, days, and times; the route and its
/// station snapshot are fixed at creation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleUpdate {
    #[validate(range(min = 1))]
    pub luxury_fare: i64,
    #[validate(range(min = 1))]
    pub economy_fare: i64,
    #[serde(default)]
    pub operating_days: Vec<Weekday>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}
