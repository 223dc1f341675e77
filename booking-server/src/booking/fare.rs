//! Fare calculation
//!
//! Fares scale linearly with the number of stops travelled: the distance
//! factor is the absolute difference between the start and end station
//! positions in the schedule's ordered station list.

use super::error::BookingError;
use crate::db::models::Schedule;

/// Compute the total fare in whole rupees.
///
/// `amount = (luxury_fare * luxury_seats + economy_fare * economy_seats) * distance`
///
/// A distance of zero yields a fare of zero; callers reject same-station
/// journeys before reaching this point.
pub fn compute_fare(
    schedule: &Schedule,
    luxury_seats: u32,
    economy_seats: u32,
    start_station: &str,
    end_station: &str,
) -> Result<i64, BookingError> {
    let start = station_position(schedule, start_station)?;
    let end = station_position(schedule, end_station)?;
    let distance = start.abs_diff(end) as i64;

    let per_stop = schedule.luxury_fare * i64::from(luxury_seats)
        + schedule.economy_fare * i64::from(economy_seats);
    Ok(per_stop * distance)
}

fn station_position(schedule: &Schedule, name: &str) -> Result<usize, BookingError> {
    schedule
        .stations
        .iter()
        .position(|s| s == name)
        .ok_or_else(|| BookingError::StationNotFound(name.to_string()))
}
