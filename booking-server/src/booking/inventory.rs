//! Seat inventory
//!
//! The only component allowed to mutate a train's occupied seat counters.
//! Every checked mutation is a single guarded UPDATE statement, so the
//! capacity check and the increment commit atomically; a plain
//! read-compute-write sequence on the counters would race and is not used
//! anywhere.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use super::error::{BookingError, SeatClass};
use crate::db::models::Train;
use crate::db::repository::RepoError;

/// Attempts before giving up when the guard keeps refusing for reasons
/// other than capacity (counters moving under concurrent load)
const RESERVE_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct SeatInventory {
    db: Surreal<Db>,
}

impl SeatInventory {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Reserve seats, failing with `CapacityExceeded` when either class
    /// would overflow its capacity. Nothing is written on failure.
    pub async fn reserve(
        &self,
        train: &RecordId,
        luxury_seats: i64,
        economy_seats: i64,
    ) -> Result<(), BookingError> {
        self.apply_checked_delta(train, luxury_seats, economy_seats)
            .await
    }

    /// Combined release-old/reserve-new for reservation updates. The guard
    /// sees only the net delta, so a same-size seat change never spuriously
    /// fails on a full train.
    pub async fn update(
        &self,
        train: &RecordId,
        new_luxury: i64,
        new_economy: i64,
        old_luxury: i64,
        old_economy: i64,
    ) -> Result<(), BookingError> {
        self.apply_checked_delta(train, new_luxury - old_luxury, new_economy - old_economy)
            .await
    }

    /// Release seats on delete/complete. Clamped at zero; correct callers
    /// only ever release what a successful reserve took.
    pub async fn release(
        &self,
        train: &RecordId,
        luxury_seats: i64,
        economy_seats: i64,
    ) -> Result<(), BookingError> {
        self.db
            .query(
                "UPDATE $train SET \
                 occupied_luxury_seat_count = math::max(occupied_luxury_seat_count - $dl, 0), \
                 occupied_economy_seat_count = math::max(occupied_economy_seat_count - $de, 0)",
            )
            .bind(("train", train.clone()))
            .bind(("dl", luxury_seats))
            .bind(("de", economy_seats))
            .await
            .map_err(RepoError::from)?;
        Ok(())
    }

    /// Recovery entry point for reconciliation: overwrite the occupancy
    /// aggregate and the back-reference list with recomputed values.
    pub async fn restore(
        &self,
        train: &RecordId,
        luxury_occupied: u32,
        economy_occupied: u32,
        reservations: Vec<RecordId>,
    ) -> Result<(), BookingError> {
        let list: Vec<String> = reservations.iter().map(|r| r.to_string()).collect();
        self.db
            .query(
                "UPDATE $train SET \
                 occupied_luxury_seat_count = $luxury, \
                 occupied_economy_seat_count = $economy, \
                 reservations = $list",
            )
            .bind(("train", train.clone()))
            .bind(("luxury", luxury_occupied))
            .bind(("economy", economy_occupied))
            .bind(("list", list))
            .await
            .map_err(RepoError::from)?;
        Ok(())
    }

    async fn apply_checked_delta(
        &self,
        train: &RecordId,
        luxury_delta: i64,
        economy_delta: i64,
    ) -> Result<(), BookingError> {
        for _ in 0..RESERVE_ATTEMPTS {
            // One statement: the guard and the increment commit atomically.
            // The lower bounds keep `0 <= occupied` for net-negative deltas.
            let mut result = self
                .db
                .query(
                    "UPDATE $train SET \
                     occupied_luxury_seat_count += $dl, \
                     occupied_economy_seat_count += $de \
                     WHERE occupied_luxury_seat_count + $dl <= luxury_seat_count \
                       AND occupied_economy_seat_count + $de <= economy_seat_count \
                       AND occupied_luxury_seat_count + $dl >= 0 \
                       AND occupied_economy_seat_count + $de >= 0",
                )
                .bind(("train", train.clone()))
                .bind(("dl", luxury_delta))
                .bind(("de", economy_delta))
                .await
                .map_err(RepoError::from)?;
            let updated: Vec<Train> = result.take(0).map_err(RepoError::from)?;
            if !updated.is_empty() {
                return Ok(());
            }

            // Guard refused: classify against a fresh read
            let current: Option<Train> =
                self.db.select(train.clone()).await.map_err(RepoError::from)?;
            let Some(current) = current else {
                return Err(BookingError::InvalidReference);
            };
            if i64::from(current.occupied_luxury_seat_count) + luxury_delta
                > i64::from(current.luxury_seat_count)
            {
                return Err(BookingError::CapacityExceeded(SeatClass::Luxury));
            }
            if i64::from(current.occupied_economy_seat_count) + economy_delta
                > i64::from(current.economy_seat_count)
            {
                return Err(BookingError::CapacityExceeded(SeatClass::Economy));
            }
            // Counters moved between the update and the read; try again
        }

        Err(BookingError::Repo(RepoError::Database(
            "seat inventory contention: retries exhausted".to_string(),
        )))
    }
}
