//! Reconciliation
//!
//! The occupied seat counters and the reservation-id lists are cached
//! aggregates over the set of active reservations. The cross-entity steps
//! of create/delete/complete are not transactional, so after a partial
//! failure the aggregates can drift. These routines recompute them from
//! the reservation documents (the source of truth) and overwrite the
//! cached values in one statement each.

use serde::Serialize;
use surrealdb::RecordId;

use super::{BookingError, BookingResult, ReservationEngine};
use crate::db::models::ReservationStatus;

/// Drift report for a train reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct TrainReconciliation {
    pub train: String,
    pub luxury_before: u32,
    pub luxury_after: u32,
    pub economy_before: u32,
    pub economy_after: u32,
    pub list_size_before: usize,
    pub list_size_after: usize,
}

impl TrainReconciliation {
    pub fn drifted(&self) -> bool {
        self.luxury_before != self.luxury_after
            || self.economy_before != self.economy_after
            || self.list_size_before != self.list_size_after
    }
}

/// Drift report for a user reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct UserReconciliation {
    pub nic: String,
    pub list_size_before: usize,
    pub list_size_after: usize,
}

impl ReservationEngine {
    /// Recompute a train's occupancy counters and reservation list from
    /// its active reservations and overwrite the cached aggregate.
    pub async fn reconcile_train(&self, id: &str) -> BookingResult<TrainReconciliation> {
        let train = self
            .trains
            .find_by_id(id)
            .await?
            .ok_or(BookingError::InvalidReference)?;
        let train_id = train
            .id
            .clone()
            .ok_or(BookingError::InvalidReference)?;

        let active = self
            .reservations
            .find_active_by_train(&train_id)
            .await?;
        let luxury: u32 = active.iter().map(|r| r.luxury_seats).sum();
        let economy: u32 = active.iter().map(|r| r.economy_seats).sum();
        let ids: Vec<RecordId> = active.iter().filter_map(|r| r.id.clone()).collect();

        let report = TrainReconciliation {
            train: train_id.to_string(),
            luxury_before: train.occupied_luxury_seat_count,
            luxury_after: luxury,
            economy_before: train.occupied_economy_seat_count,
            economy_after: economy,
            list_size_before: train.reservations.len(),
            list_size_after: ids.len(),
        };

        self.inventory
            .restore(&train_id, luxury, economy, ids)
            .await?;

        if report.drifted() {
            tracing::info!(
                train = %report.train,
                luxury = report.luxury_after,
                economy = report.economy_after,
                "train aggregate reconciled"
            );
        }

        Ok(report)
    }

    /// Rebuild a user's reservation back-reference list from their active
    /// reservations.
    pub async fn reconcile_user(&self, nic: &str) -> BookingResult<UserReconciliation> {
        let user = self
            .users
            .find_by_nic(nic)
            .await?
            .ok_or(BookingError::InvalidReference)?;

        let reservations = self.reservations.find_by_user(nic).await?;
        let live_ids: Vec<RecordId> = reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Active)
            .filter_map(|r| r.id.clone())
            .collect();

        let report = UserReconciliation {
            nic: nic.to_string(),
            list_size_before: user.reservation_ids.len(),
            list_size_after: live_ids.len(),
        };

        self.users.overwrite_reservations(nic, live_ids).await?;

        Ok(report)
    }
}
