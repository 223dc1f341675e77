//! Reservation engine - the booking lifecycle
//!
//! This module owns the reservation state machine:
//!
//! ```text
//! Requested ──────────────► deleted
//! Requested ─(conversion)─► Active ──► Completed ──► deleted
//!                           Active ──► deleted
//! ```
//!
//! Every operation validates before it writes; the only tolerated partial
//! state is the back-reference lists on trains and users, which are
//! repaired by the reconciliation routines rather than rolled back.
//!
//! # Components
//!
//! - [`SeatInventory`] - atomic occupancy mutations (never oversells)
//! - [`fare`] - distance-based fare computation
//! - [`window`] - the 5-day booking window policy
//! - [`ReservationEngine`] - the orchestrator tying them together

pub mod error;
pub mod fare;
pub mod inventory;
pub mod reconcile;
pub mod window;

#[cfg(test)]
mod tests;

pub use error::{BookingError, SeatClass};
pub use inventory::SeatInventory;
pub use reconcile::{TrainReconciliation, UserReconciliation};
pub use window::MIN_BOOKING_LEAD_DAYS;

use chrono::Utc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Reservation, ReservationCreate, ReservationRequestCreate, ReservationStatus,
    ReservationUpdate, UserRole,
};
use crate::db::repository::{
    RepoError, ReservationRepository, ScheduleRepository, TrainRepository, UserRepository,
};

/// Maximum live (non-completed) reservations an active user may hold
pub const MAX_LIVE_RESERVATIONS: usize = 4;

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

/// Orchestrates the reservation lifecycle over the repositories and the
/// seat inventory. Cheap to construct per request.
#[derive(Clone)]
pub struct ReservationEngine {
    reservations: ReservationRepository,
    trains: TrainRepository,
    users: UserRepository,
    schedules: ScheduleRepository,
    inventory: SeatInventory,
}

impl ReservationEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            trains: TrainRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            schedules: ScheduleRepository::new(db.clone()),
            inventory: SeatInventory::new(db),
        }
    }

    // ==================== Reads ====================

    pub async fn get_all(&self) -> BookingResult<Vec<Reservation>> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> BookingResult<Option<Reservation>> {
        Ok(self.reservations.find_by_id(id).await?)
    }

    pub async fn get_by_user(&self, nic: &str) -> BookingResult<Vec<Reservation>> {
        Ok(self.reservations.find_by_user(nic).await?)
    }

    // ==================== Create ====================

    /// Direct booking: validate the requester, train, quota, and window,
    /// reserve seats atomically, compute the fare, persist, and link the
    /// back-references.
    pub async fn create(&self, input: ReservationCreate) -> BookingResult<Reservation> {
        let train_id: RecordId = input
            .train_id
            .parse()
            .map_err(|_| BookingError::InvalidReference)?;

        let user = self.users.find_by_nic(&input.user_nic).await?;
        let train = self.trains.find_by_record(&train_id).await?;
        let (Some(user), Some(train)) = (user, train) else {
            return Err(BookingError::InvalidReference);
        };

        match user.role {
            UserRole::Traveler => {}
            role => return Err(BookingError::InvalidRole(role)),
        }
        if !train.is_active {
            return Err(BookingError::InactiveTrain);
        }
        if !user.is_active {
            return Err(BookingError::InactiveUser);
        }
        if user.reservation_ids.len() >= MAX_LIVE_RESERVATIONS {
            return Err(BookingError::QuotaExceeded);
        }
        if input.luxury_seats + input.economy_seats < 1 {
            return Err(BookingError::InvalidSeatCount);
        }
        if input.start_station == input.end_station {
            return Err(BookingError::ZeroDistance);
        }

        let created_on = Utc::now();
        if !window::mutation_allowed(created_on, input.travel_date) {
            return Err(BookingError::BookingWindowViolation);
        }

        let schedule_id = train
            .schedule
            .clone()
            .ok_or_else(|| BookingError::ScheduleNotFound(train_id.to_string()))?;
        let schedule = self
            .schedules
            .find_by_record(&schedule_id)
            .await?
            .ok_or_else(|| BookingError::ScheduleNotFound(schedule_id.to_string()))?;

        self.inventory
            .reserve(
                &train_id,
                i64::from(input.luxury_seats),
                i64::from(input.economy_seats),
            )
            .await?;

        // From here on a failure must give the seats back before returning
        let total_fare = match fare::compute_fare(
            &schedule,
            input.luxury_seats,
            input.economy_seats,
            &input.start_station,
            &input.end_station,
        ) {
            Ok(fare) => fare,
            Err(err) => {
                self.release_quietly(&train_id, input.luxury_seats, input.economy_seats)
                    .await;
                return Err(err);
            }
        };

        let reservation = Reservation {
            id: None,
            user_nic: user.nic.clone(),
            train: Some(train_id.clone()),
            created_on,
            travel_date: input.travel_date,
            start_station: input.start_station,
            end_station: input.end_station,
            luxury_seats: input.luxury_seats,
            economy_seats: input.economy_seats,
            total_fare,
            status: ReservationStatus::Active,
            completed_train_name: None,
            requested_by: None,
            requested_for: None,
        };

        let created = match self.reservations.create(reservation).await {
            Ok(created) => created,
            Err(err) => {
                self.release_quietly(&train_id, input.luxury_seats, input.economy_seats)
                    .await;
                return Err(err.into());
            }
        };

        let rid = created_id(&created)?;
        // Back-reference step of the two-step saga: failures are logged and
        // left to reconciliation
        if let Err(err) = self.trains.append_reservation(&train_id, &rid).await {
            tracing::warn!(
                train = %train_id, reservation = %rid, error = %err,
                "failed to link reservation to train; run reconciliation"
            );
        }
        if let Err(err) = self.users.append_reservation(&user.nic, &rid).await {
            tracing::warn!(
                user = %user.nic, reservation = %rid, error = %err,
                "failed to link reservation to user; run reconciliation"
            );
        }

        Ok(created)
    }

    /// Record a travel intent: no train binding, no seats held, no fare.
    pub async fn create_request(
        &self,
        input: ReservationRequestCreate,
    ) -> BookingResult<Reservation> {
        let requester = self
            .users
            .find_by_nic(&input.requested_by)
            .await?
            .ok_or(BookingError::InvalidReference)?;

        if input.luxury_seats + input.economy_seats < 1 {
            return Err(BookingError::InvalidSeatCount);
        }

        let created_on = Utc::now();
        if !window::mutation_allowed(created_on, input.requested_for) {
            return Err(BookingError::BookingWindowViolation);
        }

        let reservation = Reservation {
            id: None,
            user_nic: requester.nic.clone(),
            train: None,
            created_on,
            travel_date: input.requested_for,
            start_station: input.start_station,
            end_station: input.end_station,
            luxury_seats: input.luxury_seats,
            economy_seats: input.economy_seats,
            total_fare: 0,
            status: ReservationStatus::Requested,
            completed_train_name: None,
            requested_by: Some(requester.nic),
            requested_for: Some(input.requested_for),
        };

        Ok(self.reservations.create(reservation).await?)
    }

    // ==================== Update ====================

    /// Edit an active reservation: seats, stations, and travel date change
    /// together, with the fare recomputed and the occupancy moved by the
    /// net seat delta.
    pub async fn update(&self, id: &str, input: ReservationUpdate) -> BookingResult<Reservation> {
        let existing = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(id.to_string()))?;

        match existing.status {
            ReservationStatus::Requested => return Err(BookingError::RequestNotEditable),
            ReservationStatus::Completed => return Err(BookingError::AlreadyCompleted),
            ReservationStatus::Active => {}
        }

        // The window is measured against the date already booked, not the
        // one being requested
        if !window::mutation_allowed(Utc::now(), existing.travel_date) {
            return Err(BookingError::BookingWindowViolation);
        }
        if input.luxury_seats + input.economy_seats < 1 {
            return Err(BookingError::InvalidSeatCount);
        }
        if input.start_station == input.end_station {
            return Err(BookingError::ZeroDistance);
        }

        let rid = created_id(&existing)?;
        let train_id = existing
            .train
            .clone()
            .ok_or(BookingError::InvalidReference)?;
        let train = self
            .trains
            .find_by_record(&train_id)
            .await?
            .ok_or(BookingError::InvalidReference)?;
        let schedule_id = train
            .schedule
            .clone()
            .ok_or_else(|| BookingError::ScheduleNotFound(train_id.to_string()))?;
        let schedule = self
            .schedules
            .find_by_record(&schedule_id)
            .await?
            .ok_or_else(|| BookingError::ScheduleNotFound(schedule_id.to_string()))?;

        self.inventory
            .update(
                &train_id,
                i64::from(input.luxury_seats),
                i64::from(input.economy_seats),
                i64::from(existing.luxury_seats),
                i64::from(existing.economy_seats),
            )
            .await?;

        // From here on a failure must move the occupancy back
        let total_fare = match fare::compute_fare(
            &schedule,
            input.luxury_seats,
            input.economy_seats,
            &input.start_station,
            &input.end_station,
        ) {
            Ok(fare) => fare,
            Err(err) => {
                self.revert_seat_update(&train_id, &existing, &input).await;
                return Err(err);
            }
        };

        match self.reservations.apply_update(&rid, &input, total_fare).await {
            Ok(updated) => Ok(updated),
            Err(err) => {
                self.revert_seat_update(&train_id, &existing, &input).await;
                Err(err.into())
            }
        }
    }

    // ==================== Delete ====================

    /// Remove a reservation. Requests delete unconditionally; active
    /// reservations release their seats and drop both back-references;
    /// completed reservations only lose their history record (seats were
    /// settled at completion).
    pub async fn delete(&self, id: &str) -> BookingResult<()> {
        let existing = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(id.to_string()))?;
        let rid = created_id(&existing)?;

        match existing.status {
            ReservationStatus::Requested => {
                // A request holds no seats; the booking window has nothing
                // to protect
                self.reservations.delete(&rid).await?;
                Ok(())
            }
            ReservationStatus::Completed => {
                if !window::mutation_allowed(Utc::now(), existing.travel_date) {
                    return Err(BookingError::BookingWindowViolation);
                }
                self.reservations.delete(&rid).await?;
                Ok(())
            }
            ReservationStatus::Active => {
                if !window::mutation_allowed(Utc::now(), existing.travel_date) {
                    return Err(BookingError::BookingWindowViolation);
                }
                // The reservation document is authoritative: remove it
                // first, then settle counters and lists
                self.reservations.delete(&rid).await?;
                self.release_and_unlink(&existing, &rid).await;
                Ok(())
            }
        }
    }

    // ==================== Complete ====================

    /// Mark a reservation as travelled: snapshot the train name, keep the
    /// record as history, release the seats, and drop both back-references.
    /// Not reversible.
    pub async fn complete(&self, id: &str) -> BookingResult<Reservation> {
        let existing = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(id.to_string()))?;

        match existing.status {
            ReservationStatus::Requested => return Err(BookingError::RequestNotEditable),
            ReservationStatus::Completed => return Err(BookingError::AlreadyCompleted),
            ReservationStatus::Active => {}
        }

        let rid = created_id(&existing)?;
        let train_id = existing
            .train
            .clone()
            .ok_or(BookingError::InvalidReference)?;
        let train = self
            .trains
            .find_by_record(&train_id)
            .await?
            .ok_or(BookingError::InvalidReference)?;

        // The status flip is the authoritative write; counters and lists
        // follow and are reconcilable
        let completed = self
            .reservations
            .mark_completed(&rid, &train.train_name)
            .await?;
        self.release_and_unlink(&existing, &rid).await;

        Ok(completed)
    }

    // ==================== Internals ====================

    /// Release seats after an aborted write; failures are logged, the
    /// counters drift until reconciliation.
    async fn release_quietly(&self, train: &RecordId, luxury_seats: u32, economy_seats: u32) {
        if let Err(err) = self
            .inventory
            .release(train, i64::from(luxury_seats), i64::from(economy_seats))
            .await
        {
            tracing::warn!(
                train = %train, error = %err,
                "failed to release seats after aborted write; run reconciliation"
            );
        }
    }

    /// Undo a net-delta seat move after a failed update.
    async fn revert_seat_update(
        &self,
        train: &RecordId,
        existing: &Reservation,
        attempted: &ReservationUpdate,
    ) {
        if let Err(err) = self
            .inventory
            .update(
                train,
                i64::from(existing.luxury_seats),
                i64::from(existing.economy_seats),
                i64::from(attempted.luxury_seats),
                i64::from(attempted.economy_seats),
            )
            .await
        {
            tracing::warn!(
                train = %train, error = %err,
                "failed to revert seat counts after aborted update; run reconciliation"
            );
        }
    }

    /// Release the held seats and drop both back-references. Used by
    /// delete (active) and complete; failures are logged and left to
    /// reconciliation.
    async fn release_and_unlink(&self, reservation: &Reservation, rid: &RecordId) {
        let Some(train_id) = reservation.train.clone() else {
            return;
        };
        self.release_quietly(&train_id, reservation.luxury_seats, reservation.economy_seats)
            .await;
        if let Err(err) = self.trains.remove_reservation(&train_id, rid).await {
            tracing::warn!(
                train = %train_id, reservation = %rid, error = %err,
                "failed to unlink reservation from train; run reconciliation"
            );
        }
        if let Err(err) = self
            .users
            .remove_reservation(&reservation.user_nic, rid)
            .await
        {
            tracing::warn!(
                user = %reservation.user_nic, reservation = %rid, error = %err,
                "failed to unlink reservation from user; run reconciliation"
            );
        }
    }
}

/// The id a persisted reservation must carry
fn created_id(reservation: &Reservation) -> BookingResult<RecordId> {
    reservation.id.clone().ok_or_else(|| {
        BookingError::Repo(RepoError::Database(
            "persisted reservation has no id".to_string(),
        ))
    })
}
