//! Reservation Repository
//!
//! Persistence for reservation documents. All writes are driven by the
//! reservation engine; nothing else mutates this table.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reservations, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY created_on DESC")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_record(&thing).await
    }

    /// Find reservation by record id
    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<Reservation>> {
        let reservation: Option<Reservation> = self.base.db().select(id.clone()).await?;
        Ok(reservation)
    }

    /// Find all reservations owned by a user, newest first
    pub async fn find_by_user(&self, nic: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE user_nic = $nic ORDER BY created_on DESC")
            .bind(("nic", nic.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find the active reservations bound to a train (reconciliation input)
    ///
    /// Reference fields are stored in "table:id" string form (see
    /// `models::serde_helpers`), so the comparison binds a string.
    pub async fn find_active_by_train(&self, train: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE train = $train AND status = 'active'")
            .bind(("train", train.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Persist a new reservation document
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Persist the mutable booking fields and the recomputed fare as one
    /// update
    pub async fn apply_update(
        &self,
        id: &RecordId,
        data: &ReservationUpdate,
        total_fare: i64,
    ) -> RepoResult<Reservation> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET \
                 luxury_seats = $luxury, economy_seats = $economy, \
                 start_station = $start, end_station = $end, \
                 travel_date = $travel_date, total_fare = $fare",
            )
            .bind(("thing", id.clone()))
            .bind(("luxury", data.luxury_seats))
            .bind(("economy", data.economy_seats))
            .bind(("start", data.start_station.clone()))
            .bind(("end", data.end_station.clone()))
            .bind(("travel_date", data.travel_date))
            .bind(("fare", total_fare))
            .await?;
        let updated: Vec<Reservation> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Mark a reservation completed, snapshotting the train name
    pub async fn mark_completed(
        &self,
        id: &RecordId,
        train_name: &str,
    ) -> RepoResult<Reservation> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'completed', completed_train_name = $name")
            .bind(("thing", id.clone()))
            .bind(("name", train_name.to_string()))
            .await?;
        let updated: Vec<Reservation> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Hard delete a reservation
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(true)
    }
}
