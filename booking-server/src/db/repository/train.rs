//! Train Repository
//!
//! CRUD and back-reference maintenance for trains. Occupancy counters are
//! NOT touched here — they belong to `booking::SeatInventory`.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Schedule, Train, TrainCreate, TrainForBooking, TrainUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "train";

#[derive(Clone)]
pub struct TrainRepository {
    base: BaseRepository,
}

impl TrainRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all trains
    pub async fn find_all(&self) -> RepoResult<Vec<Train>> {
        let trains: Vec<Train> = self
            .base
            .db()
            .query("SELECT * FROM train ORDER BY train_name")
            .await?
            .take(0)?;
        Ok(trains)
    }

    /// Find train by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Train>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_record(&thing).await
    }

    /// Find train by record id
    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<Train>> {
        let train: Option<Train> = self.base.db().select(id.clone()).await?;
        Ok(train)
    }

    /// Active trains with availability and schedule info, for the booking
    /// screens
    pub async fn find_for_booking(&self) -> RepoResult<Vec<TrainForBooking>> {
        let trains: Vec<Train> = self
            .base
            .db()
            .query("SELECT * FROM train WHERE is_active = true ORDER BY train_name")
            .await?
            .take(0)?;

        let mut listing = Vec::with_capacity(trains.len());
        for train in trains {
            // An active train always carries a schedule; skip any that lost
            // theirs rather than failing the whole listing
            let (Some(id), Some(schedule_id)) = (train.id.clone(), train.schedule.clone()) else {
                continue;
            };
            let schedule: Option<Schedule> = self.base.db().select(schedule_id.clone()).await?;
            let Some(schedule) = schedule else { continue };

            listing.push(TrainForBooking {
                id,
                schedule: schedule_id,
                train_name: train.train_name.clone(),
                stations: schedule.stations,
                operating_days: schedule.operating_days,
                luxury_seat_count: train.luxury_seat_count,
                economy_seat_count: train.economy_seat_count,
                available_luxury_seats: train.available_luxury_seats(),
                available_economy_seats: train.available_economy_seats(),
            });
        }
        Ok(listing)
    }

    /// Create a new train (inactive, no schedule, zero occupancy)
    pub async fn create(&self, data: TrainCreate) -> RepoResult<Train> {
        let train = Train {
            id: None,
            train_name: data.train_name,
            schedule: None,
            is_active: false,
            luxury_seat_count: data.luxury_seat_count,
            economy_seat_count: data.economy_seat_count,
            occupied_luxury_seat_count: 0,
            occupied_economy_seat_count: 0,
            reservations: Vec::new(),
        };

        let created: Option<Train> = self.base.db().create(TABLE).content(train).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create train".to_string()))
    }

    /// Update name and capacities
    pub async fn update_details(&self, id: &RecordId, data: TrainUpdate) -> RepoResult<Train> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET train_name = $name, \
                 luxury_seat_count = $luxury, economy_seat_count = $economy",
            )
            .bind(("thing", id.clone()))
            .bind(("name", data.train_name))
            .bind(("luxury", data.luxury_seat_count))
            .bind(("economy", data.economy_seat_count))
            .await?;
        let updated: Vec<Train> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Train {} not found", id)))
    }

    /// Assign a schedule and activate the train
    pub async fn assign_schedule(&self, id: &RecordId, schedule: &RecordId) -> RepoResult<Train> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET schedule = $schedule, is_active = true")
            .bind(("thing", id.clone()))
            .bind(("schedule", schedule.clone()))
            .await?;
        let updated: Vec<Train> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Train {} not found", id)))
    }

    /// Activate a train that already has a schedule
    pub async fn activate(&self, id: &RecordId) -> RepoResult<Train> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = true")
            .bind(("thing", id.clone()))
            .await?;
        let updated: Vec<Train> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Train {} not found", id)))
    }

    /// Deactivate a train, clearing its schedule and occupancy
    pub async fn deactivate(&self, id: &RecordId) -> RepoResult<Train> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET is_active = false, schedule = NONE, \
                 occupied_luxury_seat_count = 0, occupied_economy_seat_count = 0",
            )
            .bind(("thing", id.clone()))
            .await?;
        let updated: Vec<Train> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Train {} not found", id)))
    }

    /// Hard delete a train
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", id.clone()))
            .await?;
        Ok(true)
    }

    /// Append a reservation id to the back-reference list (idempotent).
    /// Ids are stored in "table:id" string form, matching the model serde.
    pub async fn append_reservation(
        &self,
        train: &RecordId,
        reservation: &RecordId,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET reservations = array::union(reservations, [$rid])")
            .bind(("thing", train.clone()))
            .bind(("rid", reservation.to_string()))
            .await?;
        Ok(())
    }

    /// Remove a reservation id from the back-reference list (idempotent
    /// w.r.t. an absent id)
    pub async fn remove_reservation(
        &self,
        train: &RecordId,
        reservation: &RecordId,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET reservations -= $rid")
            .bind(("thing", train.clone()))
            .bind(("rid", reservation.to_string()))
            .await?;
        Ok(())
    }
}
