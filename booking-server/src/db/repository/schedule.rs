//! Schedule Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Route, Schedule, ScheduleCreate, ScheduleUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "schedule";

#[derive(Clone)]
pub struct ScheduleRepository {
    base: BaseRepository,
}

impl ScheduleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all schedules
    pub async fn find_all(&self) -> RepoResult<Vec<Schedule>> {
        let schedules: Vec<Schedule> = self
            .base
            .db()
            .query("SELECT * FROM schedule ORDER BY departure_time")
            .await?
            .take(0)?;
        Ok(schedules)
    }

    /// Find schedule by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Schedule>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_record(&thing).await
    }

    /// Find schedule by record id
    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<Schedule>> {
        let schedule: Option<Schedule> = self.base.db().select(id.clone()).await?;
        Ok(schedule)
    }

    /// Create a schedule on the given route, snapshotting its station order
    pub async fn create(&self, data: ScheduleCreate, route: &Route) -> RepoResult<Schedule> {
        let schedule = Schedule {
            id: None,
            route: RecordId::from_table_key("route", &route.name),
            stations: route.stations.clone(),
            luxury_fare: data.luxury_fare,
            economy_fare: data.economy_fare,
            operating_days: data.operating_days,
            departure_time: data.departure_time,
            arrival_time: data.arrival_time,
        };

        let created: Option<Schedule> = self.base.db().create(TABLE).content(schedule).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create schedule".to_string()))
    }

    /// Update fares, operating days, and times
    pub async fn update(&self, id: &str, data: ScheduleUpdate) -> RepoResult<Schedule> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET luxury_fare = $luxury, economy_fare = $economy, \
                 operating_days = $days, departure_time = $dep, arrival_time = $arr",
            )
            .bind(("thing", thing))
            .bind(("luxury", data.luxury_fare))
            .bind(("economy", data.economy_fare))
            .bind(("days", data.operating_days))
            .bind(("dep", data.departure_time))
            .bind(("arr", data.arrival_time))
            .await?;
        let updated: Vec<Schedule> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Schedule {} not found", id)))
    }

    /// Hard delete a schedule
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
