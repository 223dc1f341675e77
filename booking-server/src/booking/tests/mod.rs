//! Reservation engine tests
//!
//! Run against an in-memory SurrealDB so the guarded-update semantics are
//! exercised for real, including under concurrency.

mod test_capacity;
mod test_create;
mod test_lifecycle;

use chrono::{DateTime, Duration, Utc};
use surrealdb::engine::local::{Db, Mem};
use surrealdb::{RecordId, Surreal};

use super::*;
use crate::db::DbService;
use crate::db::models::{
    Reservation, ReservationCreate, ReservationRequestCreate, ReservationStatus,
    ReservationUpdate, Schedule, Train, User, UserCreate, UserRole,
};
use crate::db::repository::UserRepository;

pub(super) const STATIONS: [&str; 4] = ["Colombo", "Negombo", "Chilaw", "Puttlam"];

pub(super) struct TestWorld {
    pub db: Surreal<Db>,
    pub engine: ReservationEngine,
    pub train: RecordId,
}

/// Fresh in-memory database with the production schema applied
pub(super) async fn mem_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    DbService::define_schema(&db).await.unwrap();
    db
}

/// Database + engine + one active 50/50 train on the northern route with
/// fares 500/250
pub(super) async fn world() -> TestWorld {
    world_with_capacity(50, 50).await
}

pub(super) async fn world_with_capacity(luxury: u32, economy: u32) -> TestWorld {
    let db = mem_db().await;
    let schedule = seed_schedule(&db, 500, 250).await;
    let train = seed_train(&db, "Udarata Menike", luxury, economy, Some(&schedule), true).await;
    let engine = ReservationEngine::new(db.clone());
    TestWorld { db, engine, train }
}

pub(super) async fn seed_schedule(
    db: &Surreal<Db>,
    luxury_fare: i64,
    economy_fare: i64,
) -> RecordId {
    let schedule = Schedule {
        id: None,
        route: RecordId::from_table_key("route", "northern"),
        stations: STATIONS.iter().map(|s| s.to_string()).collect(),
        luxury_fare,
        economy_fare,
        operating_days: vec![],
        departure_time: Utc::now(),
        arrival_time: Utc::now() + Duration::hours(4),
    };
    let created: Option<Schedule> = db.create("schedule").content(schedule).await.unwrap();
    created.unwrap().id.unwrap()
}

pub(super) async fn seed_train(
    db: &Surreal<Db>,
    name: &str,
    luxury_capacity: u32,
    economy_capacity: u32,
    schedule: Option<&RecordId>,
    is_active: bool,
) -> RecordId {
    let train = Train {
        id: None,
        train_name: name.to_string(),
        schedule: schedule.cloned(),
        is_active,
        luxury_seat_count: luxury_capacity,
        economy_seat_count: economy_capacity,
        occupied_luxury_seat_count: 0,
        occupied_economy_seat_count: 0,
        reservations: Vec::new(),
    };
    let created: Option<Train> = db.create("train").content(train).await.unwrap();
    created.unwrap().id.unwrap()
}

pub(super) async fn seed_traveler(db: &Surreal<Db>, nic: &str) -> User {
    seed_user(db, nic, UserRole::Traveler).await
}

pub(super) async fn seed_user(db: &Surreal<Db>, nic: &str, role: UserRole) -> User {
    UserRepository::new(db.clone())
        .create(UserCreate {
            nic: nic.to_string(),
            user_name: format!("user-{nic}"),
            email: format!("{nic}@railbook.lk"),
            role,
        })
        .await
        .unwrap()
}

pub(super) async fn deactivate_user(db: &Surreal<Db>, nic: &str) {
    db.query("UPDATE $thing SET is_active = false")
        .bind(("thing", RecordId::from_table_key("user", nic)))
        .await
        .unwrap();
}

/// A travel date safely outside the booking window
pub(super) fn days_out(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days) + Duration::hours(1)
}

pub(super) fn booking(nic: &str, train: &RecordId, luxury: u32, economy: u32) -> ReservationCreate {
    ReservationCreate {
        user_nic: nic.to_string(),
        train_id: train.to_string(),
        travel_date: days_out(10),
        start_station: "Colombo".to_string(),
        end_station: "Puttlam".to_string(),
        luxury_seats: luxury,
        economy_seats: economy,
    }
}

pub(super) async fn train_occupancy(db: &Surreal<Db>, train: &RecordId) -> (u32, u32) {
    let train: Option<Train> = db.select(train.clone()).await.unwrap();
    let train = train.unwrap();
    (
        train.occupied_luxury_seat_count,
        train.occupied_economy_seat_count,
    )
}

pub(super) async fn get_train(db: &Surreal<Db>, train: &RecordId) -> Train {
    let train: Option<Train> = db.select(train.clone()).await.unwrap();
    train.unwrap()
}

pub(super) async fn get_user(db: &Surreal<Db>, nic: &str) -> User {
    let user: Option<User> = db
        .select(RecordId::from_table_key("user", nic))
        .await
        .unwrap();
    user.unwrap()
}

/// Insert a reservation document directly, bypassing the engine's
/// validation. Used to set up states the engine refuses to create
/// (e.g. travel dates already inside the window).
pub(super) async fn seed_reservation(db: &Surreal<Db>, reservation: Reservation) -> RecordId {
    let created: Option<Reservation> = db
        .create("reservation")
        .content(reservation)
        .await
        .unwrap();
    created.unwrap().id.unwrap()
}

pub(super) fn raw_reservation(
    nic: &str,
    train: Option<&RecordId>,
    status: ReservationStatus,
    travel_date: DateTime<Utc>,
    luxury: u32,
    economy: u32,
) -> Reservation {
    Reservation {
        id: None,
        user_nic: nic.to_string(),
        train: train.cloned(),
        created_on: Utc::now() - Duration::days(30),
        travel_date,
        start_station: "Colombo".to_string(),
        end_station: "Puttlam".to_string(),
        luxury_seats: luxury,
        economy_seats: economy,
        total_fare: 0,
        status,
        completed_train_name: None,
        requested_by: None,
        requested_for: None,
    }
}
