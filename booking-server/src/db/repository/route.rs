//! Route Repository
//!
//! Routes are keyed by name (`route:<name>`). Stations are stored as an
//! explicit ordered list.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Route, RouteCreate, RouteUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "route";

fn route_key(name: &str) -> RecordId {
    RecordId::from_table_key(TABLE, name)
}

#[derive(Clone)]
pub struct RouteRepository {
    base: BaseRepository,
}

impl RouteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all routes
    pub async fn find_all(&self) -> RepoResult<Vec<Route>> {
        let routes: Vec<Route> = self
            .base
            .db()
            .query("SELECT * FROM route ORDER BY name")
            .await?
            .take(0)?;
        Ok(routes)
    }

    /// Find route by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Route>> {
        let route: Option<Route> = self.base.db().select(route_key(name)).await?;
        Ok(route)
    }

    /// Create a new route
    pub async fn create(&self, data: RouteCreate) -> RepoResult<Route> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Route '{}' already exists",
                data.name
            )));
        }

        let route = Route {
            name: data.name.clone(),
            stations: data.stations,
        };

        let created: Option<Route> = self
            .base
            .db()
            .create(route_key(&data.name))
            .content(route)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create route".to_string()))
    }

    /// Replace the station list
    pub async fn update(&self, name: &str, data: RouteUpdate) -> RepoResult<Route> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET stations = $stations")
            .bind(("thing", route_key(name)))
            .bind(("stations", data.stations))
            .await?;
        let updated: Vec<Route> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Route '{}' not found", name)))
    }

    /// Hard delete a route
    pub async fn delete(&self, name: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", route_key(name)))
            .await?;
        Ok(true)
    }
}
