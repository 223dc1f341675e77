//! User Repository
//!
//! Users are keyed by NIC (`user:<nic>`), which is the primary-key lookup
//! the booking flows need.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

fn user_key(nic: &str) -> RecordId {
    RecordId::from_table_key(TABLE, nic)
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY user_name")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by NIC
    pub async fn find_by_nic(&self, nic: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(user_key(nic)).await?;
        Ok(user)
    }

    /// Create a new user (active, empty reservation list)
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_nic(&data.nic).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with NIC {} already exists",
                data.nic
            )));
        }

        let user = User {
            nic: data.nic.clone(),
            user_name: data.user_name,
            email: data.email,
            role: data.role,
            is_active: true,
            activation_pending: false,
            reservation_ids: Vec::new(),
        };

        let created: Option<User> = self
            .base
            .db()
            .create(user_key(&data.nic))
            .content(user)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update profile fields
    pub async fn update(&self, nic: &str, data: UserUpdate) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET user_name = $name, email = $email, role = $role")
            .bind(("thing", user_key(nic)))
            .bind(("name", data.user_name))
            .bind(("email", data.email))
            .bind(("role", data.role))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", nic)))
    }

    /// Activate a user
    pub async fn activate(&self, nic: &str) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = true, activation_pending = false")
            .bind(("thing", user_key(nic)))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", nic)))
    }

    /// Deactivate a user, clearing the reservation back-reference list.
    /// Callers cascade-delete the reservations first.
    pub async fn deactivate(&self, nic: &str) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = false, reservation_ids = []")
            .bind(("thing", user_key(nic)))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", nic)))
    }

    /// Hard delete a user
    pub async fn delete(&self, nic: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", user_key(nic)))
            .await?;
        Ok(true)
    }

    /// Append a reservation id to the back-reference list (idempotent).
    /// Ids are stored in "table:id" string form, matching the model serde.
    pub async fn append_reservation(&self, nic: &str, reservation: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET reservation_ids = array::union(reservation_ids, [$rid])")
            .bind(("thing", user_key(nic)))
            .bind(("rid", reservation.to_string()))
            .await?;
        Ok(())
    }

    /// Overwrite the back-reference list with a recomputed one
    /// (reconciliation)
    pub async fn overwrite_reservations(
        &self,
        nic: &str,
        reservations: Vec<RecordId>,
    ) -> RepoResult<()> {
        let list: Vec<String> = reservations.iter().map(|r| r.to_string()).collect();
        self.base
            .db()
            .query("UPDATE $thing SET reservation_ids = $list")
            .bind(("thing", user_key(nic)))
            .bind(("list", list))
            .await?;
        Ok(())
    }

    /// Remove a reservation id from the back-reference list (idempotent
    /// w.r.t. an absent id)
    pub async fn remove_reservation(&self, nic: &str, reservation: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET reservation_ids -= $rid")
            .bind(("thing", user_key(nic)))
            .bind(("rid", reservation.to_string()))
            .await?;
        Ok(())
    }
}
