//! Database Module
//!
//! Embedded SurrealDB connection and schema definition.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database at the given path and prepare the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("railbook")
            .use_db("booking")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }

    /// Define tables and indexes (idempotent, also used by the in-memory
    /// test databases)
    pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS reservation_user ON reservation FIELDS user_nic;
            DEFINE TABLE IF NOT EXISTS train SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS schedule SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS route SCHEMALESS;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
