use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;

/// Server state - shared handles for all request handlers
///
/// Cloning is shallow: the config is small and the database handle is a
/// reference-counted client.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the database under `work_dir/database/`
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("railbook.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.db)
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
