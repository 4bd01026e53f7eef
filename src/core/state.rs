//! Server state — shared handles for every request handler

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared application state
///
/// Cloning is cheap: the database handle and JWT service are shared
/// references. There is deliberately no other in-process mutable state —
/// everything durable lives in the database.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Session token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the state for production: ensure the work directory
    /// structure exists and open the on-disk database.
    ///
    /// # Panics
    ///
    /// When the work directory or database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");
        std::fs::create_dir_all(config.log_dir()).expect("Failed to create log directory");

        let db_path = db_dir.join("tavola.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db_service.db)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
