//! Database Module
//!
//! Embedded SurrealDB storage. Production runs on RocksDB under the work
//! directory; tests run on the in-memory engine.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "tavola";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        Self::prepare(db).await
    }

    /// Open a fresh in-memory database (tests)
    pub async fn new_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (ns={}, db={})", NAMESPACE, DATABASE);
        Ok(Self { db })
    }
}

/// Indexes for the query paths that scan by value
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE INDEX IF NOT EXISTS reservation_date_idx ON TABLE reservation COLUMNS reservation_date;
        DEFINE INDEX IF NOT EXISTS reservation_created_idx ON TABLE reservation COLUMNS created_at;
        DEFINE INDEX IF NOT EXISTS menu_item_category_idx ON TABLE menu_item COLUMNS category;
        DEFINE INDEX IF NOT EXISTS menu_category_name_idx ON TABLE menu_category COLUMNS name;
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;
    Ok(())
}
