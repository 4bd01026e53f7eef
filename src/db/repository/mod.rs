//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Ids follow the
//! RecordId convention: handlers pass bare key strings, repositories build
//! `RecordId::from_table_key(TABLE, key)` and never expose `Thing` syntax.

pub mod menu_category;
pub mod menu_item;
pub mod reservation;

pub use menu_category::MenuCategoryRepository;
pub use menu_item::MenuItemRepository;
pub use reservation::ReservationRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
