//! Menu Category Repository

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use crate::utils::time;

const TABLE: &str = "menu_category";

#[derive(Clone)]
pub struct MenuCategoryRepository {
    base: BaseRepository,
}

impl MenuCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories ordered by display_order, then name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuCategory>> {
        let categories: Vec<MenuCategory> = self
            .base
            .db()
            .query("SELECT * FROM menu_category ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuCategory>> {
        let category: Option<MenuCategory> = self.base.db().select((TABLE, id)).await?;
        Ok(category)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuCategory>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_category WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let categories: Vec<MenuCategory> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category; duplicate names are rejected
    pub async fn create(&self, data: MenuCategoryCreate) -> RepoResult<MenuCategory> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let now = time::now_millis();
        let category = MenuCategory {
            id: None,
            name: data.name,
            description: data.description,
            display_order: data.display_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuCategory> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Partial update via MERGE
    pub async fn update(&self, id: &str, data: MenuCategoryUpdate) -> RepoResult<MenuCategory> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                new_name
            )));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            display_order: Option<i64>,
            updated_at: i64,
        }

        let update_data = CategoryUpdateDb {
            name: data.name,
            description: data.description,
            display_order: data.display_order,
            updated_at: time::now_millis(),
        };

        let record = RecordId::from_table_key(TABLE, id);
        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", record))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category and every item that references it
    pub async fn delete_cascade(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let record = RecordId::from_table_key(TABLE, id);
        self.base
            .db()
            .query("DELETE menu_item WHERE category = $id; DELETE $id;")
            .bind(("id", record))
            .await?;

        Ok(true)
    }
}
