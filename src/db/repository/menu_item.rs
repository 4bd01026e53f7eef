//! Menu Item Repository

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemUpdate};
use crate::utils::time;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Available items only (public menu)
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE is_available = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select((TABLE, id)).await?;
        Ok(item)
    }

    /// Total number of items (dashboard counter)
    pub async fn count_all(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM menu_item GROUP ALL")
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Insert a fully-built item record (category link already resolved)
    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Partial update via MERGE; `category` is pre-resolved by the handler
    pub async fn update(
        &self,
        id: &str,
        data: MenuItemUpdate,
        category: Option<RecordId>,
    ) -> RepoResult<MenuItem> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }

        #[derive(Serialize)]
        struct MenuItemUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_available: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_featured: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            allergens: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            dietary_info: Option<Vec<String>>,
            updated_at: i64,
        }

        let update_data = MenuItemUpdateDb {
            name: data.name,
            description: data.description,
            price: data.price,
            category,
            image_url: data.image_url,
            is_available: data.is_available,
            is_featured: data.is_featured,
            allergens: data.allergens,
            dietary_info: data.dietary_info,
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
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete; true when a record was removed
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<MenuItem> = self.base.db().delete((TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
