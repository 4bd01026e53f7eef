//! Menu Category Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::id_key;

/// Menu category record — single items table with a category reference,
/// never a physical table per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuCategory {
    pub fn id_key(&self) -> String {
        id_key(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

/// API projection with a string id
#[derive(Debug, Clone, Serialize)]
pub struct MenuCategoryView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub display_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<MenuCategory> for MenuCategoryView {
    fn from(c: MenuCategory) -> Self {
        Self {
            id: id_key(&c.id),
            name: c.name,
            description: c.description,
            display_order: c.display_order,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
