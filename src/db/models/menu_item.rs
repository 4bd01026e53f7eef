//! Menu Item Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::id_key;

/// Menu item record, linked to its category by record id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_info: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    pub fn id_key(&self) -> String {
        id_key(&self.id)
    }

    pub fn category_key(&self) -> String {
        self.category.key().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: String,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_info: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub allergens: Option<Vec<String>>,
    pub dietary_info: Option<Vec<String>>,
}

/// API projection with string ids and the resolved category name
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category_id: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
    pub allergens: Vec<String>,
    pub dietary_info: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItemView {
    /// Build the view; `category_name` is resolved by the caller
    pub fn new(item: MenuItem, category_name: String) -> Self {
        Self {
            id: id_key(&item.id),
            name: item.name,
            description: item.description,
            price: item.price,
            category_id: item.category.key().to_string(),
            category: category_name,
            image_url: item.image_url,
            is_available: item.is_available,
            is_featured: item.is_featured,
            allergens: item.allergens,
            dietary_info: item.dietary_info,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
