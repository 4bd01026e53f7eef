//! Public menu handler

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::MenuItemView;
use crate::db::repository::{MenuCategoryRepository, MenuItemRepository};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct MenuSection {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub display_order: i64,
    pub items: Vec<MenuItemView>,
}

/// GET /api/menu
///
/// Categories in display order, each carrying only its available items.
/// Empty categories stay in the response so the frontend keeps its section
/// headings stable.
pub async fn public_menu(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuSection>>> {
    let categories = MenuCategoryRepository::new(state.get_db()).find_all().await?;
    let items = MenuItemRepository::new(state.get_db()).find_available().await?;

    let names: HashMap<String, String> = categories
        .iter()
        .map(|c| (c.id_key(), c.name.clone()))
        .collect();

    let mut by_category: HashMap<String, Vec<MenuItemView>> = HashMap::new();
    for item in items {
        let key = item.category_key();
        let name = names.get(&key).cloned().unwrap_or_default();
        by_category
            .entry(key)
            .or_default()
            .push(MenuItemView::new(item, name));
    }

    let sections = categories
        .into_iter()
        .map(|c| {
            let key = c.id_key();
            MenuSection {
                items: by_category.remove(&key).unwrap_or_default(),
                id: key,
                name: c.name,
                description: c.description,
                display_order: c.display_order,
            }
        })
        .collect();

    Ok(Json(sections))
}
