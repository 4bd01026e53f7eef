//! Menu item admin handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;
use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemView};
use crate::db::repository::{MenuCategoryRepository, MenuItemRepository};
use crate::utils::{AppError, AppResult, time, validation};

fn items(state: &ServerState) -> MenuItemRepository {
    MenuItemRepository::new(state.get_db())
}

fn categories(state: &ServerState) -> MenuCategoryRepository {
    MenuCategoryRepository::new(state.get_db())
}

/// Resolve a category key into its record id and name, rejecting unknown
/// categories
async fn resolve_category(
    repo: &MenuCategoryRepository,
    category_id: &str,
) -> AppResult<(RecordId, String)> {
    let category = repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Unknown category: {}", category_id)))?;
    let record = category
        .id
        .ok_or_else(|| AppError::internal("Category record has no id"))?;
    Ok((record, category.name))
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    Ok(())
}

/// GET /api/admin/menu-items
///
/// Every item, available or not, with resolved category names.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemView>>> {
    let all_items = items(&state).find_all().await?;
    let names: HashMap<String, String> = categories(&state)
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.id_key(), c.name))
        .collect();

    let views = all_items
        .into_iter()
        .map(|item| {
            let name = names.get(&item.category_key()).cloned().unwrap_or_default();
            MenuItemView::new(item, name)
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/admin/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<MenuItemView>> {
    let req: MenuItemCreate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Missing required fields"))?;

    validation::validate_required_text(&req.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(&req.description, "description", validation::MAX_NOTE_LEN)?;
    validation::validate_optional_text(&req.image_url, "image_url", validation::MAX_URL_LEN)?;
    validate_price(req.price)?;

    let category_repo = categories(&state);
    let (category, category_name) = resolve_category(&category_repo, &req.category_id).await?;

    let now = time::now_millis();
    let item = MenuItem {
        id: None,
        name: req.name,
        description: req.description,
        price: req.price,
        category,
        image_url: req.image_url,
        is_available: req.is_available.unwrap_or(true),
        is_featured: req.is_featured.unwrap_or(false),
        allergens: req.allergens,
        dietary_info: req.dietary_info,
        created_at: now,
        updated_at: now,
    };

    let created = items(&state).create(item).await?;
    tracing::info!(item_id = %created.id_key(), name = %created.name, "Menu item created");
    Ok(Json(MenuItemView::new(created, category_name)))
}

/// PUT /api/admin/menu-items/{id}
///
/// Partial update; a `category_id` in the body is resolved (and validated)
/// before the merge.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<MenuItemView>> {
    let req: MenuItemUpdate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Invalid request body"))?;

    if let Some(ref name) = req.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&req.description, "description", validation::MAX_NOTE_LEN)?;
    validation::validate_optional_text(&req.image_url, "image_url", validation::MAX_URL_LEN)?;
    if let Some(price) = req.price {
        validate_price(price)?;
    }

    let category_repo = categories(&state);
    let category = match req.category_id.as_deref() {
        Some(category_id) => Some(resolve_category(&category_repo, category_id).await?.0),
        None => None,
    };

    let updated = items(&state).update(&id, req, category).await?;
    let category_name = category_repo
        .find_by_id(&updated.category_key())
        .await?
        .map(|c| c.name)
        .unwrap_or_default();

    tracing::info!(item_id = %id, "Menu item updated");
    Ok(Json(MenuItemView::new(updated, category_name)))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/admin/menu-items/{id}
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !items(&state).delete(&id).await? {
        return Err(AppError::not_found("Menu item not found"));
    }
    tracing::info!(item_id = %id, "Menu item deleted");
    Ok(Json(DeleteResponse { success: true }))
}
