//! Menu category admin handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{MenuCategoryCreate, MenuCategoryUpdate, MenuCategoryView};
use crate::db::repository::MenuCategoryRepository;
use crate::utils::{AppError, AppResult, validation};

fn repo(state: &ServerState) -> MenuCategoryRepository {
    MenuCategoryRepository::new(state.get_db())
}

/// GET /api/admin/menu-categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategoryView>>> {
    let categories = repo(&state).find_all().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /api/admin/menu-categories
///
/// Duplicate names come back as 409.
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<MenuCategoryView>> {
    let req: MenuCategoryCreate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Missing required fields"))?;

    validation::validate_required_text(&req.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(&req.description, "description", validation::MAX_NOTE_LEN)?;

    let created = repo(&state).create(req).await?;
    tracing::info!(category_id = %created.id_key(), name = %created.name, "Category created");
    Ok(Json(created.into()))
}

/// PUT /api/admin/menu-categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<MenuCategoryView>> {
    let req: MenuCategoryUpdate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Invalid request body"))?;

    if let Some(ref name) = req.name {
        validation::validate_required_text(name, "name", validation::MAX_NAME_LEN)?;
    }
    validation::validate_optional_text(&req.description, "description", validation::MAX_NOTE_LEN)?;

    let updated = repo(&state).update(&id, req).await?;
    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(updated.into()))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/admin/menu-categories/{id}
///
/// Removes the category and every item in it.
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !repo(&state).delete_cascade(&id).await? {
        return Err(AppError::not_found("Category not found"));
    }
    tracing::info!(category_id = %id, "Category deleted with its items");
    Ok(Json(DeleteResponse { success: true }))
}
