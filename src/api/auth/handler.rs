//! Authentication Handlers

use std::time::Duration;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
}

/// POST /api/auth/login
///
/// Verifies the submitted credentials against the configured admin identity
/// and issues a session token. Unknown username and wrong password produce
/// the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<LoginResponse>> {
    let req: LoginRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::validation("Username and password are required"));
    };
    if username.is_empty() || password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let username_matches = username == state.config.admin_username;

    let parsed_hash = PasswordHash::new(&state.config.admin_password_hash)
        .map_err(|e| AppError::internal(format!("Invalid admin password hash: {}", e)))?;
    let password_matches = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    // Fixed delay before reporting the result, regardless of outcome
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if !username_matches || !password_matches {
        tracing::warn!(target: "security", username = %username, "Login failed");
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .jwt_service
        .generate_token(&username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(username = %username, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        token,
        username,
    }))
}
