//! Contact form handler

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{AppError, AppResult, validation};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
}

/// POST /api/contact
///
/// Accepts a contact form submission. The message is recorded in the server
/// log; no mail delivery happens here.
pub async fn submit(Json(body): Json<Value>) -> AppResult<Json<ContactResponse>> {
    let req: ContactRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let (Some(name), Some(email), Some(subject), Some(message)) =
        (req.name, req.email, req.subject, req.message)
    else {
        return Err(AppError::validation("Missing required fields"));
    };

    validation::validate_required_text(&name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(&email, "email", validation::MAX_EMAIL_LEN)?;
    validation::validate_required_text(&subject, "subject", validation::MAX_SHORT_TEXT_LEN)?;
    validation::validate_required_text(&message, "message", validation::MAX_NOTE_LEN)?;

    tracing::info!(
        target: "contact",
        name = %name,
        email = %email,
        phone = %req.phone.as_deref().unwrap_or("-"),
        subject = %subject,
        message = %message,
        "Contact form submission"
    );

    Ok(Json(ContactResponse {
        message: "Contact form submitted successfully",
    }))
}
