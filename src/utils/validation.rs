//! Input validation helpers
//!
//! Centralized text length constants and validation functions. The store
//! enforces no lengths of its own, so the API boundary does.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity and customer names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special requests, contact messages
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, time strings
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

/// Largest party a single reservation may book
pub const MAX_PARTY_SIZE: i64 = 50;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a party size (positive, bounded)
pub fn validate_party_size(party_size: i64) -> Result<(), AppError> {
    if party_size < 1 {
        return Err(AppError::validation("party_size must be a positive integer"));
    }
    if party_size > MAX_PARTY_SIZE {
        return Err(AppError::validation(format!(
            "party_size is too large (max {MAX_PARTY_SIZE})"
        )));
    }
    Ok(())
}
