//! Reservation Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationStatus, ReservationView};
use crate::db::repository::ReservationRepository;
use crate::utils::{AppError, AppResult, otp, time, validation};

fn repo(state: &ServerState) -> ReservationRepository {
    ReservationRepository::new(state.get_db())
}

// ── Public intake ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: Option<i64>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedReservation {
    pub id: String,
    pub customer_name: String,
    pub reservation_date: String,
    pub reservation_time: String,
}

#[derive(Debug, Serialize)]
pub struct CreateReservationResponse {
    pub success: bool,
    pub message: &'static str,
    pub reservation: CreatedReservation,
}

/// POST /api/reservations
///
/// Creates a pending reservation and issues its verification code. The code
/// is written to the log in place of outbound mail delivery.
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<CreateReservationResponse>> {
    let req: CreateReservationRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let (
        Some(customer_name),
        Some(customer_email),
        Some(customer_phone),
        Some(party_size),
        Some(reservation_date),
        Some(reservation_time),
    ) = (
        req.customer_name,
        req.customer_email,
        req.customer_phone,
        req.party_size,
        req.reservation_date,
        req.reservation_time,
    )
    else {
        return Err(AppError::validation("Missing required fields"));
    };

    validation::validate_required_text(&customer_name, "customer_name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(
        &customer_email,
        "customer_email",
        validation::MAX_EMAIL_LEN,
    )?;
    validation::validate_required_text(
        &customer_phone,
        "customer_phone",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_party_size(party_size)?;
    time::parse_date(&reservation_date)?;
    time::parse_time(&reservation_time)?;
    validation::validate_optional_text(
        &req.special_requests,
        "special_requests",
        validation::MAX_NOTE_LEN,
    )?;

    let now = time::now_millis();
    let code = otp::generate_code();

    let reservation = Reservation {
        id: None,
        customer_name,
        customer_email,
        customer_phone,
        party_size,
        reservation_date,
        reservation_time,
        special_requests: req.special_requests,
        otp_code: code.clone(),
        otp_created_at: now,
        otp_expires_at: otp::expires_at(now),
        otp_verified: false,
        confirmed_at: None,
        status: ReservationStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let created = repo(&state).create(reservation).await?;
    let id = created.id_key();

    // No mail transport is wired up; the code goes to the log instead
    tracing::info!(
        target: "mailer",
        reservation_id = %id,
        email = %created.customer_email,
        code = %code,
        "Verification code issued"
    );

    Ok(Json(CreateReservationResponse {
        success: true,
        message: "Reservation created. Please check your email for the verification code.",
        reservation: CreatedReservation {
            id,
            customer_name: created.customer_name,
            reservation_date: created.reservation_date,
            reservation_time: created.reservation_time,
        },
    }))
}

// ── OTP verification ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "reservationId")]
    pub reservation_id: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/verify-otp
///
/// The confirm itself is one conditional update, so the status cannot flip
/// twice and an expired code cannot win a race against its own expiry. Only
/// after the update misses do we look at the record to decide between the
/// invalid-code and expired-code answers; unknown ids and wrong codes get
/// the same reply.
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<FlowResponse>> {
    let req: VerifyOtpRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let (Some(id), Some(code)) = (req.reservation_id, req.otp) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let repo = repo(&state);
    let now = time::now_millis();

    if let Some(confirmed) = repo.confirm_pending(&id, &code, now).await? {
        tracing::info!(reservation_id = %confirmed.id_key(), "Reservation confirmed");
        return Ok(Json(FlowResponse {
            success: true,
            message: "Reservation confirmed successfully",
        }));
    }

    match repo.find_by_id(&id).await? {
        Some(r) if r.status == ReservationStatus::Pending && r.otp_code == code => {
            Err(AppError::validation(
                "Verification code has expired. Please request a new one.",
            ))
        }
        _ => Err(AppError::invalid_code()),
    }
}

// ── OTP resend ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResendOtpRequest {
    #[serde(rename = "reservationId")]
    pub reservation_id: Option<String>,
}

/// POST /api/resend-otp
///
/// Issues a fresh code and resets both OTP timestamps, provided the previous
/// code is at least the cooldown old.
pub async fn resend_otp(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<FlowResponse>> {
    let req: ResendOtpRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let Some(id) = req.reservation_id else {
        return Err(AppError::validation("Missing required fields"));
    };

    let repo = repo(&state);
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    if reservation.status != ReservationStatus::Pending {
        return Err(AppError::validation("Reservation is not awaiting verification"));
    }

    let now = time::now_millis();
    if otp::in_resend_cooldown(reservation.otp_created_at, now) {
        return Err(AppError::rate_limited(
            "Please wait before requesting a new code",
        ));
    }

    let code = otp::generate_code();
    repo.refresh_otp(&id, &code, now)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    tracing::info!(
        target: "mailer",
        reservation_id = %id,
        email = %reservation.customer_email,
        code = %code,
        "Verification code reissued"
    );

    Ok(Json(FlowResponse {
        success: true,
        message: "A new verification code has been sent",
    }))
}

// ── Public lookup ───────────────────────────────────────────────────

/// GET /api/reservations/{id}
///
/// Visible only once confirmed; anything else looks like a missing record.
pub async fn get_confirmed(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReservationView>> {
    match repo(&state).find_by_id(&id).await? {
        Some(r) if r.status == ReservationStatus::Confirmed => Ok(Json(r.into())),
        _ => Err(AppError::not_found("Reservation not found")),
    }
}

// ── Admin management ────────────────────────────────────────────────

/// GET /api/admin/reservations
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let reservations = repo(&state).find_all().await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// PATCH /api/admin/reservations/{id}
///
/// Body `{"status": "..."}`. The target status must name a known state and
/// the move must be legal from the record's current state. `confirmed` is
/// never accepted here: that transition belongs to the verification flow,
/// which also sets `otp_verified` and `confirmed_at`.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<ReservationView>> {
    let req: UpdateStatusRequest =
        serde_json::from_value(body).map_err(|_| AppError::validation("Invalid request body"))?;

    let Some(status) = req.status else {
        return Err(AppError::validation("Missing required fields"));
    };
    let next = ReservationStatus::parse(&status)
        .ok_or_else(|| AppError::validation(format!("Invalid status value: {}", status)))?;

    if next == ReservationStatus::Confirmed {
        return Err(AppError::validation(
            "Reservations are confirmed through code verification",
        ));
    }

    let repo = repo(&state);
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    if !current.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Cannot change status from {} to {}",
            current.status, next
        )));
    }

    let updated = repo
        .update_status_from(&id, current.status, next, time::now_millis())
        .await?
        .ok_or_else(|| AppError::conflict("Reservation was modified concurrently"))?;

    tracing::info!(
        reservation_id = %id,
        from = %current.status,
        to = %next,
        "Reservation status updated"
    );

    Ok(Json(updated.into()))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/admin/reservations/{id}
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !repo(&state).delete(&id).await? {
        return Err(AppError::not_found("Reservation not found"));
    }
    tracing::info!(reservation_id = %id, "Reservation deleted");
    Ok(Json(DeleteResponse { success: true }))
}
