//! Reservation API module
//!
//! Public intake and OTP confirmation flow, plus the admin management
//! surface.
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/reservations | POST | none |
//! | /api/reservations/{id} | GET | none |
//! | /api/verify-otp | POST | none |
//! | /api/resend-otp | POST | none |
//! | /api/admin/reservations | GET | admin |
//! | /api/admin/reservations/{id} | PATCH | admin |
//! | /api/admin/reservations/{id} | DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reservations", post(handler::create))
        .route("/api/reservations/{id}", get(handler::get_confirmed))
        .route("/api/verify-otp", post(handler::verify_otp))
        .route("/api/resend-otp", post(handler::resend_otp))
        .route("/api/admin/reservations", get(handler::list_all))
        .route(
            "/api/admin/reservations/{id}",
            patch(handler::update_status).delete(handler::remove),
        )
}
