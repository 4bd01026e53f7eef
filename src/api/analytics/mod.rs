//! Admin dashboard analytics
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/stats | GET | admin |
//! | /api/admin/analytics | GET | admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/stats", get(handler::stats))
        .route("/api/admin/analytics", get(handler::analytics))
}
