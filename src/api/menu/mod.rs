//! Public menu route
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu | GET | none |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::public_menu))
}
