//! Menu category admin API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/menu-categories | GET, POST | admin |
//! | /api/admin/menu-categories/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/menu-categories",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/admin/menu-categories/{id}",
            put(handler::update).delete(handler::remove),
        )
}
