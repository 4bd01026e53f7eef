//! Menu item admin API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/menu-items | GET, POST | admin |
//! | /api/admin/menu-items/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/menu-items",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/admin/menu-items/{id}",
            put(handler::update).delete(handler::remove),
        )
}
