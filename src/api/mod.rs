//! HTTP API modules
//!
//! Each module owns its routes and exposes a `router()`; [`crate::core::server`]
//! merges them and applies the auth middleware over `/api/admin/*`.

pub mod analytics;
pub mod auth;
pub mod contact;
pub mod health;
pub mod menu;
pub mod menu_categories;
pub mod menu_items;
pub mod reservations;
