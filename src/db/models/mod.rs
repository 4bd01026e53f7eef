//! Database models
//!
//! Records as they live in SurrealDB, plus the Create/Update DTOs the API
//! accepts and the View DTOs it returns. Ids cross the API boundary as the
//! record key string; OTP fields never leave the server.

pub mod menu_category;
pub mod menu_item;
pub mod reservation;

pub use menu_category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuCategoryView};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemView};
pub use reservation::{Reservation, ReservationStatus, ReservationView};

/// Key string for an optional record id ("" when unset)
pub fn id_key(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(|r| r.key().to_string()).unwrap_or_default()
}
