//! Tavola Server - restaurant website backend
//!
//! Embedded-database backend behind a restaurant site: public reservation
//! intake with email-code confirmation, the public menu, and an
//! authenticated admin surface for managing reservations, the menu, and
//! dashboard analytics.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/     # configuration, state, HTTP server
//! ├── auth/     # JWT sessions, admin gate middleware
//! ├── api/      # HTTP routes and handlers
//! ├── db/       # embedded SurrealDB, models, repositories
//! └── utils/    # errors, logging, OTP policy, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult};

/// Load `.env`, then bring up logging according to the environment.
///
/// File logging is enabled only when the configured log directory already
/// exists; otherwise everything goes to the console.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = Config::from_env().log_dir();

    if log_dir.exists() {
        init_logger_with_file(log_level.as_deref(), log_dir.to_str());
    } else {
        init_logger_with_file(log_level.as_deref(), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______                  __
 /_  __/___ __   ______  / /___ _
  / / / __ `/ | / / __ \/ / __ `/
 / / / /_/ /| |/ / /_/ / / /_/ /
/_/  \__,_/ |___/\____/_/\__,_/

  Reservation & Menu Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
