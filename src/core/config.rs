//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/tavola | work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | ADMIN_USERNAME | admin | admin login name |
//! | ADMIN_PASSWORD_HASH | (dev fallback) | Argon2 hash of the admin password |
//! | JWT_SECRET | (dev fallback) | session token signing key |
//! | JWT_EXPIRATION_MINUTES | 480 | session token lifetime |

use std::path::PathBuf;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Admin login name
    pub admin_username: String,
    /// Argon2 hash of the admin password
    pub admin_password_hash: String,
    /// JWT session settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, with development
    /// defaults for anything unset.
    ///
    /// # Panics
    ///
    /// In release builds, when `ADMIN_PASSWORD_HASH` is not set.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/tavola".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .unwrap_or_else(|_| dev_fallback_password_hash()),
            jwt: JwtConfig::default(),
        }
    }

    /// Override work dir and port (test setups)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the embedded database files
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Hash a password with Argon2 and a fresh salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn dev_fallback_password_hash() -> String {
    #[cfg(debug_assertions)]
    {
        tracing::warn!(
            "ADMIN_PASSWORD_HASH not set! Using insecure default password 'admin'. \
             DO NOT USE IN PRODUCTION!"
        );
        hash_password("admin").expect("Failed to hash default admin password")
    }
    #[cfg(not(debug_assertions))]
    {
        panic!("FATAL: ADMIN_PASSWORD_HASH environment variable is not set!");
    }
}
