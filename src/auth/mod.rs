//! Authentication: JWT session tokens and the admin-gate middleware

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

/// The authenticated principal, inserted into request extensions by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
        }
    }
}
