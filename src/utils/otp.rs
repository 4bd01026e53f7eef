//! One-time passcode policy
//!
//! A single expiry window applies everywhere: issuance, verification, and
//! resend all use [`OTP_TTL_MINUTES`]. Resend additionally enforces
//! [`RESEND_COOLDOWN_SECS`] measured from the code's creation time.

use rand::Rng;

/// How long a code stays valid after issuance
pub const OTP_TTL_MINUTES: i64 = 10;

/// Minimum gap between two codes for the same reservation
pub const RESEND_COOLDOWN_SECS: i64 = 60;

/// Generate a 6-digit numeric code, uniform over 100000..=999999
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Expiry timestamp for a code created at `created_at_millis`
pub fn expires_at(created_at_millis: i64) -> i64 {
    created_at_millis + OTP_TTL_MINUTES * 60 * 1000
}

/// Whether a code with the given expiry timestamp is expired at `now_millis`
pub fn is_expired(expires_at_millis: i64, now_millis: i64) -> bool {
    now_millis >= expires_at_millis
}

/// Whether a resend at `now_millis` is still inside the cooldown window
pub fn in_resend_cooldown(created_at_millis: i64, now_millis: i64) -> bool {
    now_millis - created_at_millis < RESEND_COOLDOWN_SECS * 1000
}
