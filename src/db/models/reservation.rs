//! Reservation Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::id_key;

/// Reservation lifecycle states
///
/// A closed enum — unknown strings are rejected at the API boundary, and
/// every mutation goes through [`ReservationStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Parse a status string from the API ("pending", "confirmed", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Legal transition table
    ///
    /// `Pending → Confirmed` happens only through OTP verification;
    /// cancellation is allowed before or after confirmation; completion
    /// requires a confirmed reservation.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation record
///
/// All timestamps are Unix millis; `reservation_date` is `YYYY-MM-DD` and
/// `reservation_time` is `HH:MM` as submitted by the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub party_size: i64,
    pub reservation_date: String,
    pub reservation_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// 6 ASCII digits, server-side only
    pub otp_code: String,
    pub otp_created_at: i64,
    pub otp_expires_at: i64,
    #[serde(default)]
    pub otp_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<i64>,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    pub fn id_key(&self) -> String {
        id_key(&self.id)
    }
}

/// Customer/admin-facing projection — no OTP code, string id
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub party_size: i64,
    pub reservation_date: String,
    pub reservation_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub otp_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<i64>,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Reservation> for ReservationView {
    fn from(r: Reservation) -> Self {
        Self {
            id: id_key(&r.id),
            customer_name: r.customer_name,
            customer_email: r.customer_email,
            customer_phone: r.customer_phone,
            party_size: r.party_size,
            reservation_date: r.reservation_date,
            reservation_time: r.reservation_time,
            special_requests: r.special_requests,
            otp_verified: r.otp_verified,
            confirmed_at: r.confirmed_at,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
