//! Analytics handlers
//!
//! Aggregation runs in one pass over the fetched window; counting stays in
//! Rust so the response shaping (top-N ordering, weekday naming) is testable
//! without a store.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::Reservation;
use crate::db::repository::{MenuItemRepository, ReservationRepository};
use crate::utils::{AppResult, time};

const DEFAULT_WINDOW_DAYS: i64 = 30;
const MAX_WINDOW_DAYS: i64 = 365;
const RECENT_LIMIT: usize = 10;

// ── Dashboard counters ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub today_reservations: i64,
    pub total_reservations: i64,
    pub total_menu_items: i64,
    pub avg_party_size: f64,
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let reservations = ReservationRepository::new(state.get_db());
    let items = MenuItemRepository::new(state.get_db());

    let today_reservations = reservations.count_by_date(&time::today_string()).await?;
    let total_reservations = reservations.count_all().await?;
    let total_menu_items = items.count_all().await?;
    let sizes = reservations.party_sizes().await?;

    Ok(Json(StatsResponse {
        today_reservations,
        total_reservations,
        total_menu_items,
        avg_party_size: average_rounded(&sizes),
    }))
}

/// Mean party size rounded to 1 decimal; 0.0 when there is nothing to average
fn average_rounded(sizes: &[i64]) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }
    let mean = sizes.iter().sum::<i64>() as f64 / sizes.len() as f64;
    (mean * 10.0).round() / 10.0
}

// ── Windowed analytics ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BucketCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReservation {
    pub id: String,
    pub customer_name: String,
    pub party_size: i64,
    pub reservation_date: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_reservations: i64,
    pub total_guests: i64,
    pub avg_party_size: f64,
    pub peak_hours: Vec<BucketCount>,
    pub popular_days: Vec<BucketCount>,
    pub recent_reservations: Vec<RecentReservation>,
}

/// GET /api/admin/analytics?days=N
///
/// Aggregates reservations whose date falls within the last N days
/// (default 30, clamped to a year).
pub async fn analytics(
    State(state): State<ServerState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse>> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, MAX_WINDOW_DAYS);
    let start = time::days_ago_string(days);
    let end = time::today_string();

    let window = ReservationRepository::new(state.get_db())
        .find_by_date_range(&start, &end)
        .await?;

    Ok(Json(aggregate(window)))
}

fn aggregate(mut window: Vec<Reservation>) -> AnalyticsResponse {
    let total_reservations = window.len() as i64;
    let total_guests: i64 = window.iter().map(|r| r.party_size).sum();
    let avg_party_size = if total_reservations == 0 {
        0.0
    } else {
        let mean = total_guests as f64 / total_reservations as f64;
        (mean * 10.0).round() / 10.0
    };

    let mut hours: HashMap<String, i64> = HashMap::new();
    let mut days: HashMap<String, i64> = HashMap::new();
    for r in &window {
        // "18:30:00" and "18:30" both bucket as "18:30"
        let hour = r.reservation_time.chars().take(5).collect::<String>();
        *hours.entry(hour).or_insert(0) += 1;
        if let Some(weekday) = time::weekday_name(&r.reservation_date) {
            *days.entry(weekday).or_insert(0) += 1;
        }
    }

    window.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent_reservations = window
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|r| RecentReservation {
            id: r.id_key(),
            customer_name: r.customer_name,
            party_size: r.party_size,
            reservation_date: r.reservation_date,
            status: r.status.as_str().to_string(),
        })
        .collect();

    AnalyticsResponse {
        total_reservations,
        total_guests,
        avg_party_size,
        peak_hours: sorted_buckets(hours),
        popular_days: sorted_buckets(days),
        recent_reservations,
    }
}

/// Counts sorted descending; ties break on label for a stable response
fn sorted_buckets(counts: HashMap<String, i64>) -> Vec<BucketCount> {
    let mut buckets: Vec<BucketCount> = counts
        .into_iter()
        .map(|(label, count)| BucketCount { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ReservationStatus;

    fn reservation(date: &str, hhmm: &str, party: i64, created_at: i64) -> Reservation {
        Reservation {
            id: None,
            customer_name: "Guest".to_string(),
            customer_email: "guest@example.com".to_string(),
            customer_phone: "+34600000000".to_string(),
            party_size: party,
            reservation_date: date.to_string(),
            reservation_time: hhmm.to_string(),
            special_requests: None,
            otp_code: "123456".to_string(),
            otp_created_at: created_at,
            otp_expires_at: created_at,
            otp_verified: true,
            confirmed_at: Some(created_at),
            status: ReservationStatus::Confirmed,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn empty_window_aggregates_to_zeros() {
        let out = aggregate(vec![]);
        assert_eq!(out.total_reservations, 0);
        assert_eq!(out.total_guests, 0);
        assert_eq!(out.avg_party_size, 0.0);
        assert!(out.peak_hours.is_empty());
        assert!(out.popular_days.is_empty());
        assert!(out.recent_reservations.is_empty());
    }

    #[test]
    fn guests_and_average_come_from_party_sizes() {
        let out = aggregate(vec![
            reservation("2025-06-01", "18:30", 2, 1),
            reservation("2025-06-01", "18:30", 5, 2),
        ]);
        assert_eq!(out.total_reservations, 2);
        assert_eq!(out.total_guests, 7);
        assert_eq!(out.avg_party_size, 3.5);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let out = aggregate(vec![
            reservation("2025-06-01", "18:30", 2, 1),
            reservation("2025-06-01", "18:30", 2, 2),
            reservation("2025-06-01", "18:30", 3, 3),
        ]);
        // 7/3 = 2.333...
        assert_eq!(out.avg_party_size, 2.3);
        assert_eq!(average_rounded(&[2, 2, 3]), 2.3);
        assert_eq!(average_rounded(&[]), 0.0);
    }

    #[test]
    fn peak_hours_bucket_and_sort_descending() {
        let out = aggregate(vec![
            reservation("2025-06-01", "18:30", 2, 1),
            reservation("2025-06-02", "18:30:00", 2, 2),
            reservation("2025-06-03", "20:00", 2, 3),
        ]);
        assert_eq!(out.peak_hours[0], BucketCount { label: "18:30".to_string(), count: 2 });
        assert_eq!(out.peak_hours[1], BucketCount { label: "20:00".to_string(), count: 1 });
    }

    #[test]
    fn popular_days_use_weekday_names() {
        // 2025-06-01 Sunday, 2025-06-08 Sunday, 2025-06-02 Monday
        let out = aggregate(vec![
            reservation("2025-06-01", "18:00", 2, 1),
            reservation("2025-06-08", "18:00", 2, 2),
            reservation("2025-06-02", "18:00", 2, 3),
        ]);
        assert_eq!(out.popular_days[0], BucketCount { label: "Sunday".to_string(), count: 2 });
        assert_eq!(out.popular_days[1], BucketCount { label: "Monday".to_string(), count: 1 });
    }

    #[test]
    fn recent_keeps_ten_newest_by_creation() {
        // party_size mirrors created_at so ordering is observable
        let window: Vec<Reservation> = (1..=15)
            .map(|i| reservation("2025-06-01", "18:00", i, i))
            .collect();
        let out = aggregate(window);
        assert_eq!(out.recent_reservations.len(), 10);
        let parties: Vec<i64> = out.recent_reservations.iter().map(|r| r.party_size).collect();
        assert_eq!(parties, (6..=15).rev().collect::<Vec<i64>>());
        assert_eq!(out.recent_reservations[0].status, "confirmed");
    }
}
