//! End-to-end API tests over an in-memory database
//!
//! The full router (auth middleware included) is exercised through
//! `tower::ServiceExt::oneshot`, no listening socket involved.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tavola_server::auth::JwtConfig;
use tavola_server::core::build_router;
use tavola_server::core::config::hash_password;
use tavola_server::db::DbService;
use tavola_server::db::models::ReservationStatus;
use tavola_server::db::repository::ReservationRepository;
use tavola_server::{Config, ServerState};

const ADMIN_PASSWORD: &str = "correct horse battery staple";

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/tavola-test".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        admin_username: "admin".to_string(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        jwt: JwtConfig {
            secret: "integration-test-secret-32-characters!!!".to_string(),
            expiration_minutes: 60,
            issuer: "tavola-server".to_string(),
            audience: "tavola-admin".to_string(),
        },
    }
}

async fn test_server() -> (Router, ServerState) {
    let db = DbService::new_in_memory().await.unwrap().db;
    let state = ServerState::with_db(test_config(), db);
    (build_router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn intake_body() -> Value {
    json!({
        "customer_name": "Anna Keller",
        "customer_email": "anna@example.com",
        "customer_phone": "+34600111222",
        "party_size": 4,
        "reservation_date": "2025-06-01",
        "reservation_time": "18:30"
    })
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// ── Reservation intake and OTP flow ─────────────────────────────────

#[tokio::test]
async fn intake_returns_id_and_hides_the_code() {
    let (app, state) = test_server().await;

    let (status, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let reservation = &body["reservation"];
    let id = reservation["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(reservation["customer_name"], json!("Anna Keller"));
    assert_eq!(reservation["reservation_date"], json!("2025-06-01"));
    assert_eq!(reservation["reservation_time"], json!("18:30"));

    // The code never leaves the server
    let stored = ReservationRepository::new(state.get_db())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Pending);
    assert_eq!(stored.otp_code.len(), 6);
    assert!(!body.to_string().contains(&stored.otp_code));

    // Unconfirmed reservations are invisible to the public lookup
    let (status, _) = send(&app, "GET", &format!("/api/reservations/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn intake_rejects_missing_fields() {
    let (app, _) = test_server().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(json!({"customer_name": "Anna Keller"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required fields"));
}

#[tokio::test]
async fn wrong_code_rejected_without_mutation() {
    let (app, state) = test_server().await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    let repo = ReservationRepository::new(state.get_db());
    let code = repo.find_by_id(&id).await.unwrap().unwrap().otp_code;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let (status, body) = send(
        &app,
        "POST",
        "/api/verify-otp",
        Some(json!({"reservationId": id, "otp": wrong})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid verification code"));

    let unchanged = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, ReservationStatus::Pending);
    assert!(!unchanged.otp_verified);
}

#[tokio::test]
async fn unknown_id_gets_the_same_invalid_code_reply() {
    let (app, _) = test_server().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/verify-otp",
        Some(json!({"reservationId": "nonexistent", "otp": "123456"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid verification code"));
}

#[tokio::test]
async fn correct_code_confirms_exactly_once() {
    let (app, state) = test_server().await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    let repo = ReservationRepository::new(state.get_db());
    let code = repo.find_by_id(&id).await.unwrap().unwrap().otp_code;

    let (status, body) = send(
        &app,
        "POST",
        "/api/verify-otp",
        Some(json!({"reservationId": id, "otp": code})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    // Now publicly visible and confirmed
    let (status, body) = send(&app, "GET", &format!("/api/reservations/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("confirmed"));
    assert_eq!(body.get("otp_code"), None);

    // Replaying the same code fails: the record is no longer pending
    let (status, _) = send(
        &app,
        "POST",
        "/api/verify-otp",
        Some(json!({"reservationId": id, "otp": code})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resend_inside_cooldown_is_rate_limited() {
    let (app, _) = test_server().await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/resend-otp",
        Some(json!({"reservationId": id})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], json!("Please wait before requesting a new code"));
}

#[tokio::test]
async fn resend_after_cooldown_issues_a_new_code() {
    let (app, state) = test_server().await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    // Age the current code past the cooldown window
    let repo = ReservationRepository::new(state.get_db());
    let aged = chrono::Utc::now().timestamp_millis() - 61_000;
    repo.refresh_otp(&id, "111111", aged).await.unwrap().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/resend-otp",
        Some(json!({"reservationId": id})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let updated = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_ne!(updated.otp_code, "111111");
    assert_eq!(updated.otp_code.len(), 6);
    assert!(updated.otp_created_at > aged);
    assert_eq!(updated.otp_expires_at, updated.otp_created_at + 10 * 60 * 1000);
}

#[tokio::test]
async fn resend_for_unknown_reservation_is_not_found() {
    let (app, _) = test_server().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/resend-otp",
        Some(json!({"reservationId": "nonexistent"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Admin gate and login ────────────────────────────────────────────

#[tokio::test]
async fn admin_surface_rejects_missing_and_garbage_tokens() {
    let (app, _) = test_server().await;

    let (status, _) = send(&app, "GET", "/api/admin/reservations", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        send(&app, "GET", "/api/admin/reservations", None, Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_a_token_the_middleware_accepts() {
    let (app, _) = test_server().await;

    let token = login(&app).await;
    let (status, body) = send(&app, "GET", "/api/admin/reservations", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let (app, _) = test_server().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "nobody", "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Admin reservation management ────────────────────────────────────

#[tokio::test]
async fn status_updates_follow_the_transition_table() {
    let (app, state) = test_server().await;
    let token = login(&app).await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/reservations/{id}");

    // pending -> completed is not a legal edge
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"status": "completed"})), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status values are rejected before any lookup logic runs
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"status": "no-show"})), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Confirm through the OTP flow, then complete
    let repo = ReservationRepository::new(state.get_db());
    let code = repo.find_by_id(&id).await.unwrap().unwrap().otp_code;
    let (status, _) = send(
        &app,
        "POST",
        "/api/verify-otp",
        Some(json!({"reservationId": id, "otp": code})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, "PATCH", &uri, Some(json!({"status": "completed"})), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("completed"));
}

#[tokio::test]
async fn admin_patch_cannot_confirm_without_verification() {
    let (app, state) = test_server().await;
    let token = login(&app).await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    // Confirmation belongs to the code-verification flow only
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/admin/reservations/{id}"),
        Some(json!({"status": "confirmed"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unchanged = ReservationRepository::new(state.get_db())
        .find_by_id(&id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, ReservationStatus::Pending);
    assert!(!unchanged.otp_verified);
    assert_eq!(unchanged.confirmed_at, None);

    // Still invisible to the public lookup
    let (status, _) = send(&app, "GET", &format!("/api/reservations/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_reservation() {
    let (app, _) = test_server().await;
    let token = login(&app).await;

    let (_, body) = send(&app, "POST", "/api/reservations", Some(intake_body()), None).await;
    let id = body["reservation"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/reservations/{id}");

    let (status, body) = send(&app, "DELETE", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, _) = send(&app, "DELETE", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Menu management and public menu ─────────────────────────────────

#[tokio::test]
async fn menu_flow_from_admin_to_public() {
    let (app, _) = test_server().await;
    let token = login(&app).await;

    // Category
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/menu-categories",
        Some(json!({"name": "Mains", "display_order": 1})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let category_id = body["id"].as_str().unwrap().to_string();

    // Duplicate name -> 409
    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/menu-categories",
        Some(json!({"name": "Mains"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // One available and one unavailable item
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/menu-items",
        Some(json!({
            "name": "Tagliatelle al ragù",
            "price": 14.5,
            "category_id": category_id,
            "allergens": ["gluten"]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], json!("Mains"));
    let item_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/menu-items",
        Some(json!({
            "name": "Seasonal special",
            "price": 19.0,
            "category_id": category_id,
            "is_available": false
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Public menu: only the available item shows
    let (status, body) = send(&app, "GET", "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["name"], json!("Mains"));
    let items = sections[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], json!("Tagliatelle al ragù"));

    // Update price, then delete the category and everything under it
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/admin/menu-items/{item_id}"),
        Some(json!({"price": 15.0})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(15.0));

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/admin/menu-categories/{category_id}"),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/admin/menu-items", None, Some(&token)).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn menu_item_with_unknown_category_is_rejected() {
    let (app, _) = test_server().await;
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/menu-items",
        Some(json!({"name": "Orphan", "price": 9.0, "category_id": "missing"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn stats_and_analytics_handle_an_empty_database() {
    let (app, _) = test_server().await;
    let token = login(&app).await;

    let (status, body) = send(&app, "GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReservations"], json!(0));
    assert_eq!(body["totalMenuItems"], json!(0));
    assert_eq!(body["avgPartySize"], json!(0.0));

    let (status, body) = send(&app, "GET", "/api/admin/analytics?days=7", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReservations"], json!(0));
    assert_eq!(body["totalGuests"], json!(0));
    assert_eq!(body["avgPartySize"], json!(0.0));
    assert_eq!(body["peakHours"], json!([]));
    assert_eq!(body["recentReservations"], json!([]));
}

#[tokio::test]
async fn analytics_aggregates_the_recent_window() {
    let (app, _) = test_server().await;
    let token = login(&app).await;

    // Two reservations for today, one eight days old (outside days=7)
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let old = (chrono::Utc::now().date_naive() - chrono::Duration::days(8))
        .format("%Y-%m-%d")
        .to_string();

    for (date, party) in [(&today, 2), (&today, 4), (&old, 6)] {
        let mut body = intake_body();
        body["reservation_date"] = json!(date);
        body["party_size"] = json!(party);
        let (status, _) = send(&app, "POST", "/api/reservations", Some(body), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/admin/analytics?days=7", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReservations"], json!(2));
    assert_eq!(body["totalGuests"], json!(6));
    assert_eq!(body["avgPartySize"], json!(3.0));
    assert_eq!(body["peakHours"][0]["label"], json!("18:30"));
    assert_eq!(body["peakHours"][0]["count"], json!(2));
    assert_eq!(body["recentReservations"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(body["totalReservations"], json!(3));
    assert_eq!(body["avgPartySize"], json!(4.0));
}

// ── Contact and health ──────────────────────────────────────────────

#[tokio::test]
async fn contact_form_requires_its_fields() {
    let (app, _) = test_server().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/contact",
        Some(json!({
            "name": "Anna",
            "email": "anna@example.com",
            "subject": "Private event",
            "message": "Do you host groups of 20?"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Contact form submitted successfully"));

    let (status, _) = send(&app, "POST", "/api/contact", Some(json!({"name": "Anna"})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_database_status() {
    let (app, _) = test_server().await;

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["database"], json!("ok"));
}
