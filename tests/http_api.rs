//! End-to-end tests for the REST API.
//!
//! The full router runs against `InMemoryStore` with real PBKDF2 hashing and
//! real JWTs, so registration, login, token validation and the booking flow
//! are all exercised together.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use eventhub::adapters::auth::{JwtSessionValidator, JwtTokenIssuer, Pbkdf2Hasher};
use eventhub::adapters::http::{build_router, AppState};
use eventhub::adapters::memory::InMemoryStore;
use eventhub::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ISSUER: &str = "eventhub-test";

fn app() -> Router {
    let store = InMemoryStore::new();
    let secret = Secret::new("http-api-test-secret".to_string());
    let validator = JwtSessionValidator::new(&secret, ISSUER, Arc::new(store.clone()));
    let state = AppState::in_memory(
        store,
        Arc::new(Pbkdf2Hasher::new(5)),
        Arc::new(JwtTokenIssuer::new(&secret, ISSUER, 3600)),
        Arc::new(validator),
    );
    build_router(state, &ServerConfig::default())
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, name: &str, email: &str, role: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "correct-horse",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_event(app: &Router, organizer: &str, capacity: i64) -> String {
    let date = (chrono::Utc::now() + chrono::Duration::days(21))
        .format("%Y-%m-%d")
        .to_string();
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/events",
        Some(organizer),
        Some(json!({
            "title": "Rooftop Cinema",
            "description": "Open air screening",
            "location": "Level 12",
            "date": date,
            "startTime": "20:00",
            "endTime": "22:30",
            "capacity": capacity,
            "price": 15,
            "isPublished": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn available(app: &Router, event_id: &str) -> i64 {
    let (status, body) = call(
        app,
        Method::GET,
        &format!("/api/v1/events/event/{event_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["availableTickets"].as_i64().unwrap()
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn register_then_login_then_me() {
    let app = app();
    register(&app, "Grace Hopper", "grace@example.com", "user").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let (status, body) = call(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "grace@example.com");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "Grace Hopper", "grace@example.com", "user").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "wrong-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn admin_role_cannot_be_self_assigned() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "password": "correct-horse",
            "role": "admin",
        })),
    )
    .await;
    assert!(status.is_client_error(), "{status}");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        Some("not.a.jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Booking flow
// =============================================================================

#[tokio::test]
async fn booking_round_trip_moves_inventory() {
    let app = app();
    let organizer = register(&app, "Olu", "olu@example.com", "organizer").await;
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;
    let event_id = create_event(&app, &organizer, 5).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(&attendee),
        Some(json!({ "event": event_id, "ticketCount": 2, "specialRequests": "aisle" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["ticketCount"], 2);
    assert_eq!(body["data"]["specialRequests"], "aisle");
    assert!(body["data"]["bookingReference"]
        .as_str()
        .unwrap()
        .starts_with("BK-"));
    assert_eq!(body["data"]["event"]["id"], event_id.as_str());
    assert_eq!(body["data"]["status"], "confirmed");
    let booking_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(available(&app, &event_id).await, 3);

    let (status, body) = call(&app, Method::GET, "/api/v1/bookings", Some(&attendee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(available(&app, &event_id).await, 5);

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(available(&app, &event_id).await, 5);
}

#[tokio::test]
async fn overbooking_is_a_bad_request() {
    let app = app();
    let organizer = register(&app, "Olu", "olu@example.com", "organizer").await;
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;
    let event_id = create_event(&app, &organizer, 3).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(&attendee),
        Some(json!({ "event": event_id, "ticketCount": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(available(&app, &event_id).await, 3);
}

#[tokio::test]
async fn missing_booking_fields_are_listed() {
    let app = app();
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(&attendee),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"event"));
    assert!(fields.contains(&"ticketCount"));
}

#[tokio::test]
async fn another_users_booking_is_forbidden() {
    let app = app();
    let organizer = register(&app, "Olu", "olu@example.com", "organizer").await;
    let owner = register(&app, "Ada", "ada@example.com", "user").await;
    let stranger = register(&app, "Eve", "eve@example.com", "user").await;
    let event_id = create_event(&app, &organizer, 10).await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(&owner),
        Some(json!({ "event": event_id, "ticketCount": 1 })),
    )
    .await;
    let booking_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/api/v1/bookings/{booking_id}"),
        Some(&stranger),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = app();
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/bookings/not-a-uuid",
        Some(&attendee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = call(&app, Method::GET, "/api/v1/events/event/42", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn attendees_cannot_create_events() {
    let app = app();
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(&attendee),
        Some(json!({ "title": "Nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn event_listing_is_paginated() {
    let app = app();
    let organizer = register(&app, "Olu", "olu@example.com", "organizer").await;
    for _ in 0..3 {
        create_event(&app, &organizer, 10).await;
    }

    let (status, body) = call(&app, Method::GET, "/api/v1/events?page=1&limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["next"]["page"], 2);
}

#[tokio::test]
async fn event_with_bookings_cannot_be_deleted() {
    let app = app();
    let organizer = register(&app, "Olu", "olu@example.com", "organizer").await;
    let attendee = register(&app, "Ada", "ada@example.com", "user").await;
    let event_id = create_event(&app, &organizer, 10).await;

    call(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(&attendee),
        Some(json!({ "event": event_id, "ticketCount": 1 })),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/events/{event_id}"),
        Some(&organizer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/events/{event_id}/inventory"),
        Some(&organizer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["consistent"], true);
    assert_eq!(body["data"]["bookedTickets"], 1);
}
