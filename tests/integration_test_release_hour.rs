mod common;

use axum::http::StatusCode;
use chrono::{Duration, Timelike, Utc};
use common::{parse_body, TestApp, DEFAULT_PASSWORD, STUDENT_EMAIL};
use serde_json::json;

async fn create_tomorrow_session(app: &TestApp, admin: &str) -> String {
    let res = app
        .post("/api/v1/modalities", json!({"name": "Yoga", "description": "Vinyasa flow"}), admin)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let modality = parse_body(res).await;

    let date = (Utc::now() + Duration::days(1)).format("%Y-%m-%d").to_string();
    let res = app
        .post(
            "/api/v1/sessions",
            json!({
                "modality_id": modality["id"],
                "instructor": "Ana Beatriz",
                "date": date,
                "time": "19:00",
                "capacity": 10,
            }),
            admin,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let res = app.get("/api/v1/settings", &admin).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["booking_release_hour"], 8);

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 22}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["booking_release_hour"], 22);

    let res = app.get("/api/v1/settings", &admin).await;
    assert_eq!(parse_body(res).await["booking_release_hour"], 22);
}

#[tokio::test]
async fn test_release_hour_must_be_a_valid_hour() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 24}), &admin).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": -1}), &admin).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Rejected values leave the setting untouched.
    let res = app.get("/api/v1/settings", &admin).await;
    assert_eq!(parse_body(res).await["booking_release_hour"], 8);
}

#[tokio::test]
async fn test_settings_update_requires_admin() {
    let app = TestApp::new().await;
    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 0}), &student).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_release_hour_zero_opens_next_day_booking() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let session_id = create_tomorrow_session(&app, &admin).await;

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 0}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &student).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_next_day_booking_gated_by_release_hour() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let session_id = create_tomorrow_session(&app, &admin).await;
    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;

    // The window opens at the release hour, so against the current clock the
    // outcome flips depending on which side of 23:00 we are on.
    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 23}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &student).await;
    if Utc::now().hour() < 23 {
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = parse_body(res).await;
        assert_eq!(body["error"], "Booking window not yet open");
    } else {
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_admin_bookings_ignore_release_hour() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let session_id = create_tomorrow_session(&app, &admin).await;

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 23}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_schedule_reports_lock_state() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let session_id = create_tomorrow_session(&app, &admin).await;

    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 23}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.get("/api/v1/schedule", &student).await;
    assert_eq!(res.status(), StatusCode::OK);
    let entries = parse_body(res).await;
    let entry = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == session_id.as_str())
        .expect("session missing from schedule");

    let expected_locked = Utc::now().hour() < 23;
    assert_eq!(entry["locked"], expected_locked);
    assert_eq!(entry["already_booked"], false);
    assert_eq!(entry["confirmed_count"], 0);
}
