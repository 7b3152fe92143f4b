mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp, DEFAULT_PASSWORD, STUDENT_EMAIL};
use serde_json::json;

async fn create_modality(app: &TestApp, admin: &str, name: &str) -> String {
    let res = app
        .post("/api/v1/modalities", json!({"name": name, "description": "Group class"}), admin)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn create_session_at(
    app: &TestApp,
    admin: &str,
    modality_id: &str,
    day_offset: i64,
    time: &str,
    capacity: i32,
) -> String {
    let date = (Utc::now() + Duration::days(day_offset)).format("%Y-%m-%d").to_string();
    let res = app
        .post(
            "/api/v1/sessions",
            json!({
                "modality_id": modality_id,
                "instructor": "Paulo Nunes",
                "date": date,
                "time": time,
                "capacity": capacity,
            }),
            admin,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_schedule_shows_only_today_and_tomorrow() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let modality_id = create_modality(&app, &admin, "Functional").await;

    let tomorrow_id = create_session_at(&app, &admin, &modality_id, 1, "10:00", 10).await;
    let far_id = create_session_at(&app, &admin, &modality_id, 3, "10:00", 10).await;
    let past_id = create_session_at(&app, &admin, &modality_id, -1, "10:00", 10).await;

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.get("/api/v1/schedule", &student).await;
    assert_eq!(res.status(), StatusCode::OK);
    let entries = parse_body(res).await;
    let ids: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();

    assert!(ids.contains(&tomorrow_id.as_str()));
    assert!(!ids.contains(&far_id.as_str()));
    assert!(!ids.contains(&past_id.as_str()));
}

#[tokio::test]
async fn test_schedule_annotates_occupancy_and_own_booking() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 0}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let modality_id = create_modality(&app, &admin, "Crossfit").await;
    let session_id = create_session_at(&app, &admin, &modality_id, 1, "11:00", 1).await;

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &student).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/v1/schedule", &student).await;
    let entries = parse_body(res).await;
    let entry = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == session_id.as_str())
        .expect("session missing from schedule");

    assert_eq!(entry["confirmed_count"], 1);
    assert_eq!(entry["occupancy"], "FULL");
    assert_eq!(entry["already_booked"], true);
}

#[tokio::test]
async fn test_generate_sessions_expands_recurrence() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let modality_id = create_modality(&app, &admin, "Swimming Kids").await;

    // 4 weeks x {Mon, Wed} x {07:00, 18:00} = 16 sessions.
    let res = app
        .post(
            "/api/v1/sessions/generate",
            json!({
                "modality_id": modality_id,
                "instructor": "Carla Mendes",
                "category": "Infantil",
                "capacity": 8,
                "start_date": "2026-03-02",
                "times_of_day": ["07:00", "18:00"],
                "days_of_week": [1, 3],
                "weeks_to_repeat": 4,
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["created"], 16);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 16);

    for session in body["sessions"].as_array().unwrap() {
        assert_eq!(session["capacity"], 8);
        assert_eq!(session["category"], "Infantil");
        assert_eq!(session["duration_min"], 60);
    }
}

#[tokio::test]
async fn test_generate_rejects_empty_recurrence() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let modality_id = create_modality(&app, &admin, "Judo").await;

    let res = app
        .post(
            "/api/v1/sessions/generate",
            json!({
                "modality_id": modality_id,
                "instructor": "Carla Mendes",
                "capacity": 8,
                "start_date": "2026-03-02",
                "times_of_day": [],
                "days_of_week": [1],
                "weeks_to_repeat": 4,
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_unknown_modality_not_found() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let res = app
        .post(
            "/api/v1/sessions/generate",
            json!({
                "modality_id": "missing",
                "instructor": "Carla Mendes",
                "capacity": 8,
                "start_date": "2026-03-02",
                "times_of_day": ["07:00"],
                "days_of_week": [1],
                "weeks_to_repeat": 1,
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_management_requires_admin() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let modality_id = create_modality(&app, &admin, "Volley").await;

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let date = (Utc::now() + Duration::days(1)).format("%Y-%m-%d").to_string();
    let res = app
        .post(
            "/api/v1/sessions",
            json!({
                "modality_id": modality_id,
                "instructor": "Paulo Nunes",
                "date": date,
                "time": "10:00",
                "capacity": 10,
            }),
            &student,
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.post("/api/v1/modalities", json!({"name": "X", "description": "Y"}), &student).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_session_cancels_its_bookings() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 0}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let modality_id = create_modality(&app, &admin, "Running Club").await;
    let session_id = create_session_at(&app, &admin, &modality_id, 1, "06:00", 10).await;

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &student).await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.delete(&format!("/api/v1/sessions/{}", session_id), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["bookings_cancelled"], 1);

    let res = app.get("/api/v1/bookings/mine", &student).await;
    let mine = parse_body(res).await;
    let booking = mine
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == booking_id.as_str())
        .expect("booking history lost");
    assert_eq!(booking["status"], "CANCELLED_BY_ADMIN");
}

#[tokio::test]
async fn test_delete_modality_cascades_to_sessions_and_bookings() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    let res = app.put("/api/v1/settings/release-hour", json!({"hour": 0}), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    let modality_id = create_modality(&app, &admin, "Squash").await;
    let session_id = create_session_at(&app, &admin, &modality_id, 1, "15:00", 10).await;

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.post(&format!("/api/v1/sessions/{}/book", session_id), json!({}), &student).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.delete(&format!("/api/v1/modalities/{}", modality_id), &admin).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Session gone from the browse view, booking kept as cancelled history.
    let res = app.get("/api/v1/schedule", &student).await;
    let entries = parse_body(res).await;
    assert!(!entries.as_array().unwrap().iter().any(|e| e["id"] == session_id.as_str()));

    let res = app.get("/api/v1/bookings/mine", &student).await;
    let mine = parse_body(res).await;
    let booking = mine
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["session_id"] == session_id.as_str())
        .expect("booking history lost");
    assert_eq!(booking["status"], "CANCELLED_BY_ADMIN");
}

#[tokio::test]
async fn test_modality_crud() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let res = app
        .post("/api/v1/modalities", json!({"name": "Tennis", "description": "Clay courts"}), &admin)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let modality = parse_body(res).await;
    let id = modality["id"].as_str().unwrap().to_string();
    assert_eq!(modality["name"], "Tennis");

    let res = app
        .put(&format!("/api/v1/modalities/{}", id), json!({"description": "Hard courts"}), &admin)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["description"], "Hard courts");

    let student = app.login(STUDENT_EMAIL, DEFAULT_PASSWORD).await;
    let res = app.get(&format!("/api/v1/modalities/{}", id), &student).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/v1/modalities", &student).await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed = parse_body(res).await;
    assert!(listed.as_array().unwrap().iter().any(|m| m["id"] == id.as_str()));
}
