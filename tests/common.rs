#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use club_backend::api::router::create_router;
use club_backend::config::Config;
use club_backend::infra::factory::bootstrap_state;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@club.local";
pub const STUDENT_EMAIL: &str = "student@club.local";
pub const DEFAULT_PASSWORD: &str = "mudar@123";

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Boots the app in local in-memory mode: seeded admin + demo fixtures,
    /// no database, no network.
    pub async fn new() -> Self {
        let config = Config {
            database_url: None,
            port: 0,
            jwt_secret: "test-secret".into(),
            auth_issuer: "https://api.club.local".into(),
            club_timezone: "UTC".into(),
            booking_release_hour: 8,
            admin_email: ADMIN_EMAIL.into(),
            admin_password: DEFAULT_PASSWORD.into(),
            default_student_password: DEFAULT_PASSWORD.into(),
            notify_url: None,
            notify_token: "test-token-1".into(),
            image_upload_url: None,
            placeholder_image_url: "https://placehold.co/600x400".into(),
        };

        let state = bootstrap_state(&config).await;
        Self { router: create_router(Arc::new(state)) }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(value) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> Response {
        self.request("GET", uri, None, Some(cookie)).await
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: &str) -> Response {
        self.request("POST", uri, Some(body), Some(cookie)).await
    }

    pub async fn put(&self, uri: &str, body: Value, cookie: &str) -> Response {
        self.request("PUT", uri, Some(body), Some(cookie)).await
    }

    pub async fn delete(&self, uri: &str, cookie: &str) -> Response {
        self.request("DELETE", uri, None, Some(cookie)).await
    }

    /// Logs in and returns the access-token cookie pair for later requests.
    pub async fn login(&self, identifier: &str, password: &str) -> String {
        let res = self
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(json!({"identifier": identifier, "password": password})),
                None,
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK, "login failed for {}", identifier);

        res.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("access_token="))
            .map(|v| v.split(';').next().unwrap().to_string())
            .expect("login response missing access_token cookie")
    }

    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_EMAIL, DEFAULT_PASSWORD).await
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
