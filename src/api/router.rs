use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, booking, health, modality, session, settings, user};
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tower_cookies::CookieManagerLayer;
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))

        // Modalities
        .route("/api/v1/modalities", get(modality::list_modalities).post(modality::create_modality))
        .route("/api/v1/modalities/{id}", get(modality::get_modality).put(modality::update_modality).delete(modality::delete_modality))
        .route("/api/v1/modalities/{id}/image", post(modality::upload_modality_image))

        // Sessions (admin) & student browse
        .route("/api/v1/sessions", get(session::list_sessions).post(session::create_session))
        .route("/api/v1/sessions/generate", post(session::generate_sessions))
        .route("/api/v1/sessions/{id}", put(session::update_session).delete(session::delete_session))
        .route("/api/v1/schedule", get(session::schedule))

        // Bookings
        .route("/api/v1/sessions/{id}/book", post(booking::book_session))
        .route("/api/v1/bookings", get(booking::list_all_bookings))
        .route("/api/v1/bookings/mine", get(booking::my_bookings))
        .route("/api/v1/bookings/{id}/cancel", post(booking::cancel_booking))

        // Students / accounts
        .route("/api/v1/users", get(user::list_users).post(user::register_student))
        .route("/api/v1/users/{id}", put(user::update_user).delete(user::delete_user))
        .route("/api/v1/users/{id}/reset-password", post(user::reset_password))

        // Release configuration
        .route("/api/v1/settings", get(settings::get_settings))
        .route("/api/v1/settings/release-hour", put(settings::update_release_hour))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
