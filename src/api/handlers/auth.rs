use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{ChangePasswordRequest, ForgotPasswordRequest, LoginRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = if payload.identifier.contains('@') {
        state.user_repo.find_by_email(&payload.identifier).await?
    } else {
        state.user_repo.find_by_phone(&payload.identifier).await?
    }
    .ok_or(AppError::Unauthorized)?;

    // Soft-deleted accounts keep their row but cannot sign in.
    if !user.role.is_active() {
        return Err(AppError::Unauthorized);
    }

    let credential = state.credential_repo.find_by_email(&user.email).await?
        .ok_or(AppError::Unauthorized)?;

    if !state.auth_service.verify_password(&credential.password_hash, &payload.password) {
        return Err(AppError::Unauthorized);
    }

    let access_jwt = state.auth_service.issue_token(&user)?;
    set_access_cookie(&cookies, &access_jwt);

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        user: UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        must_change_password: user.must_change_password,
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.new_password.len() < 6 {
        return Err(AppError::Validation("Password must have at least 6 characters".into()));
    }

    let hash = state.auth_service.hash_password(&payload.new_password)?;
    state.credential_repo.update_password(&claims.email, &hash).await?;

    let mut user = state.user_repo.find_by_id(&claims.sub).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    user.must_change_password = false;
    state.user_repo.update(&user).await?;

    info!("Password changed for user: {}", claims.sub);

    Ok(Json(serde_json::json!({"status": "ok"})))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Always answers ok so the endpoint does not leak which emails exist.
    if let Some(user) = state.user_repo.find_by_email(&payload.email).await? {
        let _ = state.notifier.notify(
            &user.email,
            "Password reset requested",
            "A password reset was requested for your club account. An administrator will issue a temporary password.",
        ).await;
        info!("Password reset requested for: {}", user.email);
    }

    Ok(Json(serde_json::json!({"status": "ok"})))
}

fn set_access_cookie(cookies: &Cookies, access: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::hours(12));
    cookies.add(access_c);
}
