use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::requests::UpdateReleaseHourRequest;
use crate::api::dtos::responses::SettingsResponse;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(SettingsResponse {
        booking_release_hour: state.release_hour(),
    }))
}

pub async fn update_release_hour(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<UpdateReleaseHourRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(0..=23).contains(&payload.hour) {
        return Err(AppError::Validation("Release hour must be between 0 and 23".into()));
    }

    state.release_hour.store(payload.hour as u8, Ordering::Relaxed);
    info!("Booking release hour set to {}", payload.hour);

    Ok(Json(SettingsResponse {
        booking_release_hour: payload.hour as u8,
    }))
}
