use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CreateModalityRequest, UpdateModalityRequest};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::modality::Modality;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_modality(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateModalityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Modality name is required".into()));
    }

    let modality = Modality::new(
        payload.name,
        payload.description,
        payload.image_url.unwrap_or_else(|| state.config.placeholder_image_url.clone()),
    );
    let created = state.modality_repo.create(&modality).await?;

    info!("Created modality: {}", created.id);
    Ok(Json(created))
}

pub async fn list_modalities(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let modalities = state.modality_repo.list().await?;
    Ok(Json(modalities))
}

pub async fn get_modality(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let modality = state.modality_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;
    Ok(Json(modality))
}

pub async fn update_modality(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateModalityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut modality = state.modality_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;

    if let Some(name) = payload.name { modality.name = name; }
    if let Some(description) = payload.description { modality.description = description; }
    if let Some(image_url) = payload.image_url { modality.image_url = image_url; }

    let updated = state.modality_repo.update(&modality).await?;
    info!("Updated modality: {}", updated.id);
    Ok(Json(updated))
}

/// Deleting a modality cascades: its sessions are removed and their confirmed
/// bookings transition to CANCELLED_BY_ADMIN, so no dangling references remain.
pub async fn delete_modality(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.modality_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;

    let sessions = state.session_repo.list_by_modality(&id).await?;
    for session in &sessions {
        let cancelled = state.booking_repo
            .cancel_by_session(&session.id, BookingStatus::CancelledByAdmin)
            .await?;
        if cancelled > 0 {
            info!("Cancelled {} bookings of session {}", cancelled, session.id);
        }
        state.session_repo.delete(&session.id).await?;
    }

    state.modality_repo.delete(&id).await?;
    info!("Deleted modality {} and {} sessions", id, sessions.len());

    Ok(Json(serde_json::json!({"status": "deleted", "sessions_removed": sessions.len()})))
}

pub async fn upload_modality_image(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Image body is empty".into()));
    }

    let mut modality = state.modality_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;

    let filename = format!("modality-{}.jpg", modality.id);
    let url = state.image_store.store(&filename, &body).await?;

    modality.image_url = url;
    let updated = state.modality_repo.update(&modality).await?;

    info!("Uploaded cover image for modality: {}", updated.id);
    Ok(Json(updated))
}
