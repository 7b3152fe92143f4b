use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::user::Role;
use crate::domain::services::policy::{self, BookingDecision, RejectReason};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn book_session(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    let now = Utc::now();
    if session.start_time < now {
        return Err(AppError::Validation("Cannot book a class that already started".into()));
    }

    let bookings = state.booking_repo.list_by_session(&session_id).await?;

    let already_booked = bookings.iter()
        .any(|b| b.user_id == claims.sub && b.status.holds_seat());
    if already_booked {
        return Err(AppError::Conflict("You already have a booking for this class".into()));
    }

    let decision = policy::can_book(
        &session,
        claims.role,
        now,
        state.config.timezone(),
        &bookings,
        state.release_hour(),
    );

    match decision {
        BookingDecision::Reject(RejectReason::Full) => {
            return Err(AppError::Conflict("Class is full".into()));
        }
        BookingDecision::Reject(RejectReason::Locked) => {
            return Err(AppError::Forbidden("Booking window not yet open".into()));
        }
        BookingDecision::Admit => {}
    }

    // The policy check above ran against a snapshot; the repository re-checks
    // capacity atomically at insert time.
    let booking = Booking::new(session_id.clone(), claims.sub.clone());
    let created = match state.booking_repo.create_if_capacity(&booking, session.capacity).await {
        Ok(b) => b,
        Err(e) => {
            warn!("Booking rejected at commit for session {}: {}", session_id, e);
            return Err(e);
        }
    };

    info!("Booking confirmed: {} for session {}", created.id, session_id);
    Ok(Json(created))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::Conflict("Booking is not active".into()));
    }

    // Cancellation is a status transition, never a hard delete, so the
    // reservation history survives for reporting.
    let status = match claims.role {
        Role::Admin => BookingStatus::CancelledByAdmin,
        Role::Teacher | Role::Student => {
            if booking.user_id != claims.sub {
                return Err(AppError::Forbidden("You can only cancel your own bookings".into()));
            }
            BookingStatus::CancelledByStudent
        }
        Role::Inactive => return Err(AppError::Unauthorized),
    };

    let cancelled = state.booking_repo.update_status(&booking_id, status).await?;
    info!("Booking cancelled: {}", cancelled.id);
    Ok(Json(cancelled))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list().await?;
    Ok(Json(bookings))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&claims.sub).await?;
    Ok(Json(bookings))
}
