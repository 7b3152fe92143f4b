use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{CreateSessionRequest, GenerateSessionsRequest, UpdateSessionRequest};
use crate::api::dtos::responses::{GenerateSessionsResponse, ScheduleEntry};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::session::{ClassSession, NewSessionParams};
use crate::domain::services::policy;
use crate::domain::services::scheduler::{self, RecurrenceSpec};
use crate::error::AppError;
use crate::state::AppState;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::info;

fn parse_local_start(date: &str, time: &str, tz: Tz) -> Result<chrono::DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    tz.from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.modality_repo.find_by_id(&payload.modality_id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;

    let capacity = payload.capacity;
    if capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }

    let start_time = parse_local_start(&payload.date, &payload.time, state.config.timezone())?;

    let session = ClassSession::new(NewSessionParams {
        modality_id: payload.modality_id,
        instructor: payload.instructor,
        start_time,
        duration_min: payload.duration_min.unwrap_or(scheduler::DEFAULT_SESSION_DURATION_MIN),
        capacity,
        category: payload.category,
    });

    let created = state.session_repo.create(&session).await?;
    info!("Created session: {}", created.id);
    Ok(Json(created))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list().await?;
    Ok(Json(sessions))
}

pub async fn update_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if let Some(instructor) = payload.instructor { session.instructor = instructor; }
    if let Some(duration_min) = payload.duration_min {
        if duration_min < 1 {
            return Err(AppError::Validation("Duration must be at least 1 minute".into()));
        }
        session.duration_min = duration_min;
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        session.capacity = capacity;
    }
    if let Some(category) = payload.category {
        session.category = if category.is_empty() { None } else { Some(category) };
    }
    if let (Some(date), Some(time)) = (payload.date, payload.time) {
        session.start_time = parse_local_start(&date, &time, state.config.timezone())?;
    }

    let updated = state.session_repo.update(&session).await?;
    info!("Updated session: {}", updated.id);
    Ok(Json(updated))
}

/// Cancelling a session keeps its booking history: confirmed bookings move to
/// CANCELLED_BY_ADMIN before the session row goes away.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    let cancelled = state.booking_repo
        .cancel_by_session(&id, BookingStatus::CancelledByAdmin)
        .await?;
    state.session_repo.delete(&id).await?;

    info!("Deleted session {}, cancelled {} bookings", id, cancelled);
    Ok(Json(serde_json::json!({"status": "deleted", "bookings_cancelled": cancelled})))
}

pub async fn generate_sessions(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<GenerateSessionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.modality_repo.find_by_id(&payload.modality_id).await?
        .ok_or(AppError::NotFound("Modality not found".into()))?;

    if payload.capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }

    let start_date = NaiveDate::parse_from_str(&payload.start_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start_date format (YYYY-MM-DD)".into()))?;

    let mut times = Vec::with_capacity(payload.times_of_day.len());
    for raw in &payload.times_of_day {
        times.push(
            NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| AppError::Validation(format!("Invalid time format (HH:MM): {}", raw)))?,
        );
    }

    let spec = RecurrenceSpec {
        modality_id: payload.modality_id,
        instructor: payload.instructor,
        category: payload.category,
        capacity: payload.capacity,
        start_date,
        times_of_day: times,
        days_of_week: payload.days_of_week,
        weeks_to_repeat: payload.weeks_to_repeat,
    };

    let sessions = scheduler::expand(&spec, state.config.timezone())?;
    let created = state.session_repo.create_many(&sessions).await?;

    info!("Generated {} sessions for modality {}", created, spec.modality_id);
    Ok(Json(GenerateSessionsResponse { created, sessions }))
}

/// Student browse view: sessions today or tomorrow in the club timezone, today's
/// only while they have not started, annotated with occupancy and lock status.
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.config.timezone();
    let release_hour = state.release_hour();
    let now = Utc::now();
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today + Duration::days(1);

    let sessions = state.session_repo.list().await?;
    let bookings = state.booking_repo.list().await?;

    let mut entries = Vec::new();
    for session in sessions {
        let local_date = session.start_time.with_timezone(&tz).date_naive();

        let browsable = local_date == tomorrow
            || (local_date == today && session.start_time > now);
        if !browsable {
            continue;
        }

        let confirmed = policy::confirmed_count(&bookings, &session.id);
        let already_booked = bookings.iter().any(|b| {
            b.session_id == session.id && b.user_id == claims.sub && b.status.holds_seat()
        });

        entries.push(ScheduleEntry {
            confirmed_count: confirmed,
            occupancy: policy::occupancy_level(confirmed, session.capacity),
            locked: policy::is_locked(&session, now, tz, release_hour),
            already_booked,
            session,
        });
    }

    entries.sort_by_key(|e| e.session.start_time);
    Ok(Json(entries))
}
