use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::{RegisterStudentRequest, UpdateUserRequest};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::auth::Credential;
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

/// Derived login identity for students registered without an email address.
fn placeholder_email(name: &str, phone: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}.{}@aluno.club.local", slug, digits)
}

pub async fn register_student(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<RegisterStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }

    let email = match payload.email.as_deref() {
        Some(e) if !e.trim().is_empty() => e.trim().to_string(),
        _ => {
            let phone = payload.phone.as_deref().unwrap_or("");
            if phone.trim().is_empty() {
                return Err(AppError::Validation("Either email or phone is required".into()));
            }
            placeholder_email(&payload.name, phone)
        }
    };

    if let Some(existing) = state.user_repo.find_by_email(&email).await? {
        if existing.role.is_active() {
            return Err(AppError::Conflict("A user with this email is already active".into()));
        }

        // Reactivation: the profile comes back as a student with fresh data,
        // the original credential stays untouched.
        let reactivated = User {
            role: Role::Student,
            name: payload.name,
            phone: payload.phone,
            plan_type: payload.plan_type,
            observation: payload.observation,
            ..existing
        };
        let updated = state.user_repo.update(&reactivated).await?;

        info!("Reactivated student: {}", updated.id);
        return Ok(Json(updated));
    }

    if state.credential_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "A credential already exists for this email without a profile. Reset the password or contact support.".into(),
        ));
    }

    let password = payload.password
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.config.default_student_password.clone());
    let hash = state.auth_service.hash_password(&password)?;

    state.credential_repo.create(&Credential::new(email.clone(), hash)).await?;

    let mut student = User::new_student(payload.name, email, payload.phone);
    student.plan_type = payload.plan_type;
    student.observation = payload.observation;
    let created = state.user_repo.create(&student).await?;

    info!("Registered student: {}", created.id);
    Ok(Json(created))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list_active().await?;
    Ok(Json(users))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state.user_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if let Some(name) = payload.name { user.name = name; }
    if let Some(phone) = payload.phone {
        user.phone = if phone.is_empty() { None } else { Some(phone) };
    }
    if payload.plan_type.is_some() { user.plan_type = payload.plan_type; }
    if let Some(observation) = payload.observation {
        user.observation = if observation.is_empty() { None } else { Some(observation) };
    }

    let updated = state.user_repo.update(&user).await?;
    info!("Updated user: {}", updated.id);
    Ok(Json(updated))
}

/// Soft delete: the row survives with role INACTIVE so historical bookings keep
/// resolving, and the same email can be registered again later.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if admin.0.sub == id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    let mut user = state.user_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    user.role = Role::Inactive;
    state.user_repo.update(&user).await?;

    info!("Soft-deleted user: {}", id);
    Ok(Json(serde_json::json!({"status": "deactivated"})))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state.user_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let hash = state.auth_service.hash_password(&state.config.default_student_password)?;

    match state.credential_repo.find_by_email(&user.email).await? {
        Some(_) => state.credential_repo.update_password(&user.email, &hash).await?,
        // Profile without credential: recreate the login so the account works again.
        None => {
            state.credential_repo.create(&Credential::new(user.email.clone(), hash)).await?;
        }
    }

    user.must_change_password = true;
    state.user_repo.update(&user).await?;

    info!("Password reset for user: {}", id);
    Ok(Json(serde_json::json!({"status": "reset"})))
}
