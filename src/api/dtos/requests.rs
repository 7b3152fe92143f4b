use serde::Deserialize;

use crate::domain::models::user::PlanType;

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email, or phone number when it contains no '@'.
    pub identifier: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan_type: Option<PlanType>,
    pub observation: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub plan_type: Option<PlanType>,
    pub observation: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateModalityRequest {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateModalityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub modality_id: String,
    pub instructor: String,
    pub date: String,
    pub time: String,
    pub duration_min: Option<i32>,
    pub capacity: i32,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub instructor: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration_min: Option<i32>,
    pub capacity: Option<i32>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateSessionsRequest {
    pub modality_id: String,
    pub instructor: String,
    pub category: Option<String>,
    pub capacity: i32,
    pub start_date: String,
    pub times_of_day: Vec<String>,
    pub days_of_week: Vec<u8>,
    pub weeks_to_repeat: u32,
}

#[derive(Deserialize)]
pub struct UpdateReleaseHourRequest {
    pub hour: i64,
}
