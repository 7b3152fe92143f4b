use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::user::Role;

/// Login credential, kept separate from the profile row. A credential can outlive
/// its profile (the "zombie account" case) and survives profile reactivation.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Credential {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub must_change_password: bool,
}
