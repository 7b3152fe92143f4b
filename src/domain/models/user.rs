use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Inactive,
}

impl Role {
    /// Profiles marked INACTIVE are soft-deleted and excluded from active listings.
    pub fn is_active(&self) -> bool {
        match self {
            Role::Admin | Role::Teacher | Role::Student => true,
            Role::Inactive => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum PlanType {
    Monthly,
    Quarterly,
    Annual,
    Trial,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub plan_type: Option<PlanType>,
    pub observation: Option<String>,
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new_student(name: String, email: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            role: Role::Student,
            plan_type: None,
            observation: None,
            must_change_password: true,
            created_at: Utc::now(),
        }
    }

    pub fn new_admin(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone: None,
            role: Role::Admin,
            plan_type: None,
            observation: None,
            must_change_password: false,
            created_at: Utc::now(),
        }
    }
}
