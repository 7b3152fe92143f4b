use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ClassSession {
    pub id: String,
    pub modality_id: String,
    pub instructor: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub capacity: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewSessionParams {
    pub modality_id: String,
    pub instructor: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i32,
    pub capacity: i32,
    pub category: Option<String>,
}

impl ClassSession {
    pub fn new(params: NewSessionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            modality_id: params.modality_id,
            instructor: params.instructor,
            start_time: params.start_time,
            duration_min: params.duration_min,
            capacity: params.capacity,
            category: params.category,
            created_at: Utc::now(),
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + chrono::Duration::minutes(self.duration_min as i64)
    }
}
