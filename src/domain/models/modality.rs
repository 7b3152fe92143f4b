use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Modality {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Modality {
    pub fn new(name: String, description: String, image_url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            image_url,
            created_at: Utc::now(),
        }
    }
}
