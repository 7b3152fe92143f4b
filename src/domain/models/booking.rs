use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Attended,
    Missed,
    CancelledByStudent,
    CancelledByAdmin,
}

impl BookingStatus {
    /// Only CONFIRMED bookings hold a seat against the session capacity.
    pub fn holds_seat(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(session_id: String, user_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            user_id,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        }
    }
}
