use serde::Serialize;

use crate::domain::models::session::ClassSession;
use crate::domain::services::policy::Occupancy;

/// One bookable session as shown on the student schedule, annotated with live
/// occupancy and release-lock status.
#[derive(Serialize)]
pub struct ScheduleEntry {
    #[serde(flatten)]
    pub session: ClassSession,
    pub confirmed_count: usize,
    pub occupancy: Occupancy,
    pub locked: bool,
    pub already_booked: bool,
}

#[derive(Serialize)]
pub struct GenerateSessionsResponse {
    pub created: usize,
    pub sessions: Vec<ClassSession>,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub booking_release_hour: u8,
}
