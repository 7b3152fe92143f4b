use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::models::session::{ClassSession, NewSessionParams};
use crate::error::AppError;

pub const DEFAULT_SESSION_DURATION_MIN: i32 = 60;

/// A weekly recurrence pattern. Days of week use 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone)]
pub struct RecurrenceSpec {
    pub modality_id: String,
    pub instructor: String,
    pub category: Option<String>,
    pub capacity: i32,
    pub start_date: NaiveDate,
    pub times_of_day: Vec<NaiveTime>,
    pub days_of_week: Vec<u8>,
    pub weeks_to_repeat: u32,
}

/// Expands a recurrence into concrete session drafts without persisting anything.
/// Emits exactly `weeks * |days| * |times|` sessions, each with the default
/// 60-minute duration. Times are interpreted as wall-clock in the club timezone.
pub fn expand(spec: &RecurrenceSpec, tz: Tz) -> Result<Vec<ClassSession>, AppError> {
    if spec.modality_id.trim().is_empty() {
        return Err(AppError::Validation("modality_id is required".into()));
    }
    if spec.times_of_day.is_empty() {
        return Err(AppError::Validation("at least one time of day is required".into()));
    }
    if spec.days_of_week.is_empty() {
        return Err(AppError::Validation("at least one day of week is required".into()));
    }
    if spec.weeks_to_repeat == 0 {
        return Err(AppError::Validation("weeks_to_repeat must be at least 1".into()));
    }
    if spec.days_of_week.iter().any(|d| *d > 6) {
        return Err(AppError::Validation("day of week must be in 0..=6 (0 = Sunday)".into()));
    }

    let mut times = spec.times_of_day.clone();
    times.sort();
    times.dedup();

    let mut days = spec.days_of_week.clone();
    days.sort();
    days.dedup();

    let mut sessions = Vec::new();

    for offset in 0..(spec.weeks_to_repeat as i64 * 7) {
        let date = spec.start_date + Duration::days(offset);
        let weekday = date.weekday().num_days_from_sunday() as u8;

        if !days.contains(&weekday) {
            continue;
        }

        for time in &times {
            // A wall-clock instant skipped by a DST transition has no local
            // representation; such occurrences are dropped.
            let Some(local) = tz.from_local_datetime(&date.and_time(*time)).earliest() else {
                continue;
            };

            sessions.push(ClassSession::new(NewSessionParams {
                modality_id: spec.modality_id.clone(),
                instructor: spec.instructor.clone(),
                start_time: local.with_timezone(&Utc),
                duration_min: DEFAULT_SESSION_DURATION_MIN,
                capacity: spec.capacity,
                category: spec.category.clone(),
            }));
        }
    }

    Ok(sessions)
}
