use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::domain::models::booking::Booking;
use crate::domain::models::session::ClassSession;
use crate::domain::models::user::Role;

/// Outcome of a booking admission check. The engine classifies, it never errors:
/// FULL and LOCKED are expected business conditions, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDecision {
    Admit,
    Reject(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Full,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occupancy {
    Low,
    NearFull,
    Full,
}

pub fn confirmed_count(bookings: &[Booking], session_id: &str) -> usize {
    bookings
        .iter()
        .filter(|b| b.session_id == session_id && b.status.holds_seat())
        .count()
}

/// Release-hour gate. A future-day session is locked for students until the local
/// clock reaches the release hour; same-day sessions are never locked. The boundary
/// is strict: at exactly `release_hour:00` the lock lifts.
pub fn is_locked(session: &ClassSession, now: DateTime<Utc>, tz: Tz, release_hour: u8) -> bool {
    let now_local = now.with_timezone(&tz);
    let session_date = session.start_time.with_timezone(&tz).date_naive();

    session_date > now_local.date_naive() && now_local.hour() < release_hour as u32
}

/// Decides a reservation attempt against a snapshot of bookings. This is a UX-level
/// check; the repository re-enforces capacity atomically at commit time, since two
/// callers may race on the same snapshot.
pub fn can_book(
    session: &ClassSession,
    role: Role,
    now: DateTime<Utc>,
    tz: Tz,
    bookings: &[Booking],
    release_hour: u8,
) -> BookingDecision {
    let confirmed = confirmed_count(bookings, &session.id);

    if confirmed >= session.capacity.max(0) as usize {
        return BookingDecision::Reject(RejectReason::Full);
    }

    if role == Role::Student && is_locked(session, now, tz, release_hour) {
        return BookingDecision::Reject(RejectReason::Locked);
    }

    BookingDecision::Admit
}

pub fn occupancy_level(confirmed: usize, capacity: i32) -> Occupancy {
    if capacity <= 0 {
        return Occupancy::Full;
    }

    let ratio = confirmed as f64 / capacity as f64;
    if ratio >= 1.0 {
        Occupancy::Full
    } else if ratio >= 0.8 {
        Occupancy::NearFull
    } else {
        Occupancy::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::BookingStatus;
    use crate::domain::models::session::NewSessionParams;
    use chrono::TimeZone;

    fn session_at(start: DateTime<Utc>, capacity: i32) -> ClassSession {
        ClassSession::new(NewSessionParams {
            modality_id: "m1".into(),
            instructor: "Carla".into(),
            start_time: start,
            duration_min: 60,
            capacity,
            category: None,
        })
    }

    fn confirmed_booking(session_id: &str) -> Booking {
        Booking::new(session_id.into(), uuid::Uuid::new_v4().to_string())
    }

    #[test]
    fn tomorrow_session_locked_before_release_hour() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 7, 59, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 11, 18, 0, 0).unwrap();
        let session = session_at(start, 10);

        assert!(is_locked(&session, now, chrono_tz::UTC, 8));
        assert_eq!(
            can_book(&session, Role::Student, now, chrono_tz::UTC, &[], 8),
            BookingDecision::Reject(RejectReason::Locked)
        );
    }

    #[test]
    fn lock_lifts_at_exactly_the_release_hour() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 11, 18, 0, 0).unwrap();
        let session = session_at(start, 10);

        assert!(!is_locked(&session, now, chrono_tz::UTC, 8));
        assert_eq!(
            can_book(&session, Role::Student, now, chrono_tz::UTC, &[], 8),
            BookingDecision::Admit
        );
    }

    #[test]
    fn same_day_session_never_locked() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 5, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 22, 0, 0).unwrap();
        let session = session_at(start, 10);

        assert!(!is_locked(&session, now, chrono_tz::UTC, 8));
    }

    #[test]
    fn lock_applies_to_students_only() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 11, 18, 0, 0).unwrap();
        let session = session_at(start, 10);

        assert_eq!(
            can_book(&session, Role::Admin, now, chrono_tz::UTC, &[], 8),
            BookingDecision::Admit
        );
        assert_eq!(
            can_book(&session, Role::Teacher, now, chrono_tz::UTC, &[], 8),
            BookingDecision::Admit
        );
    }

    #[test]
    fn day_boundary_uses_local_calendar_date() {
        // 02:00 UTC on the 11th is 23:00 on the 10th in Sao Paulo (UTC-3),
        // so by local calendar date this is a same-day session.
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 23, 30, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 11, 2, 0, 0).unwrap();
        let session = session_at(start, 10);

        assert!(!is_locked(&session, now, tz, 8));
    }

    #[test]
    fn full_session_rejected_before_lock_check() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 5, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 11, 18, 0, 0).unwrap();
        let session = session_at(start, 1);
        let bookings = vec![confirmed_booking(&session.id)];

        assert_eq!(
            can_book(&session, Role::Student, now, chrono_tz::UTC, &bookings, 8),
            BookingDecision::Reject(RejectReason::Full)
        );
    }

    #[test]
    fn cancelled_bookings_do_not_count_against_capacity() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap();
        let session = session_at(start, 1);

        let mut cancelled = confirmed_booking(&session.id);
        cancelled.status = BookingStatus::CancelledByStudent;

        assert_eq!(confirmed_count(&[cancelled.clone()], &session.id), 0);
        assert_eq!(
            can_book(&session, Role::Student, now, chrono_tz::UTC, &[cancelled], 8),
            BookingDecision::Admit
        );
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap();
        let session = session_at(start, 0);

        assert_eq!(
            can_book(&session, Role::Student, now, chrono_tz::UTC, &[], 8),
            BookingDecision::Reject(RejectReason::Full)
        );
    }

    #[test]
    fn occupancy_thresholds() {
        assert_eq!(occupancy_level(0, 10), Occupancy::Low);
        assert_eq!(occupancy_level(7, 10), Occupancy::Low);
        assert_eq!(occupancy_level(8, 10), Occupancy::NearFull);
        assert_eq!(occupancy_level(9, 10), Occupancy::NearFull);
        assert_eq!(occupancy_level(10, 10), Occupancy::Full);
        assert_eq!(occupancy_level(11, 10), Occupancy::Full);
        assert_eq!(occupancy_level(0, 0), Occupancy::Full);
    }
}
