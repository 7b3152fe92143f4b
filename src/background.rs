use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info};
use crate::state::AppState;

const SCAN_INTERVAL_SECS: u64 = 60;
const REMINDER_WINDOW_MIN: i64 = 60;

/// Periodic scanner: reminds students of classes starting within the next hour
/// and announces growth in the published schedule. Read-only over booking data;
/// a failed notification is logged and retried on a later tick.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background notification worker...");

    let mut reminded: HashSet<String> = HashSet::new();
    let mut last_session_count: Option<i64> = None;

    loop {
        if let Err(e) = scan_upcoming_bookings(&state, &mut reminded).await {
            error!("Reminder scan failed: {:?}", e);
        }

        match state.session_repo.count().await {
            Ok(count) => {
                if let Some(previous) = last_session_count {
                    if count > previous {
                        let _ = state.notifier.notify(
                            "students",
                            "New classes published",
                            &format!("{} new classes are open for booking", count - previous),
                        ).await;
                        info!("Announced {} new sessions", count - previous);
                    }
                }
                last_session_count = Some(count);
            }
            Err(e) => error!("Session count scan failed: {:?}", e),
        }

        sleep(Duration::from_secs(SCAN_INTERVAL_SECS)).await;
    }
}

async fn scan_upcoming_bookings(
    state: &Arc<AppState>,
    reminded: &mut HashSet<String>,
) -> Result<(), crate::error::AppError> {
    let now = Utc::now();
    let horizon = now + chrono::Duration::minutes(REMINDER_WINDOW_MIN);

    let bookings = state.booking_repo.list_confirmed().await?;

    for booking in bookings {
        if reminded.contains(&booking.id) {
            continue;
        }

        let Some(session) = state.session_repo.find_by_id(&booking.session_id).await? else {
            continue;
        };

        if session.start_time <= now || session.start_time > horizon {
            continue;
        }

        let Some(user) = state.user_repo.find_by_id(&booking.user_id).await? else {
            continue;
        };

        let body = format!(
            "Your {} class with {} runs from {} to {}.",
            session.category.as_deref().unwrap_or("club"),
            session.instructor,
            session.start_time.format("%H:%M"),
            session.end_time().format("%H:%M"),
        );

        match state.notifier.notify(&user.email, "Class starting soon", &body).await {
            Ok(()) => {
                reminded.insert(booking.id.clone());
                info!("Reminder sent for booking {}", booking.id);
            }
            Err(e) => error!("Failed to send reminder for booking {}: {:?}", booking.id, e),
        }
    }

    Ok(())
}
