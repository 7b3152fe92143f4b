use crate::domain::{
    models::booking::{Booking, BookingStatus},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_if_capacity(&self, booking: &Booking, capacity: i32) -> Result<Booking, AppError> {
        // Conditional insert: the seat count and the insert happen in one
        // statement, so the capacity invariant holds even under racing writers.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, session_id, user_id, status, booked_at)
             SELECT ?, ?, ?, ?, ?
             WHERE (SELECT COUNT(*) FROM bookings WHERE session_id = ? AND status = 'CONFIRMED') < ?
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.session_id).bind(&booking.user_id)
            .bind(booking.status).bind(booking.booked_at)
            .bind(&booking.session_id).bind(capacity)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("Class is full".into()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY booked_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE session_id = ?")
            .bind(session_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY booked_at ASC")
            .bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_confirmed(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE status = 'CONFIRMED'")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    async fn cancel_by_session(&self, session_id: &str, status: BookingStatus) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = ? WHERE session_id = ? AND status = 'CONFIRMED'"
        )
            .bind(status).bind(session_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
