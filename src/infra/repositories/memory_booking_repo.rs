use crate::domain::{
    models::booking::{Booking, BookingStatus},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryBookingRepo {
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryBookingRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepo {
    async fn create_if_capacity(&self, booking: &Booking, capacity: i32) -> Result<Booking, AppError> {
        // Count and insert under one write guard so racing callers serialize.
        let mut bookings = self.bookings.write().unwrap();
        let confirmed = bookings.iter()
            .filter(|b| b.session_id == booking.session_id && b.status.holds_seat())
            .count();

        if confirmed >= capacity.max(0) as usize {
            return Err(AppError::Conflict("Class is full".into()));
        }

        bookings.push(booking.clone());
        Ok(booking.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        Ok(self.bookings.read().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        let mut bookings = self.bookings.read().unwrap().clone();
        bookings.sort_by_key(|b| b.booked_at);
        Ok(bookings)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.read().unwrap().iter()
            .filter(|b| b.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let mut bookings: Vec<Booking> = self.bookings.read().unwrap().iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booked_at);
        Ok(bookings)
    }

    async fn list_confirmed(&self) -> Result<Vec<Booking>, AppError> {
        Ok(self.bookings.read().unwrap().iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        let mut bookings = self.bookings.write().unwrap();
        let slot = bookings.iter_mut().find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
        slot.status = status;
        Ok(slot.clone())
    }

    async fn cancel_by_session(&self, session_id: &str, status: BookingStatus) -> Result<u64, AppError> {
        let mut bookings = self.bookings.write().unwrap();
        let mut changed = 0;
        for b in bookings.iter_mut() {
            if b.session_id == session_id && b.status == BookingStatus::Confirmed {
                b.status = status;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
