use crate::domain::models::{
    auth::Credential,
    booking::{Booking, BookingStatus},
    modality::Modality,
    session::ClassSession,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError>;
    /// Profiles whose role is not INACTIVE.
    async fn list_active(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn create(&self, credential: &Credential) -> Result<Credential, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AppError>;
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ModalityRepository: Send + Sync {
    async fn create(&self, modality: &Modality) -> Result<Modality, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Modality>, AppError>;
    async fn list(&self) -> Result<Vec<Modality>, AppError>;
    async fn update(&self, modality: &Modality) -> Result<Modality, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &ClassSession) -> Result<ClassSession, AppError>;
    async fn create_many(&self, sessions: &[ClassSession]) -> Result<usize, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ClassSession>, AppError>;
    async fn list(&self) -> Result<Vec<ClassSession>, AppError>;
    async fn list_by_modality(&self, modality_id: &str) -> Result<Vec<ClassSession>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update(&self, session: &ClassSession) -> Result<ClassSession, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking only if the session still has a free seat. This is the
    /// authoritative capacity check: the count and the insert are atomic, so two
    /// racing callers can never both take the last seat.
    async fn create_if_capacity(&self, booking: &Booking, capacity: i32) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_confirmed(&self) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
    /// Cancels every CONFIRMED booking of a session, returning how many changed.
    async fn cancel_by_session(&self, session_id: &str, status: BookingStatus) -> Result<u64, AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores a blob and returns a public URL for it.
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String, AppError>;
}
