use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, CredentialRepository, ImageStore, ModalityRepository, Notifier,
    SessionRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub credential_repo: Arc<dyn CredentialRepository>,
    pub modality_repo: Arc<dyn ModalityRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub notifier: Arc<dyn Notifier>,
    pub image_store: Arc<dyn ImageStore>,
    /// Hour of day (0..=23) after which future-day sessions become bookable.
    /// Process memory only; mutated exclusively through the settings endpoint.
    pub release_hour: Arc<AtomicU8>,
}

impl AppState {
    pub fn release_hour(&self) -> u8 {
        self.release_hour.load(std::sync::atomic::Ordering::Relaxed)
    }
}
