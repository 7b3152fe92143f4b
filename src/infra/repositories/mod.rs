pub mod memory_booking_repo;
pub mod memory_credential_repo;
pub mod memory_modality_repo;
pub mod memory_session_repo;
pub mod memory_user_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_credential_repo;
pub mod sqlite_modality_repo;
pub mod sqlite_session_repo;
pub mod sqlite_user_repo;
