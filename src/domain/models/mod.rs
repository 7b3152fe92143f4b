pub mod auth;
pub mod booking;
pub mod modality;
pub mod session;
pub mod user;
