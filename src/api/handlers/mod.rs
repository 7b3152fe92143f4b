pub mod auth;
pub mod booking;
pub mod health;
pub mod modality;
pub mod session;
pub mod settings;
pub mod user;
