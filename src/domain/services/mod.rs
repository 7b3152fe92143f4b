pub mod auth_service;
pub mod policy;
pub mod scheduler;
