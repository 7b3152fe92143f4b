pub mod factory;
pub mod fixtures;
pub mod images;
pub mod notify;
pub mod repositories;
