pub mod log_notifier;
pub mod webhook_notifier;
