use crate::domain::ports::Notifier;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::info;

/// Local-mode notifier: nothing leaves the process, deliveries show up in the log.
#[derive(Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        info!(recipient, subject, body, "notification (local mode)");
        Ok(())
    }
}
