use crate::domain::ports::Notifier;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

pub struct WebhookNotifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl WebhookNotifier {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct NotificationPayload {
    to_addr: String,
    subject: String,
    body: String,
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let payload = NotificationPayload {
            to_addr: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notification service connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notification service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        Ok(())
    }
}
