use crate::domain::ports::ImageStore;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

/// Pushes modality cover images to an external upload service that responds with
/// `{"url": "..."}`.
pub struct HttpImageStore {
    client: Client,
    upload_url: String,
    api_key: String,
}

impl HttpImageStore {
    pub fn new(upload_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            upload_url,
            api_key,
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String, AppError> {
        let res = self.client.post(&self.upload_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Filename", filename)
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Image service connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(msg)
            })?;

        if !res.status().is_success() {
            let msg = format!("Image service failed. Status: {}", res.status());
            error!("{}", msg);
            return Err(AppError::Upstream(msg));
        }

        let body: serde_json::Value = res.json().await
            .map_err(|e| AppError::Upstream(format!("Image service bad response: {}", e)))?;

        body["url"].as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Upstream("Image service response missing url".into()))
    }
}

/// Used when no upload collaborator is configured: every image resolves to the
/// configured placeholder URL.
pub struct PlaceholderImageStore {
    placeholder_url: String,
}

impl PlaceholderImageStore {
    pub fn new(placeholder_url: String) -> Self {
        Self { placeholder_url }
    }
}

#[async_trait]
impl ImageStore for PlaceholderImageStore {
    async fn store(&self, _filename: &str, _data: &[u8]) -> Result<String, AppError> {
        Ok(self.placeholder_url.clone())
    }
}
