use crate::domain::{models::auth::Credential, ports::CredentialRepository};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryCredentialRepo {
    credentials: RwLock<Vec<Credential>>,
}

impl MemoryCredentialRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepo {
    async fn create(&self, credential: &Credential) -> Result<Credential, AppError> {
        let mut credentials = self.credentials.write().unwrap();
        if credentials.iter().any(|c| c.email == credential.email) {
            return Err(AppError::Conflict("Resource already exists (duplicate entry)".into()));
        }
        credentials.push(credential.clone());
        Ok(credential.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AppError> {
        Ok(self.credentials.read().unwrap().iter().find(|c| c.email == email).cloned())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AppError> {
        let mut credentials = self.credentials.write().unwrap();
        let slot = credentials.iter_mut().find(|c| c.email == email)
            .ok_or_else(|| AppError::NotFound("Credential not found".into()))?;
        slot.password_hash = password_hash.to_string();
        Ok(())
    }
}
