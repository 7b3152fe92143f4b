use crate::domain::{models::modality::Modality, ports::ModalityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryModalityRepo {
    modalities: RwLock<Vec<Modality>>,
}

impl MemoryModalityRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModalityRepository for MemoryModalityRepo {
    async fn create(&self, modality: &Modality) -> Result<Modality, AppError> {
        self.modalities.write().unwrap().push(modality.clone());
        Ok(modality.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Modality>, AppError> {
        Ok(self.modalities.read().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Modality>, AppError> {
        let mut modalities = self.modalities.read().unwrap().clone();
        modalities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(modalities)
    }

    async fn update(&self, modality: &Modality) -> Result<Modality, AppError> {
        let mut modalities = self.modalities.write().unwrap();
        let slot = modalities.iter_mut().find(|m| m.id == modality.id)
            .ok_or_else(|| AppError::NotFound("Modality not found".into()))?;
        *slot = modality.clone();
        Ok(modality.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut modalities = self.modalities.write().unwrap();
        let before = modalities.len();
        modalities.retain(|m| m.id != id);
        if modalities.len() == before {
            return Err(AppError::NotFound("Modality not found".into()));
        }
        Ok(())
    }
}
