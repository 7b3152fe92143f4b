use crate::domain::{models::session::ClassSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemorySessionRepo {
    sessions: RwLock<Vec<ClassSession>>,
}

impl MemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepo {
    async fn create(&self, session: &ClassSession) -> Result<ClassSession, AppError> {
        self.sessions.write().unwrap().push(session.clone());
        Ok(session.clone())
    }

    async fn create_many(&self, sessions: &[ClassSession]) -> Result<usize, AppError> {
        self.sessions.write().unwrap().extend_from_slice(sessions);
        Ok(sessions.len())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ClassSession>, AppError> {
        Ok(self.sessions.read().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<ClassSession>, AppError> {
        let mut sessions = self.sessions.read().unwrap().clone();
        sessions.sort_by_key(|s| s.start_time);
        Ok(sessions)
    }

    async fn list_by_modality(&self, modality_id: &str) -> Result<Vec<ClassSession>, AppError> {
        let mut sessions: Vec<ClassSession> = self.sessions.read().unwrap().iter()
            .filter(|s| s.modality_id == modality_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.start_time);
        Ok(sessions)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.sessions.read().unwrap().len() as i64)
    }

    async fn update(&self, session: &ClassSession) -> Result<ClassSession, AppError> {
        let mut sessions = self.sessions.write().unwrap();
        let slot = sessions.iter_mut().find(|s| s.id == session.id)
            .ok_or_else(|| AppError::NotFound("Session not found".into()))?;
        *slot = session.clone();
        Ok(session.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(AppError::NotFound("Session not found".into()));
        }
        Ok(())
    }
}
