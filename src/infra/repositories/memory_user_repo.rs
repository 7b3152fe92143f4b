use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::RwLock;

/// Local-mode store. Locks are held only for the duration of a Vec scan, never
/// across an await point.
#[derive(Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Resource already exists (duplicate entry)".into()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().unwrap().iter().find(|u| u.phone.as_deref() == Some(phone)).cloned())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.read().unwrap().iter()
            .filter(|u| u.role.is_active())
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().unwrap();
        let slot = users.iter_mut().find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        *slot = user.clone();
        Ok(user.clone())
    }
}
