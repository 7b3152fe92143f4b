use crate::domain::{models::auth::Credential, ports::CredentialRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCredentialRepo {
    pool: SqlitePool,
}

impl SqliteCredentialRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepo {
    async fn create(&self, credential: &Credential) -> Result<Credential, AppError> {
        sqlx::query_as::<_, Credential>(
            "INSERT INTO credentials (id, email, password_hash, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&credential.id).bind(&credential.email)
            .bind(&credential.password_hash).bind(credential.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AppError> {
        sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE email = ?")
            .bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE credentials SET password_hash = ? WHERE email = ?")
            .bind(password_hash).bind(email)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Credential not found".into()));
        }
        Ok(())
    }
}
