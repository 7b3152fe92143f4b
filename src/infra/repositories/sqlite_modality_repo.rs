use crate::domain::{models::modality::Modality, ports::ModalityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteModalityRepo {
    pool: SqlitePool,
}

impl SqliteModalityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModalityRepository for SqliteModalityRepo {
    async fn create(&self, modality: &Modality) -> Result<Modality, AppError> {
        sqlx::query_as::<_, Modality>(
            "INSERT INTO modalities (id, name, description, image_url, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&modality.id).bind(&modality.name).bind(&modality.description)
            .bind(&modality.image_url).bind(modality.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Modality>, AppError> {
        sqlx::query_as::<_, Modality>("SELECT * FROM modalities WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Modality>, AppError> {
        sqlx::query_as::<_, Modality>("SELECT * FROM modalities ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, modality: &Modality) -> Result<Modality, AppError> {
        sqlx::query_as::<_, Modality>(
            "UPDATE modalities SET name=?, description=?, image_url=? WHERE id=? RETURNING *"
        )
            .bind(&modality.name).bind(&modality.description).bind(&modality.image_url)
            .bind(&modality.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM modalities WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Modality not found".into()));
        }
        Ok(())
    }
}
