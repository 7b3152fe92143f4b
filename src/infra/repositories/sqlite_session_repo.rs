use crate::domain::{models::session::ClassSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteSessionRepo {
    pool: SqlitePool,
}

impl SqliteSessionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepo {
    async fn create(&self, session: &ClassSession) -> Result<ClassSession, AppError> {
        sqlx::query_as::<_, ClassSession>(
            "INSERT INTO class_sessions (id, modality_id, instructor, start_time, duration_min, capacity, category, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&session.id).bind(&session.modality_id).bind(&session.instructor)
            .bind(session.start_time).bind(session.duration_min).bind(session.capacity)
            .bind(&session.category).bind(session.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn create_many(&self, sessions: &[ClassSession]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for session in sessions {
            sqlx::query(
                "INSERT INTO class_sessions (id, modality_id, instructor, start_time, duration_min, capacity, category, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
            )
                .bind(&session.id).bind(&session.modality_id).bind(&session.instructor)
                .bind(session.start_time).bind(session.duration_min).bind(session.capacity)
                .bind(&session.category).bind(session.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(sessions.len())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ClassSession>, AppError> {
        sqlx::query_as::<_, ClassSession>("SELECT * FROM class_sessions WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<ClassSession>, AppError> {
        sqlx::query_as::<_, ClassSession>("SELECT * FROM class_sessions ORDER BY start_time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_modality(&self, modality_id: &str) -> Result<Vec<ClassSession>, AppError> {
        sqlx::query_as::<_, ClassSession>(
            "SELECT * FROM class_sessions WHERE modality_id = ? ORDER BY start_time ASC"
        )
            .bind(modality_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM class_sessions")
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn update(&self, session: &ClassSession) -> Result<ClassSession, AppError> {
        sqlx::query_as::<_, ClassSession>(
            "UPDATE class_sessions SET instructor=?, start_time=?, duration_min=?, capacity=?, category=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&session.instructor).bind(session.start_time).bind(session.duration_min)
            .bind(session.capacity).bind(&session.category).bind(&session.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM class_sessions WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }
        Ok(())
    }
}
