use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, phone, role, plan_type, observation, must_change_password, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&user.id).bind(&user.name).bind(&user.email).bind(&user.phone)
            .bind(user.role).bind(user.plan_type).bind(&user.observation)
            .bind(user.must_change_password).bind(user.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = ?")
            .bind(phone).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role != 'INACTIVE' ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name=?, email=?, phone=?, role=?, plan_type=?, observation=?, must_change_password=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&user.name).bind(&user.email).bind(&user.phone).bind(user.role)
            .bind(user.plan_type).bind(&user.observation).bind(user.must_change_password)
            .bind(&user.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
