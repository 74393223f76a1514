use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::CreateUserRequest;
use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, display_name, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn create(&self, req: &CreateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, display_name)
            VALUES ($1, $2)
            RETURNING user_id, username, display_name, created_at
            "#,
        )
        .bind(&req.username)
        .bind(&req.display_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Username already taken"))?;

        Ok(user)
    }

    /// Every user id, oldest account first
    pub async fn list_ids(&self) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM users
            ORDER BY created_at, user_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
