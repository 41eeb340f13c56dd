//! User Repository

use sqlx::SqlitePool;

use super::RepoResult;
use crate::db::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Find user by e-mail
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a new user
    ///
    /// A duplicate e-mail surfaces as [`RepoError::Duplicate`](super::RepoError).
    pub async fn create(&self, name: &str, email: &str, password_hash: &str) -> RepoResult<User> {
        let now = chrono::Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, password_hash, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
