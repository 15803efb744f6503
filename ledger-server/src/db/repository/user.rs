//! User Repository

use sqlx::SqlitePool;

use shared::User;

use super::{RepoError, RepoResult};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, role FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, role FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role)
            .execute(&self.pool)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(_) => RepoError::Duplicate(user.username.clone()),
                other => other,
            })?;
        Ok(())
    }

    /// Delete an account; returns whether it existed
    pub async fn delete(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
