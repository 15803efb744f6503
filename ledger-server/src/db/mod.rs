//! Database Module
//!
//! SQLite connection pool, migrations and default account seeding

pub mod repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use shared::models::Role;

use crate::auth::password;
use crate::utils::AppError;

use repository::UserRepository;

/// Embedded migrations, shared between startup and tests
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Accounts seeded on first run if absent
const DEFAULT_USERS: &[(&str, &str, Role)] = &[
    ("admin", "admin123", Role::Admin),
    ("guest", "guest123", Role::Guest),
];

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) a database file with WAL mode, then apply
    /// migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        // busy_timeout: wait up to 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// In-memory database for tests. A single connection that never expires,
    /// otherwise the database vanishes with the idle connection.
    pub async fn connect_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to apply migrations: {e}")))?;

        Ok(Self { pool })
    }

    /// Seed the bootstrap accounts if they do not exist yet.
    /// Passwords are hashed before they ever touch the store.
    pub async fn seed_default_users(&self) -> Result<(), AppError> {
        let users = UserRepository::new(self.pool.clone());

        for (username, password, role) in DEFAULT_USERS {
            if users.find_by_username(username).await?.is_none() {
                let password_hash = password::hash(password)
                    .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;
                users
                    .create(&shared::User {
                        username: username.to_string(),
                        password_hash,
                        role: *role,
                    })
                    .await?;
                tracing::info!(username = %username, role = %role, "Seeded default account");
            }
        }

        Ok(())
    }
}
