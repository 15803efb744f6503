use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::engine::StockEngine;
use crate::utils::AppError;

/// Server state - shared handle to every service
///
/// Cheap to clone: every field is either `Copy`-ish config data or an `Arc`
/// (the sqlx pool is internally reference counted).
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Inventory mutation engine (the only write path)
    pub engine: Arc<StockEngine>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let engine = Arc::new(StockEngine::new(pool.clone()));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            engine,
            jwt_service,
        }
    }

    /// Initialize server state:
    ///
    /// 1. Working directory layout
    /// 2. Database pool + migrations
    /// 3. Default account seeding (`admin`, `guest`)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_file();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        db_service.seed_default_users().await?;

        Ok(Self::new(config.clone(), db_service.pool))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }
}
