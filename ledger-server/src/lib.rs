//! Stockroom Ledger Server
//!
//! Backend for a small-business inventory tracker. All writes go through the
//! mutation engine — stock-in, stock-out, return and delete are the only
//! write primitives, so the quantity invariants are enforced in one place.
//!
//! # Module structure
//!
//! ```text
//! ledger-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── auth/      # JWT authentication, role gating
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── engine/    # inventory mutation engine (the write path)
//! ├── reporting/ # pure read-side aggregation
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod engine;
pub mod reporting;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use engine::StockEngine;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging. Call once at startup.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   _____ __             __
  / ___// /_____  _____/ /______  ____  ____  ____ ___
  \__ \/ __/ __ \/ ___/ //_/ __ \/ __ \/ __ \/ __ `__ \
 ___/ / /_/ /_/ / /__/ ,< / /_/ / /_/ / /_/ / / / / / /
/____/\__/\____/\___/_/|_|\____/\____/\____/_/ /_/ /_/
    "#
    );
}
