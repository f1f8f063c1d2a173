//! Database connection pool initialization.
//!
//! # Panics
//!
//! [`init_db_pool`] panics when the database connection cannot be
//! established; there is nothing useful the server can do without one.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use fabriq_config::DatabaseConfig;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and lives in the application
/// state for use by request handlers.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}
