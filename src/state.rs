use sqlx::PgPool;

use fabriq_config::{CorsConfig, DatabaseConfig, JwtConfig};

use crate::db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    let database_config = DatabaseConfig::from_env();

    AppState {
        db: init_db_pool(&database_config).await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
