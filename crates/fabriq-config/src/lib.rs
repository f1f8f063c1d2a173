//! Configuration for the Fabriq API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with development defaults. Call `from_env()` once
//! at startup (after `dotenvy::dotenv()`) and keep the values in the
//! application state.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`
//! - `JWT_SECRET`, `JWT_ACCESS_EXPIRY`
//! - `ALLOWED_ORIGINS`
//! - `HOST`, `PORT`

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
