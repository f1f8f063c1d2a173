//! # Fabriq Models
//!
//! Domain models and DTOs for the Fabriq API.
//!
//! - [`users`]: User entity, database row type, and user-management DTOs
//! - [`roles`]: Role catalog DTOs for the permission-editing grid

pub mod roles;
pub mod users;

pub use roles::RoleCatalogEntry;
pub use users::{User, UserRecord};
