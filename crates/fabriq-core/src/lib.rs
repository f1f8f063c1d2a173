//! # Fabriq Core
//!
//! Core types, errors, and utilities for the Fabriq API.
//!
//! This crate provides foundational types used throughout the Fabriq
//! application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Secure password hashing and verification
//! - [`permissions`]: Role and module based permission resolution
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use fabriq_core::errors::AppError;
//! use fabriq_core::permissions::{AccessProfile, Action, Module, Role};
//!
//! let profile = AccessProfile::new(Role::Production);
//! if profile.has_permission(Module::Inventory, Action::Edit) {
//!     // Allow the edit
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use permissions::{AccessProfile, Action, Module, ModulePermission, PermissionMap, Role};
