//! Middleware modules for request processing.
//!
//! - [`auth`]: JWT validation and the [`auth::AuthUser`] extractor, which
//!   exposes the permission resolver over the token's claims
//! - [`access`]: coarse access gates (user management, Super User)
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. Route-level gates or in-handler checks consult the resolver
//! 4. Handler executes if all checks pass

pub mod access;
pub mod auth;
