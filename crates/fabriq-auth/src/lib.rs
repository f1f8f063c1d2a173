//! # Fabriq Auth
//!
//! Authentication types and JWT utilities for the Fabriq API.
//!
//! - [`claims`]: Access token claims carrying the user's role and optional
//!   permission map
//! - [`jwt`]: Token creation and verification

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
