//! User domain models and DTOs.
//!
//! This module contains all data structures related to user management:
//! the API-facing [`User`] entity, the internal [`UserRecord`] row type
//! (which carries the password hash and is never serialized), and the
//! request/response DTOs for the user-management endpoints.

use chrono::{DateTime, Utc};
use fabriq_core::errors::AppError;
use fabriq_core::permissions::{AccessProfile, PermissionMap, Role};
use fabriq_core::serde::deserialize_optional_bool;
use fabriq_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_true() -> bool {
    true
}

/// A user as exposed by the API.
///
/// The password hash stays on [`UserRecord`] and never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    /// Manufacturing unit the user belongs to, e.g. "Unit A - Assembly"
    pub unit: Option<String>,
    pub is_active: bool,
    /// Explicit per-module permission overrides; absent means the role
    /// defaults apply
    #[schema(value_type = Object)]
    pub permissions: Option<PermissionMap>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The resolver input for this user.
    pub fn access_profile(&self) -> AccessProfile {
        AccessProfile {
            role: self.role,
            permissions: self.permissions.clone(),
        }
    }
}

/// A user row as stored in the database.
///
/// `role` is kept as raw text here; [`UserRecord::role_enum`] parses it at
/// the boundary so rows edited out-of-band fail loudly instead of being
/// silently granted a different role's access.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: String,
    pub unit: Option<String>,
    pub is_active: bool,
    pub permissions: Option<Json<PermissionMap>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn role_enum(&self) -> Result<Role, AppError> {
        Role::parse(&self.role).ok_or_else(|| {
            AppError::internal_error(format!(
                "User {} has unrecognized role '{}'",
                self.id, self.role
            ))
        })
    }

    pub fn into_user(self) -> Result<User, AppError> {
        let role = self.role_enum()?;
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            role,
            unit: self.unit,
            is_active: self.is_active,
            permissions: self.permissions.map(|Json(map)| map),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DTO for creating a new user.
///
/// `permissions` is stored exactly as provided: leaving it absent keeps the
/// role defaults in effect, while any provided map (seeded from the role
/// preset by the editing grid) fully overrides them per module.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub unit: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[schema(value_type = Object)]
    pub permissions: Option<PermissionMap>,
}

/// DTO for updating a user.
///
/// Absent fields are left unchanged; `permissions`, when present, replaces
/// the stored map wholesale (the editing grid always submits the full
/// grid). Changing `role` requires Super User.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
    #[schema(value_type = Object)]
    pub permissions: Option<PermissionMap>,
}

/// DTO for the administrative password reset endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordDto {
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[serde(alias = "newPassword")]
    pub new_password: String,
}

/// DTO for self-service password change.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    #[serde(alias = "old_password")]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub new_password: String,
}

/// Query parameters for filtering users.
///
/// `role` and `unit` are matched as stored strings so that filters for
/// values outside the current closed sets return an empty page rather than
/// an error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserFilterParams {
    /// Free-text search over username, email, and full name
    pub search: Option<String>,
    pub role: Option<String>,
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing users.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// Headline counts for the user-management screen.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub super_users: i64,
    pub unit_heads: i64,
}
