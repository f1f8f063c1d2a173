//! JWT claim structures for authentication tokens.

use fabriq_core::permissions::{AccessProfile, PermissionMap, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// The claims embed the user's role and, when an administrator has set one,
/// the explicit permission map, so every permission decision during a
/// request resolves from the token alone without a database lookup. Edits
/// to a user's role or map take effect when the user's next token is
/// issued.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role`: The user's role
/// - `permissions`: Explicit permission map, if one is set
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// The user's role
    pub role: Role,
    /// Explicit per-module permission overrides, absent for role defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub permissions: Option<PermissionMap>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The resolver input carried by this token.
    pub fn access_profile(&self) -> AccessProfile {
        AccessProfile {
            role: self.role,
            permissions: self.permissions.clone(),
        }
    }
}
