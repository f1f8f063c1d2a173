use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use fabriq_auth::claims::Claims;
use fabriq_auth::jwt::verify_token;
use fabriq_core::errors::AppError;
use fabriq_core::permissions::{self, AccessProfile, Action, Module};

use crate::state::AppState;

/// Extractor that validates the JWT and provides the authenticated user's
/// claims. The claims carry the user's role and optional permission map,
/// so every resolver question can be answered from the token alone.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The resolver input carried by this request's token.
    pub fn profile(&self) -> AccessProfile {
        self.0.access_profile()
    }

    /// Whether the user may see `module` at all.
    pub fn has_module_access(&self, module: Module) -> bool {
        permissions::has_module_access(Some(&self.profile()), module)
    }

    /// Whether the user may perform `action` on `module`.
    pub fn has_permission(&self, module: Module, action: Action) -> bool {
        permissions::has_permission(Some(&self.profile()), module, action)
    }

    /// The modules this user's navigation should show.
    pub fn modules(&self) -> Vec<Module> {
        permissions::user_modules(Some(&self.profile()))
    }

    /// Whether the user may open the user-management screen.
    pub fn can_manage_users(&self) -> bool {
        permissions::can_manage_users(Some(&self.profile()))
    }

    /// Whether the user may open system settings.
    pub fn can_access_settings(&self) -> bool {
        permissions::can_access_settings(Some(&self.profile()))
    }

    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    /// Get the user's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
