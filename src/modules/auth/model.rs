use fabriq_core::permissions::Module;
use fabriq_models::users::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Login request structure
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Current-user response: the profile plus everything the client needs to
/// gate its UI (visible modules, management flags).
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: User,
    /// Modules the navigation should show, in sidebar order
    pub modules: Vec<Module>,
    pub can_manage_users: bool,
    pub can_access_settings: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
