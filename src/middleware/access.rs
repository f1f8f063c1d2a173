//! Coarse access gates built on the permission resolver.
//!
//! Two approaches are provided, matching how routes consume them:
//!
//! 1. Layer-based middleware via [`require_user_manager`], applied to the
//!    user-management router as a whole
//! 2. The extractor-based gate [`RequireUserManager`] for individual
//!    handlers (the role catalog)

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use fabriq_core::errors::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Middleware that admits only users who may manage users (Super User or
/// Unit Head).
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected = init_users_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_user_manager));
/// ```
pub async fn require_user_manager(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !auth_user.can_manage_users() {
        return Err(AppError::forbidden(
            "Access denied. User management requires Super User or Unit Head.".to_string(),
        ));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Extractor that admits only users who may manage users.
///
/// ```rust,ignore
/// pub async fn handler(
///     RequireUserManager(auth_user): RequireUserManager,
/// ) -> Result<Json<Response>, AppError> {
///     // Only Super User and Unit Head reach this
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUserManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireUserManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.can_manage_users() {
            return Err(AppError::forbidden(
                "Access denied. User management requires Super User or Unit Head.".to_string(),
            ));
        }

        Ok(RequireUserManager(auth_user))
    }
}

