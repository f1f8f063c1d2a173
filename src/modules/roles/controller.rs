use axum::Json;
use tracing::instrument;

use fabriq_core::errors::AppError;
use fabriq_models::roles::RoleCatalogEntry;

use crate::middleware::access::RequireUserManager;
use crate::modules::auth::controller::ErrorResponse;

/// Role catalog: defaults and editing-grid presets for every role
///
/// The user-management screen seeds its permission grid from the `preset`
/// of the selected role and falls back to `default_modules` /
/// `default_actions` to explain what a user without an explicit map gets.
#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles with defaults and presets", body = Vec<RoleCatalogEntry>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - user management required", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Roles"
)]
#[instrument(skip(_require_manager))]
pub async fn list_roles(
    _require_manager: RequireUserManager,
) -> Result<Json<Vec<RoleCatalogEntry>>, AppError> {
    Ok(Json(RoleCatalogEntry::catalog()))
}
