use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use fabriq_core::pagination::{PaginationMeta, PaginationParams};
use fabriq_core::permissions::{Action, Module, ModulePermission, Role};
use fabriq_models::roles::RoleCatalogEntry;
use fabriq_models::users::{
    ChangePasswordDto, CreateUserDto, PaginatedUsersResponse, ResetPasswordDto, UpdateUserDto,
    User, UserStats,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MeResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::change_password,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user_stats,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::reset_password,
        crate::modules::roles::controller::list_roles,
    ),
    components(
        schemas(
            Role,
            Module,
            Action,
            ModulePermission,
            User,
            CreateUserDto,
            UpdateUserDto,
            ResetPasswordDto,
            ChangePasswordDto,
            UserStats,
            PaginatedUsersResponse,
            RoleCatalogEntry,
            LoginRequest,
            LoginResponse,
            MeResponse,
            MessageResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User authentication endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Roles", description = "Role catalog and permission presets")
    ),
    info(
        title = "Fabriq API",
        version = "0.1.0",
        description = "Administrative REST API for the Fabriq manufacturing ERP: users, roles, and module permissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
