use sqlx::PgPool;
use tracing::instrument;

use fabriq_auth::claims::Claims;
use fabriq_auth::jwt::create_access_token;
use fabriq_config::JwtConfig;
use fabriq_core::errors::AppError;
use fabriq_core::password::{hash_password, verify_password};
use fabriq_models::users::{ChangePasswordDto, UserRecord};

use super::model::{LoginRequest, LoginResponse, MeResponse};

const USER_COLUMNS: &str = "id, username, email, password, full_name, role, unit, is_active, \
                            permissions, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &record.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !record.is_active {
            return Err(AppError::unauthorized("Account is disabled".to_string()));
        }

        let user = record.into_user()?;
        let access_token = create_access_token(
            user.id,
            &user.email,
            user.role,
            user.permissions.clone(),
            jwt_config,
        )?;

        Ok(LoginResponse { access_token, user })
    }

    /// Build the current-user response from a fresh database read, so role
    /// or permission edits show up without waiting for a new token.
    #[instrument(skip(db))]
    pub async fn me(db: &PgPool, claims: &Claims) -> Result<MeResponse, AppError> {
        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))?;

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists".to_string()))?;

        let user = record.into_user()?;
        let profile = user.access_profile();

        Ok(MeResponse {
            modules: profile.modules(),
            can_manage_users: profile.can_manage_users(),
            can_access_settings: profile.can_access_settings(),
            user,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        claims: &Claims,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))?;

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists".to_string()))?;

        let is_valid = verify_password(&dto.current_password, &record.password)?;
        if !is_valid {
            return Err(AppError::unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let hashed = hash_password(&dto.new_password)?;
        sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(&hashed)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
