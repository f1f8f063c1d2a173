use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use fabriq_core::errors::AppError;
use fabriq_core::pagination::PaginationMeta;
use fabriq_core::password::hash_password;
use fabriq_core::permissions::{AccessProfile, Role};
use fabriq_models::users::{
    CreateUserDto, PaginatedUsersResponse, ResetPasswordDto, UpdateUserDto, User, UserFilterParams,
    UserRecord, UserStats,
};

const USER_COLUMNS: &str = "id, username, email, password, full_name, role, unit, is_active, \
                            permissions, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::new();
        let mut params = Vec::new();

        if let Some(search) = &filters.search
            && !search.is_empty()
        {
            params.push(format!("%{}%", search));
            let n = params.len();
            where_clause.push_str(&format!(
                " AND (username ILIKE ${n} OR email ILIKE ${n} OR full_name ILIKE ${n})"
            ));
        }
        if let Some(role) = &filters.role
            && !role.is_empty()
        {
            params.push(role.clone());
            where_clause.push_str(&format!(" AND role = ${}", params.len()));
        }
        if let Some(unit) = &filters.unit
            && !unit.is_empty()
        {
            params.push(unit.clone());
            where_clause.push_str(&format!(" AND unit = ${}", params.len()));
        }
        if let Some(active) = filters.is_active {
            where_clause.push_str(&format!(" AND is_active = {}", active));
        }

        let count_query = format!("SELECT COUNT(*) FROM users WHERE 1=1{}", where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {} FROM users WHERE 1=1{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            USER_COLUMNS, where_clause, limit, offset
        );
        let mut data_sql = sqlx::query_as::<_, UserRecord>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let records = data_sql.fetch_all(db).await?;

        let users = records
            .into_iter()
            .map(UserRecord::into_user)
            .collect::<Result<Vec<_>, _>>()?;

        let has_more = offset + limit < total;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: filters.pagination.page(),
                has_more,
            },
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"INSERT INTO users (username, email, password, full_name, role, unit, is_active, permissions)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.full_name)
        .bind(dto.role.as_str())
        .bind(&dto.unit)
        .bind(dto.is_active)
        .bind(dto.permissions.map(Json))
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A user with this username or email already exists"
                ));
            }
            AppError::from(e)
        })?;

        record.into_user()
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", id)))?;

        record.into_user()
    }

    /// Update a user. Role changes are an explicit Super User action; every
    /// other field may be edited by any user manager. A provided
    /// `permissions` map replaces the stored one wholesale.
    #[instrument(skip(db, dto, acting))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
        acting: &AccessProfile,
    ) -> Result<User, AppError> {
        let current = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User with id {} not found", id)))?;

        let current_role = current.role_enum()?;
        let role = dto.role.unwrap_or(current_role);
        if role != current_role && acting.role != Role::SuperUser {
            return Err(AppError::forbidden(
                "Only a Super User can change user roles.".to_string(),
            ));
        }

        let username = dto.username.unwrap_or(current.username);
        let email = dto.email.unwrap_or(current.email);
        let full_name = dto.full_name.or(current.full_name);
        let unit = dto.unit.or(current.unit);
        let is_active = dto.is_active.unwrap_or(current.is_active);
        let permissions = dto.permissions.map(Json).or(current.permissions);

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"UPDATE users
               SET username = $1, email = $2, full_name = $3, role = $4, unit = $5,
                   is_active = $6, permissions = $7, updated_at = now()
               WHERE id = $8
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&username)
        .bind(&email)
        .bind(&full_name)
        .bind(role.as_str())
        .bind(&unit)
        .bind(is_active)
        .bind(&permissions)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A user with this username or email already exists"
                ));
            }
            AppError::from(e)
        })?;

        record.into_user()
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "User with id {} not found",
                id
            )));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn reset_password(
        db: &PgPool,
        id: Uuid,
        dto: ResetPasswordDto,
    ) -> Result<(), AppError> {
        let hashed = hash_password(&dto.new_password)?;

        let result = sqlx::query("UPDATE users SET password = $1, updated_at = now() WHERE id = $2")
            .bind(&hashed)
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "User with id {} not found",
                id
            )));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn user_stats(db: &PgPool) -> Result<UserStats, AppError> {
        let (total, active, super_users, unit_heads) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE is_active),
                    COUNT(*) FILTER (WHERE role = 'Super User'),
                    COUNT(*) FILTER (WHERE role = 'Unit Head')
                   FROM users"#,
            )
            .fetch_one(db)
            .await?;

        Ok(UserStats {
            total,
            active,
            super_users,
            unit_heads,
        })
    }
}
