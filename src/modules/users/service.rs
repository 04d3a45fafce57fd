use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{
    CreateUserDto, CreatedUser, FilterUsersDto, PaginationQuery, UpdateUserDto, User,
    UserWithPassword,
};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Columns returned to callers; the password hash never travels with them.
const SELECTION: &str = "id, name, email, role, created_at, updated_at";

pub struct UsersService;

impl UsersService {
    /// Inserts a record as-is; the password in `dto` must already be hashed.
    #[instrument(skip_all)]
    pub async fn create(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {SELECTION}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.password)
            .bind(dto.role)
            .fetch_one(db)
            .await?;

        Ok(user)
    }

    /// Uniqueness check + hash + create, returning the projection exposed to
    /// admins (no role, no password).
    #[instrument(skip_all)]
    pub async fn verify_and_create(
        db: &PgPool,
        dto: CreateUserDto,
    ) -> Result<CreatedUser, AppError> {
        let hashed = Self::verify_email_and_hash_password(db, &dto.email, &dto.password).await?;
        let user = Self::create(
            db,
            CreateUserDto {
                password: hashed,
                ..dto
            },
        )
        .await?;

        Ok(CreatedUser {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        })
    }

    /// Fails with Conflict when the email is already registered; otherwise
    /// returns the bcrypt hash of `password`.
    #[instrument(skip_all)]
    pub async fn verify_email_and_hash_password(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        if Self::find_one_by_email(db, email).await?.is_some() {
            return Err(AppError::conflict("El correo ya se encuentra registrado"));
        }
        hash_password(password)
    }

    /// Filtered listing: case-insensitive substring on name/email, exact
    /// calendar date on creation, newest first.
    #[instrument(skip_all)]
    pub async fn find_all_by_filters(
        db: &PgPool,
        filters: FilterUsersDto,
    ) -> Result<Vec<User>, AppError> {
        let nombre = filters.nombre.filter(|s| !s.is_empty());
        let correo = filters.correo.filter(|s| !s.is_empty());

        let sql = format!(
            "SELECT {SELECTION} FROM users
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%')
               AND ($3::date IS NULL OR created_at::date = $3)
             ORDER BY created_at DESC"
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(nombre)
            .bind(correo)
            .bind(filters.fecha)
            .fetch_all(db)
            .await?;

        Ok(users)
    }

    /// Paginated listing. One-indexed: page 1 starts at offset 0.
    #[instrument(skip_all)]
    pub async fn find_all_by_pagination(
        db: &PgPool,
        query: PaginationQuery,
    ) -> Result<Vec<User>, AppError> {
        let order = match query.sort.as_str() {
            "nombre" => "name ASC",
            "correo" => "email ASC",
            "fecha" => "created_at ASC",
            _ => {
                return Err(AppError::bad_request(
                    "Ordenación no valida, debe ser: nombre, correo o fecha",
                ));
            }
        };

        if query.page <= 0 {
            return Err(AppError::bad_request(
                "pagina no valida, debe ser mayor que cero",
            ));
        }

        let sql = format!("SELECT {SELECTION} FROM users ORDER BY {order} LIMIT $1 OFFSET $2");

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(query.limit)
            .bind((query.page - 1) * query.limit)
            .fetch_all(db)
            .await?;

        Ok(users)
    }

    #[instrument(skip_all)]
    pub async fn find_one(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {SELECTION} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario no encontrado"))
    }

    #[instrument(skip_all)]
    pub async fn find_one_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {SELECTION} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await?;

        Ok(user)
    }

    /// The only lookup that reads the password hash; used by the auth flow
    /// exclusively.
    #[instrument(skip_all)]
    pub async fn find_for_authentication(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, role, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Partial update; absent fields keep their stored value. An incoming
    /// password is re-hashed before storage.
    #[instrument(skip_all)]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<&'static str, AppError> {
        Self::find_one(db, id).await?;

        let password = dto.password.as_deref().map(hash_password).transpose()?;

        sqlx::query(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                role = COALESCE($5, role),
                updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(dto.name)
        .bind(dto.email)
        .bind(password)
        .bind(dto.role)
        .execute(db)
        .await?;

        Ok("Usuario actualizado correctamente")
    }

    #[instrument(skip_all)]
    pub async fn remove(db: &PgPool, id: Uuid) -> Result<&'static str, AppError> {
        Self::find_one(db, id).await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok("Usuario eliminado correctamente")
    }
}
