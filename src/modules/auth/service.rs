use anyhow::anyhow;
use axum::http::StatusCode;
use rand::Rng;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::admin::AdminConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{CreateUserDto, UserRole};
use crate::modules::users::service::UsersService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginResponse, SignInDto, SignUpDto};

pub struct AuthService;

impl AuthService {
    /// Registers a USER-role account and signs it in.
    #[instrument(skip_all)]
    pub async fn sign_up(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: SignUpDto,
    ) -> Result<LoginResponse, AppError> {
        Self::register(db, jwt_config, dto, UserRole::User).await
    }

    /// Registers an ADMIN-role account, gated by the configured secret.
    #[instrument(skip_all)]
    pub async fn register_admin(
        db: &PgPool,
        jwt_config: &JwtConfig,
        admin_config: &AdminConfig,
        dto: SignUpDto,
        supplied_secret: &str,
    ) -> Result<LoginResponse, AppError> {
        if supplied_secret != admin_config.secret {
            return Err(Self::random_admin_rejection());
        }

        Self::register(db, jwt_config, dto, UserRole::Admin).await
    }

    #[instrument(skip_all)]
    pub async fn sign_in(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: SignInDto,
    ) -> Result<LoginResponse, AppError> {
        let user = UsersService::find_for_authentication(db, &dto.email)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario no encontrado"))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized("La contraseña es incorrecta"));
        }

        Self::login_response(user.id, &user.name, &user.email, user.role, jwt_config)
    }

    async fn register(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: SignUpDto,
        role: UserRole,
    ) -> Result<LoginResponse, AppError> {
        let hashed =
            UsersService::verify_email_and_hash_password(db, &dto.email, &dto.password).await?;

        let user = UsersService::create(
            db,
            CreateUserDto {
                email: dto.email,
                name: dto.name,
                password: hashed,
                role,
            },
        )
        .await?;

        Self::login_response(user.id, &user.name, &user.email, user.role, jwt_config)
    }

    fn login_response(
        id: Uuid,
        name: &str,
        email: &str,
        role: UserRole,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let (token, user) = create_access_token(id, email, name, role, jwt_config)?;
        Ok(LoginResponse { token, user })
    }

    /// One of four error kinds, chosen uniformly. A caller probing the
    /// admin-registration secret cannot tell a wrong secret apart from other
    /// failure classes by status code.
    pub fn random_admin_rejection() -> AppError {
        const KINDS: [StatusCode; 4] = [
            StatusCode::IM_A_TEAPOT,
            StatusCode::UNAUTHORIZED,
            StatusCode::BAD_REQUEST,
            StatusCode::FORBIDDEN,
        ];

        let status = KINDS[rand::thread_rng().gen_range(0..KINDS.len())];
        AppError::new(status, anyhow!(status.canonical_reason().unwrap_or("Error")))
    }
}
