use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_sessions::Session;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::csrf::{CSRF_COOKIE_NAME, CSRF_SECRET_SESSION_KEY, generate_secret, generate_token};
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{CsrfTokenResponse, LoginResponse, SignInDto, SignUpDto};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

/// Sign in and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInDto,
    responses(
        (status = 201, description = "Sesión iniciada correctamente", body = LoginResponse),
        (status = 401, description = "Contraseña incorrecta", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInDto>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = AuthService::sign_in(&state.db, &state.jwt_config, dto).await?;
    Ok(ApiResponse::created(response))
}

/// Register a USER-role account
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Usuario registrado correctamente", body = LoginResponse),
        (status = 409, description = "El correo ya se encuentra registrado", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpDto>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = AuthService::sign_up(&state.db, &state.jwt_config, dto).await?;
    Ok(ApiResponse::created(response))
}

/// Register an ADMIN-role account, gated by the environment secret
#[utoipa::path(
    post,
    path = "/auth/admin/{secret}",
    request_body = SignUpDto,
    params(
        ("secret" = String, Path, description = "Clave de entorno para el registro de administradores")
    ),
    responses(
        (status = 201, description = "Administrador registrado correctamente", body = LoginResponse),
        (status = 400, description = "Secret inválido", body = ErrorResponse),
        (status = 401, description = "Secret inválido", body = ErrorResponse),
        (status = 403, description = "Secret inválido", body = ErrorResponse),
        (status = 418, description = "Secret inválido", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register_admin(
    State(state): State<AppState>,
    Path(secret): Path<String>,
    ValidatedJson(dto): ValidatedJson<SignUpDto>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response =
        AuthService::register_admin(&state.db, &state.jwt_config, &state.admin_config, dto, &secret)
            .await?;
    Ok(ApiResponse::created(response))
}

/// Issue a CSRF token bound to the caller's session
#[utoipa::path(
    get,
    path = "/auth/csrf-token",
    responses(
        (status = 200, description = "Token CSRF generado exitosamente", body = CsrfTokenResponse),
        (status = 500, description = "Error generando token CSRF", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn get_csrf_token(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<CsrfTokenResponse>), AppError> {
    let secret: Option<String> = session
        .get(CSRF_SECRET_SESSION_KEY)
        .await
        .map_err(|e| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let secret = match secret {
        Some(secret) => secret,
        None => {
            let secret = generate_secret();
            session
                .insert(CSRF_SECRET_SESSION_KEY, secret.clone())
                .await
                .map_err(|_| AppError::internal("Error generando token CSRF"))?;
            secret
        }
    };

    let token = generate_token(&secret, &state.session_config.secret);

    let cookie = Cookie::build((CSRF_COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.session_config.cookie_secure)
        .build();

    Ok((
        jar.add(cookie),
        ApiResponse::ok(CsrfTokenResponse { csrf_token: token }),
    ))
}
