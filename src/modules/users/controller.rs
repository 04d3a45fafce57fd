use axum::extract::{Path, Query, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{
    CreateUserDto, CreatedUser, FilterUsersDto, PaginationQuery, UpdateUserDto, User,
};
use crate::modules::users::service::UsersService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Usuario creado exitosamente", body = CreatedUser),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse),
        (status = 409, description = "El correo ya se encuentra registrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<CreatedUser>, AppError> {
    let user = UsersService::verify_and_create(&state.db, dto).await?;
    Ok(ApiResponse::created(user))
}

/// List users, optionally filtered by name, email or creation date
#[utoipa::path(
    get,
    path = "/usuarios",
    params(FilterUsersDto),
    responses(
        (status = 200, description = "Lista de usuarios obtenida exitosamente", body = Vec<User>),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn find_all_by_filters(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(filters): Query<FilterUsersDto>,
) -> Result<ApiResponse<Vec<User>>, AppError> {
    let users = UsersService::find_all_by_filters(&state.db, filters).await?;
    Ok(ApiResponse::ok(users))
}

/// List users by page, limit and sort key
#[utoipa::path(
    get,
    path = "/usuarios/paginado",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Lista de usuarios obtenida exitosamente", body = Vec<User>),
        (status = 400, description = "Paginación u ordenación no válida", body = ErrorResponse),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn find_all_by_pagination(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<PaginationQuery>,
) -> Result<ApiResponse<Vec<User>>, AppError> {
    let users = UsersService::find_all_by_pagination(&state.db, query).await?;
    Ok(ApiResponse::ok(users))
}

/// Data of the user making the request
#[utoipa::path(
    get,
    path = "/usuarios/current",
    responses(
        (status = 200, description = "Usuario actual obtenido exitosamente", body = User),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn find_current(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<User>, AppError> {
    let user = UsersService::find_one(&state.db, auth_user.user_id()).await?;
    Ok(ApiResponse::ok(user))
}

/// Fetch a user by id (admin only)
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = Uuid, Path, description = "ID único del usuario")),
    responses(
        (status = 200, description = "Usuario encontrado", body = User),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn find_one_by_id(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UsersService::find_one(&state.db, id).await?;
    Ok(ApiResponse::ok(user))
}

/// Replace all fields of a user (admin only)
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = Uuid, Path, description = "ID único del usuario a actualizar")),
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "Usuario actualizado correctamente", body = String),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn update_by_id(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let message = UsersService::update(&state.db, id, dto.into()).await?;
    Ok(ApiResponse::ok(message))
}

/// Partially update the requesting user's own record
#[utoipa::path(
    patch,
    path = "/usuarios",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Usuario actualizado correctamente", body = String),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn update_current(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let message = UsersService::update(&state.db, auth_user.user_id(), dto).await?;
    Ok(ApiResponse::ok(message))
}

/// Partially update a user by id (admin only)
#[utoipa::path(
    patch,
    path = "/usuarios/{id}",
    params(("id" = Uuid, Path, description = "ID único del usuario a actualizar")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Usuario actualizado correctamente", body = String),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn update_partial_by_id(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let message = UsersService::update(&state.db, id, dto).await?;
    Ok(ApiResponse::ok(message))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = Uuid, Path, description = "ID único del usuario a eliminar")),
    responses(
        (status = 200, description = "Usuario eliminado exitosamente", body = String),
        (status = 401, description = "Token JWT inválido o faltante", body = ErrorResponse),
        (status = 403, description = "Se requieren permisos de administrador", body = ErrorResponse),
        (status = 404, description = "Usuario no encontrado", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "usuarios"
)]
#[instrument(skip_all)]
pub async fn remove_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let message = UsersService::remove(&state.db, id).await?;
    Ok(ApiResponse::ok(message))
}
