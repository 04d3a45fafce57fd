use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{UserRole, validate_password_strength};

/// Claims embedded in the signed access token.
///
/// `iat` is in epoch milliseconds, `exp` in epoch seconds; the latter drives
/// signature validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenPayload {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Sign-in request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SignInDto {
    #[validate(email(message = "El correo no es valido"))]
    pub email: String,
    #[validate(custom(function = validate_password_strength))]
    pub password: String,
}

/// Sign-up request, shared by user and admin registration.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SignUpDto {
    #[validate(email(message = "El correo no es valido"))]
    pub email: String,
    #[validate(length(max = 150, message = "El nombre supera el limite de 150 caracteres"))]
    pub name: String,
    #[validate(custom(function = validate_password_strength))]
    pub password: String,
}

/// Successful registration or sign-in: the signed token plus its claims.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccessTokenPayload,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}
