//! User data models and DTOs.
//!
//! # Core types
//!
//! - [`User`] - user entity as returned to callers (never carries the hash)
//! - [`UserWithPassword`] - authentication-only lookup row
//! - [`CreatedUser`] - projection returned by admin user creation
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] / [`UpdateUserDto`] - create and (partial) update
//! - [`FilterUsersDto`] - optional name/email/date filters
//! - [`PaginationQuery`] - page, limit and sort key

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// System role stored as text (`USER` / `ADMIN`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

/// A user as persisted and returned to callers.
///
/// The password hash is intentionally absent; the only path that reads it is
/// the authentication lookup below.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Authentication-only row including the bcrypt hash. Never serialized.
#[derive(FromRow, Debug, Clone)]
pub struct UserWithPassword {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}

/// Projection returned after an admin creates a user.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Checks the password policy: at least 8 characters with an uppercase
/// letter, a lowercase letter and a symbol.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

    if password.len() < 8 {
        let mut error = ValidationError::new("password_length");
        error.message = Some("La contraseña debe tener mínimo 8 caracteres".into());
        return Err(error);
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_symbol = password.chars().any(|c| SYMBOLS.contains(c));

    if !(has_lower && has_upper && has_symbol) {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(
            "La contraseña debe tener al menos una mayúscula, una minúscula y un símbolo".into(),
        );
        return Err(error);
    }

    Ok(())
}

/// DTO for creating a user (admin endpoint). The password arrives in clear
/// and is hashed by the service.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserDto {
    #[validate(email(message = "El correo no es valido"))]
    pub email: String,
    #[validate(length(max = 150, message = "El nombre supera el limite de 150 caracteres"))]
    pub name: String,
    #[validate(custom(function = validate_password_strength))]
    pub password: String,
    pub role: UserRole,
}

/// Partial update; omitted fields keep their stored value.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserDto {
    #[validate(email(message = "El correo no es valido"))]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "El nombre supera el limite de 150 caracteres"))]
    pub name: Option<String>,
    #[validate(custom(function = validate_password_strength))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl From<CreateUserDto> for UpdateUserDto {
    fn from(dto: CreateUserDto) -> Self {
        Self {
            email: Some(dto.email),
            name: Some(dto.name),
            password: Some(dto.password),
            role: Some(dto.role),
        }
    }
}

/// Optional filters for the user listing. Spanish parameter names are part
/// of the public API.
#[derive(Deserialize, Debug, Clone, Default, ToSchema, IntoParams)]
pub struct FilterUsersDto {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    /// Exact creation date, `YYYY-MM-DD`.
    pub fecha: Option<NaiveDate>,
}

/// Required pagination parameters; `sort` is one of `nombre`, `correo`,
/// `fecha`.
#[derive(Deserialize, Debug, Clone, ToSchema, IntoParams)]
pub struct PaginationQuery {
    pub page: i64,
    pub limit: i64,
    pub sort: String,
}
