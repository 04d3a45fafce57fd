//! Role-based authorization extractors.
//!
//! Routes restricted to administrators take [`RequireAdmin`] as an argument;
//! routes that only need a valid session take
//! [`AuthUser`](crate::middleware::auth::AuthUser) directly. Handlers without
//! either are public.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor for admin-only routes.
///
/// Authenticates like [`AuthUser`] and additionally rejects with 403 when
/// the token's role is not ADMIN.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(
                "Se requieren permisos de administrador",
            ));
        }

        Ok(RequireAdmin(auth_user))
    }
}
