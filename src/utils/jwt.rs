use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::AccessTokenPayload;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

/// Signs an access token embedding the user's identity claims, returning the
/// token together with the claims it carries.
///
/// `iat` is issued in epoch milliseconds (wire-compatible with earlier
/// clients); `exp` is in epoch seconds as signature validation requires.
pub fn create_access_token(
    id: Uuid,
    email: &str,
    name: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<(String, AccessTokenPayload), AppError> {
    let now = Utc::now();

    let payload = AccessTokenPayload {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        iat: now.timestamp_millis(),
        exp: now.timestamp() + jwt_config.expires_in,
    };

    let token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to create token: {}", e)))?;

    Ok((token, payload))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<AccessTokenPayload, AppError> {
    decode::<AccessTokenPayload>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Su sesión ha expirado"),
        _ => AppError::unauthorized("Unauthorized"),
    })
}
