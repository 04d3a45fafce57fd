use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tower_sessions::Session;

use crate::state::AppState;
use crate::utils::csrf::{
    CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CSRF_SECRET_SESSION_KEY, validate_token,
};
use crate::utils::errors::AppError;

/// Double-submit CSRF validation for state-changing requests.
///
/// GET/HEAD/OPTIONS pass through. Everything else must carry the same token
/// in the `csrf-token` cookie and the `x-csrf-token` header, and the token
/// must verify against the secret issued to this session by
/// `GET /auth/csrf-token`. Any mismatch is a 403 with `CSRF_TOKEN_INVALID`.
pub async fn csrf_protection(
    State(state): State<AppState>,
    session: Session,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.session_config.csrf_enabled {
        return Ok(next.run(req).await);
    }

    if matches!(
        req.method(),
        &Method::GET | &Method::HEAD | &Method::OPTIONS
    ) {
        return Ok(next.run(req).await);
    }

    let jar = CookieJar::from_headers(req.headers());
    let cookie_token = jar.get(CSRF_COOKIE_NAME).map(|c| c.value().to_string());
    let header_token = req
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (Some(cookie_token), Some(header_token)) = (cookie_token, header_token) else {
        return Err(AppError::csrf_invalid());
    };

    if cookie_token != header_token {
        return Err(AppError::csrf_invalid());
    }

    let secret: Option<String> = session
        .get(CSRF_SECRET_SESSION_KEY)
        .await
        .map_err(|e| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let Some(secret) = secret else {
        return Err(AppError::csrf_invalid());
    };

    if !validate_token(&secret, &state.session_config.secret, &header_token) {
        return Err(AppError::csrf_invalid());
    }

    Ok(next.run(req).await)
}
