use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_csrf_token, register_admin, sign_in, sign_up};

/// Registration and sign-in endpoints. These carry the stricter auth rate
/// limit bucket.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-up", post(sign_up))
        .route("/admin/{secret}", post(register_admin))
}

/// CSRF token issuance; mounted next to the auth routes but outside the
/// rate limiter, so token refreshes are never throttled.
pub fn init_csrf_router() -> Router<AppState> {
    Router::new().route("/csrf-token", get(get_csrf_token))
}
