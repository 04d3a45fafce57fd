use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_governor::GovernorLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::csrf::csrf_protection;
use crate::modules::auth::router::{init_auth_router, init_csrf_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use crate::utils::response::ApiResponse;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

pub fn init_router(state: AppState) -> Router {
    STARTED_AT.get_or_init(Instant::now);

    // Server-side session state backing the CSRF secrets. In-memory, like
    // the session store this API has always run with in development.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name("session-id")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(state.session_config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)));

    let mut auth_router = init_auth_router();
    if state.rate_limit_config.enabled {
        auth_router = auth_router.layer(GovernorLayer::new(Arc::new(
            state.rate_limit_config.auth_governor_config(),
        )));
    }
    // csrf-token issuance stays outside the auth limiter.
    let auth_router = auth_router.merge(init_csrf_router());

    let mut users_router = init_users_router().layer(middleware::from_fn_with_state(
        state.clone(),
        csrf_protection,
    ));
    if state.rate_limit_config.enabled {
        users_router = users_router.layer(GovernorLayer::new(Arc::new(
            state.rate_limit_config.general_governor_config(),
        )));
    }

    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        .merge(SwaggerUi::new("/api-docs").url("/api-docs-json", ApiDoc::openapi()))
        .route("/", get(welcome))
        .route("/health", get(health))
        .nest("/auth", auth_router)
        .nest("/usuarios", users_router)
        .with_state(state)
        .layer(session_layer)
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    HeaderName::from_static("x-csrf-token"),
                ])
                .allow_credentials(true),
        )
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ))
        .layer(middleware::from_fn(logging_middleware))
}

async fn welcome() -> ApiResponse<&'static str> {
    ApiResponse::ok("Bienvenido a la API de Usuarios GASO")
}

async fn health() -> ApiResponse<serde_json::Value> {
    let uptime = STARTED_AT.get().map(|s| s.elapsed().as_secs()).unwrap_or(0);

    ApiResponse::ok(serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": uptime,
    }))
}
