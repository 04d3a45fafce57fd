#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Response;
use gaso::config::admin::AdminConfig;
use gaso::config::cors::CorsConfig;
use gaso::config::jwt::JwtConfig;
use gaso::config::rate_limit::RateLimitConfig;
use gaso::config::session::SessionConfig;
use gaso::modules::users::model::UserRole;
use gaso::router::init_router;
use gaso::state::AppState;
use gaso::utils::jwt::create_access_token;
use gaso::utils::password::hash_password;
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        expires_in: 3600,
    }
}

/// Application state for tests: CSRF and rate limiting off unless a test
/// opts back in.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        admin_config: AdminConfig {
            secret: "super-admin-secret".to_string(),
        },
        session_config: SessionConfig {
            secret: "test-session-secret".to_string(),
            cookie_secure: false,
            csrf_enabled: false,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limit_config: RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Inserts a user directly, hashing the password the way the service does.
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Issues a bearer token for a test user with the test JWT config.
pub fn issue_token(user: &TestUser) -> String {
    let (token, _) =
        create_access_token(user.id, &user.email, &user.name, user.role, &test_jwt_config())
            .unwrap();
    token
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Collects the JSON body of a response.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
