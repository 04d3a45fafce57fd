mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, create_test_user, generate_unique_email, issue_token, setup_test_app};
use gaso::modules::users::model::UserRole;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn admin_token(pool: &PgPool) -> String {
    let admin = create_test_user(
        pool,
        "Admin User",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::Admin,
    )
    .await;
    issue_token(&admin)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_requires_authentication(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/usuarios")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "email": generate_unique_email(),
                        "name": "X",
                        "password": "Passw0rd!",
                        "role": "USER"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_forbidden_for_non_admin(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Plain User",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = issue_token(&user);

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "POST",
            "/usuarios",
            &token,
            Some(json!({
                "email": generate_unique_email(),
                "name": "X",
                "password": "Passw0rd!",
                "role": "USER"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_success(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(authed(
            "POST",
            "/usuarios",
            &token,
            Some(json!({
                "email": email,
                "name": "New User",
                "password": "Passw0rd!",
                "role": "USER"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["name"], "New User");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, "Existing", &email, "Passw0rd!", UserRole::User).await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "POST",
            "/usuarios",
            &token,
            Some(json!({
                "email": email,
                "name": "Dup",
                "password": "Passw0rd!",
                "role": "USER"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_rejects_unknown_fields(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "POST",
            "/usuarios",
            &token,
            Some(json!({
                "email": generate_unique_email(),
                "name": "X",
                "password": "Passw0rd!",
                "role": "USER",
                "admin": true
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_returns_projection(pool: PgPool) {
    create_test_user(
        &pool,
        "Alice Wonder",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed("GET", "/usuarios", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "OK");
    let users = body["data"].as_array().unwrap();
    assert!(!users.is_empty());
    for user in users {
        assert!(user["id"].is_string());
        assert!(user["email"].is_string());
        assert!(user["name"].is_string());
        assert!(user["role"].is_string());
        assert!(user["createdAt"].is_string());
        assert!(user.get("password").is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_users_by_name_substring(pool: PgPool) {
    create_test_user(
        &pool,
        "Alice Wonder",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    create_test_user(
        &pool,
        "Bob Builder",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    // Case-insensitive substring match.
    let response = app
        .oneshot(authed("GET", "/usuarios?nombre=alice", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Alice Wonder");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_users_by_email_substring(pool: PgPool) {
    let email = format!("findme-{}", generate_unique_email());
    create_test_user(&pool, "Target", &email, "Passw0rd!", UserRole::User).await;
    create_test_user(
        &pool,
        "Other",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed("GET", "/usuarios?correo=FINDME", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_users_by_creation_date(pool: PgPool) {
    create_test_user(
        &pool,
        "Today User",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let today = chrono::Utc::now().date_naive();
    let response = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/usuarios?fecha={}", today),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(!body["data"].as_array().unwrap().is_empty());

    // A date with no records matches nothing.
    let response = app
        .oneshot(authed("GET", "/usuarios?fecha=1999-01-01", &token, None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_limits_and_sorts(pool: PgPool) {
    for name in ["Carol", "Alice", "Bob"] {
        create_test_user(
            &pool,
            name,
            &generate_unique_email(),
            "Passw0rd!",
            UserRole::User,
        )
        .await;
    }
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "GET",
            "/usuarios/paginado?page=1&limit=2&sort=nombre",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    let names: Vec<&str> = users.iter().map(|u| u["name"].as_str().unwrap()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_rejects_page_zero(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "GET",
            "/usuarios/paginado?page=0&limit=10&sort=nombre",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "pagina no valida, debe ser mayor que cero");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_rejects_invalid_sort(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "GET",
            "/usuarios/paginado?page=1&limit=10&sort=apellido",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Ordenación no valida, debe ser: nombre, correo o fecha"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_current_user(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Self Service",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = issue_token(&user);

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed("GET", "/usuarios/current", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], user.email);
    assert_eq!(body["data"]["role"], "USER");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_by_id(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Lookup Target",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/usuarios/{}", user.id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], user.id.to_string());

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/usuarios/{}", uuid::Uuid::new_v4()),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_update_by_id(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Before Update",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);
    let new_email = generate_unique_email();

    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/usuarios/{}", user.id),
            &token,
            Some(json!({
                "email": new_email,
                "name": "After Update",
                "password": "NewPassw0rd!",
                "role": "USER"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], "Usuario actualizado correctamente");

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/usuarios/{}", user.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "After Update");
    assert_eq!(body["data"]["email"], new_email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_self(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Old Name",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = issue_token(&user);

    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(authed(
            "PATCH",
            "/usuarios",
            &token,
            Some(json!({ "name": "New Name" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed("GET", "/usuarios/current", &token, None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "New Name");
    // Untouched fields keep their values.
    assert_eq!(body["data"]["email"], user.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_by_id_requires_admin(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Plain",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let target = create_test_user(
        &pool,
        "Target",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = issue_token(&user);

    let app = setup_test_app(pool);

    let response = app
        .oneshot(authed(
            "PATCH",
            &format!("/usuarios/{}", target.id),
            &token,
            Some(json!({ "name": "Hacked" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_twice(pool: PgPool) {
    let user = create_test_user(
        &pool,
        "Doomed",
        &generate_unique_email(),
        "Passw0rd!",
        UserRole::User,
    )
    .await;
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/usuarios/{}", user.id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], "Usuario eliminado correctamente");

    // Second delete of the same id fails.
    let response = app
        .oneshot(authed(
            "DELETE",
            &format!("/usuarios/{}", user.id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_response_strings_are_sanitized(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(authed(
            "POST",
            "/usuarios",
            &token,
            Some(json!({
                "email": email,
                "name": "<script>alert(1)</script>Injected",
                "password": "Passw0rd!",
                "role": "USER"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "alert(1)Injected");
}
