use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AccessTokenPayload, CsrfTokenResponse, LoginResponse, SignInDto, SignUpDto,
};
use crate::modules::users::model::{CreateUserDto, CreatedUser, UpdateUserDto, User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::sign_in,
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::register_admin,
        crate::modules::auth::controller::get_csrf_token,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::find_all_by_filters,
        crate::modules::users::controller::find_all_by_pagination,
        crate::modules::users::controller::find_current,
        crate::modules::users::controller::find_one_by_id,
        crate::modules::users::controller::update_by_id,
        crate::modules::users::controller::update_current,
        crate::modules::users::controller::update_partial_by_id,
        crate::modules::users::controller::remove_user,
    ),
    components(
        schemas(
            User,
            UserRole,
            CreateUserDto,
            UpdateUserDto,
            CreatedUser,
            SignInDto,
            SignUpDto,
            LoginResponse,
            AccessTokenPayload,
            CsrfTokenResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registro e inicio de sesión"),
        (name = "usuarios", description = "Gestión de usuarios")
    ),
    info(
        title = "Usuarios GASO",
        version = "1.0.0",
        description = "API RESTful para Gestión de Usuarios"
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
