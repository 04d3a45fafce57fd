use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application error carrying an HTTP status and a caller-facing message.
///
/// Errors serialize to the uniform body `{ statusCode, message, error }`,
/// where `error` is a generic description of the status class and `message`
/// is the specific cause.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Overrides the generic status description in the response body.
    error_code: Option<&'static str>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            error_code: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow!(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow!(message.into()))
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, anyhow!(message.into()))
    }

    /// CSRF validation failure, reported with the `CSRF_TOKEN_INVALID` code.
    pub fn csrf_invalid() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: anyhow!("Token CSRF inválido"),
            error_code: Some("CSRF_TOKEN_INVALID"),
        }
    }
}

/// Generic Spanish descriptions per status class, falling back to the
/// canonical reason phrase for statuses outside the map.
fn error_description(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "no se pudo interpretar la solicitud dada una sintaxis inválida",
        StatusCode::UNAUTHORIZED => "Es necesario autenticar para obtener la respuesta solicitada",
        StatusCode::FORBIDDEN => "El cliente no posee los permisos necesarios para cierto contenido",
        StatusCode::NOT_FOUND => "El servidor no pudo encontrar el recurso solicitado",
        StatusCode::INTERNAL_SERVER_ERROR => {
            "El servidor ha encontrado una situación que no sabe cómo manejarla"
        }
        _ => status.canonical_reason().unwrap_or("Unknown Status"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = self
            .error_code
            .unwrap_or_else(|| error_description(self.status));

        let body = Json(json!({
            "statusCode": self.status.as_u16(),
            "message": self.error.to_string(),
            "error": error,
        }));

        (self.status, body).into_response()
    }
}

/// Database failures map to 422 with a localized message keyed on the
/// Postgres error code; anything else in the driver is a 500.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = match db_err.code().as_deref() {
                    Some("23505") => "Valor duplicado, restricción única",
                    Some("23503") => {
                        "No se puede actualizar o borrar, debido a su relación con otras entidades"
                    }
                    _ => "Error desconocido DB",
                };
                Self::unprocessable(message)
            }
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other),
        }
    }
}
