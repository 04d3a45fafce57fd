use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::utils::sanitize::sanitize_value;

/// Uniform success envelope: `{ data, statusCode, message }`.
///
/// Every string in `data` is HTML-stripped before serialization, so handler
/// code never has to sanitize on its own.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

/// Status text used in the `message` field of the envelope.
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::OK => "OK",
        StatusCode::CREATED => "Created",
        StatusCode::ACCEPTED => "Accepted",
        StatusCode::NO_CONTENT => "No Content",
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        StatusCode::FORBIDDEN => "Forbidden",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "Unknown Status",
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => sanitize_value(value),
            Err(e) => {
                return crate::utils::errors::AppError::internal(format!(
                    "Failed to serialize response: {}",
                    e
                ))
                .into_response();
            }
        };

        let body = Json(json!({
            "data": data,
            "statusCode": self.status.as_u16(),
            "message": status_message(self.status),
        }));

        (self.status, body).into_response()
    }
}
