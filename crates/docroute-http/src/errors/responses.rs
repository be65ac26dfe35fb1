//! HTTP error response formatting

use super::HttpError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl HttpError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::StartupFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::ShutdownFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Documentation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            HttpError::RequestTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            HttpError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error hint for user guidance
    pub fn error_hint(&self) -> Option<&'static str> {
        match self {
            HttpError::Validation { .. } => Some("Check the fields listed in the error"),
            HttpError::BadRequest { .. } => Some("Check request format and parameters"),
            HttpError::UnsupportedMediaType { .. } => {
                Some("Send the body with one of the documented content types")
            }
            HttpError::RequestTooLarge { .. } => Some("Reduce request payload size"),
            _ => None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "hint": self.error_hint()
            }
        });
        if let HttpError::Validation { location, errors } = &self {
            body["error"]["location"] = json!(location.as_str());
            body["error"]["fields"] = json!(errors.errors);
        }

        (status, Json(body)).into_response()
    }
}
