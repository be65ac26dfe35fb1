//! HTTP error types
//!
//! Startup failures (configuration, document compilation, binding) and the
//! request-time failures raised by the validation middleware share one enum so
//! that both can be reported through the same response format.

use crate::middleware::validation::RequestPart;
use docroute_openapi::OpenApiError;
use docroute_validation::ValidationErrors;
use thiserror::Error;

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Server startup failed: {message}")]
    StartupFailed { message: String },

    #[error("Server shutdown failed: {message}")]
    ShutdownFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// The API document could not be compiled; startup is aborted
    #[error("Documentation error: {0}")]
    Documentation(#[from] OpenApiError),

    #[error("Request {location} failed validation")]
    Validation {
        location: RequestPart,
        errors: ValidationErrors,
    },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Unsupported content type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("Request body exceeds limit of {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl HttpError {
    pub fn startup<T: Into<String>>(message: T) -> Self {
        HttpError::StartupFailed {
            message: message.into(),
        }
    }

    pub fn shutdown<T: Into<String>>(message: T) -> Self {
        HttpError::ShutdownFailed {
            message: message.into(),
        }
    }

    pub fn config<T: Into<String>>(message: T) -> Self {
        HttpError::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(location: RequestPart, errors: ValidationErrors) -> Self {
        HttpError::Validation { location, errors }
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HttpError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unsupported_media_type<T: Into<String>>(content_type: T) -> Self {
        HttpError::UnsupportedMediaType {
            content_type: content_type.into(),
        }
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        HttpError::InternalError {
            message: message.into(),
        }
    }

    /// Get error code for consistent API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::StartupFailed { .. } => "SERVER_STARTUP_FAILED",
            HttpError::ShutdownFailed { .. } => "SERVER_SHUTDOWN_FAILED",
            HttpError::ConfigError { .. } => "CONFIGURATION_ERROR",
            HttpError::Documentation(_) => "DOCUMENTATION_ERROR",
            HttpError::Validation { .. } => "VALIDATION_ERROR",
            HttpError::BadRequest { .. } => "BAD_REQUEST",
            HttpError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            HttpError::RequestTooLarge { .. } => "REQUEST_TOO_LARGE",
            HttpError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::InternalError {
            message: format!("IO error: {}", err),
        }
    }
}
