use thiserror::Error;

/// Result type for document compilation
pub type OpenApiResult<T> = Result<T, OpenApiError>;

/// Errors raised while compiling or exporting the API document.
///
/// All of them surface at bind time and abort startup.
#[derive(Debug, Error)]
pub enum OpenApiError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A security declaration names a type the compiler does not know
    #[error("Unsupported security scheme type '{scheme_type}'")]
    UnsupportedSecurityType { scheme_type: String },

    /// A known security type is missing a field it cannot be documented without
    #[error("Invalid security declaration: {0}")]
    InvalidSecurity(String),

    /// Two routes compile to the same path and method
    #[error("Duplicate operation {method} {path}")]
    DuplicateOperation { method: String, path: String },
}

impl OpenApiError {
    pub fn unsupported_security<T: ToString>(scheme_type: T) -> Self {
        Self::UnsupportedSecurityType {
            scheme_type: scheme_type.to_string(),
        }
    }

    pub fn invalid_security<T: ToString>(msg: T) -> Self {
        Self::InvalidSecurity(msg.to_string())
    }

    pub fn duplicate_operation<M: ToString, P: ToString>(method: M, path: P) -> Self {
        Self::DuplicateOperation {
            method: method.to_string(),
            path: path.to_string(),
        }
    }
}
