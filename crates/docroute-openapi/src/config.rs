use crate::security::DEFAULT_SECURITY_SCHEME_NAME;
use serde::{Deserialize, Serialize};

/// Top-level document metadata supplied by the caller at bind time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Document format version written to the `openapi` field
    pub openapi_version: String,
    pub servers: Vec<ServerConfig>,
    /// Name security declarations without an explicit name are registered under
    pub default_security_scheme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub description: Option<String>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            openapi_version: "3.0.0".to_string(),
            servers: Vec::new(),
            default_security_scheme: DEFAULT_SECURITY_SCHEME_NAME.to_string(),
        }
    }
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_openapi_version(mut self, version: &str) -> Self {
        self.openapi_version = version.to_string();
        self
    }

    pub fn add_server(mut self, url: &str, description: Option<&str>) -> Self {
        self.servers.push(ServerConfig {
            url: url.to_string(),
            description: description.map(|s| s.to_string()),
        });
        self
    }

    pub fn with_default_security_scheme(mut self, name: &str) -> Self {
        self.default_security_scheme = name.to_string();
        self
    }
}
