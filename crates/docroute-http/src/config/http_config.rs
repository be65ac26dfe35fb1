//! HTTP server configuration

use super::defaults::HttpDefaults;
use crate::errors::{HttpError, HttpResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Largest request body the validation middleware will buffer, in bytes
    pub max_request_size: usize,
    /// Mount path of the published API document and its UI
    pub docs_path: String,
    /// Wrap the application in a request tracing layer
    pub enable_tracing: bool,
    /// How long `ServerHandle::shutdown` waits for in-flight requests
    pub shutdown_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_request_size: HttpDefaults::MAX_REQUEST_SIZE,
            docs_path: HttpDefaults::DOCS_PATH.to_string(),
            enable_tracing: HttpDefaults::ENABLE_TRACING,
            shutdown_timeout_secs: HttpDefaults::SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Read `HTTP_MAX_REQUEST_SIZE`, `HTTP_DOCS_PATH`, `HTTP_ENABLE_TRACING` and
    /// `HTTP_SHUTDOWN_TIMEOUT`, falling back to defaults for unset variables
    pub fn from_env() -> HttpResult<Self> {
        let config = HttpConfig {
            max_request_size: parse_env(
                "HTTP_MAX_REQUEST_SIZE",
                HttpDefaults::MAX_REQUEST_SIZE,
                "valid number of bytes",
            )?,
            docs_path: get_env_or_default("HTTP_DOCS_PATH", HttpDefaults::DOCS_PATH),
            enable_tracing: parse_env(
                "HTTP_ENABLE_TRACING",
                HttpDefaults::ENABLE_TRACING,
                "true or false",
            )?,
            shutdown_timeout_secs: parse_env(
                "HTTP_SHUTDOWN_TIMEOUT",
                HttpDefaults::SHUTDOWN_TIMEOUT_SECS,
                "valid number of seconds",
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HttpResult<()> {
        if self.max_request_size == 0 {
            return Err(HttpError::config(
                "Maximum request size must be greater than 0",
            ));
        }

        if self.shutdown_timeout_secs == 0 {
            return Err(HttpError::config("Shutdown timeout must be greater than 0"));
        }

        if self.docs_path.len() < 2 || !self.docs_path.starts_with('/') {
            return Err(HttpError::config(
                "Docs path must start with '/' and name at least one segment",
            ));
        }

        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn with_max_request_size(mut self, bytes: usize) -> Self {
        self.max_request_size = bytes;
        self
    }

    pub fn with_docs_path(mut self, path: &str) -> Self {
        self.docs_path = path.to_string();
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T, expected: &str) -> HttpResult<T>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            HttpError::config(format!("{} must be a {}, got '{}'", key, expected, raw))
        }),
        Err(_) => Ok(default),
    }
}
