//! Default configuration values

use docroute_openapi::DEFAULT_DOCS_PATH;

pub struct HttpDefaults;

impl HttpDefaults {
    pub const MAX_REQUEST_SIZE: usize = 2 * 1024 * 1024;
    pub const DOCS_PATH: &'static str = DEFAULT_DOCS_PATH;
    pub const ENABLE_TRACING: bool = true;
    pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
}
