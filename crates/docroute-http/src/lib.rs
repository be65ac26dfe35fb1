//! # docroute-http
//!
//! Documented routing on top of axum.
//!
//! A route declares its request schemas once with [`request_validator`]. The
//! resulting handler validates every request against those schemas and leaves a
//! documentation entry on the [`DocRouter`] it is registered with. Mounting
//! routers carries the entries upward, prefixing paths and tagging them after the
//! mount point. When the top-level router is bound, the entries are compiled into
//! a single OpenAPI document, published under `/api-docs` by default.
//!
//! ```rust
//! use docroute_http::{
//!     request_validator, schema, DocRouter, HttpMethod, JsonSchema, OpenApiConfig, RouteSpec,
//! };
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct UserParams {
//!     id: u64,
//! }
//!
//! async fn show_user() -> &'static str {
//!     "user"
//! }
//!
//! let users = DocRouter::new().get(
//!     "/:id",
//!     request_validator(RouteSpec::new().params(schema::<UserParams>())).handler(show_user),
//! );
//! let api: DocRouter = DocRouter::new().mount("/users", users);
//!
//! let document = api.compile(&OpenApiConfig::new("Users", "1.0.0")).unwrap();
//! let operation = document.operation("/users/{id}", HttpMethod::GET).unwrap();
//! assert_eq!(operation.tags, vec!["Users".to_string()]);
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;

pub use config::{HttpConfig, HttpDefaults};
pub use errors::{HttpError, HttpResult};
pub use logging::{init_logging, LoggingConfig};
pub use middleware::{request_validator, validate_request, BodyLimit, RequestPart, Validator};
pub use routing::{DocRouter, Documented, RouteDocs, RoutePath};
pub use server::{BoundApp, Server, ServerHandle};

// Re-export the documentation and validation building blocks
pub use docroute_openapi::{
    BodySpec, HttpMethod, OpenApiConfig, OpenApiError, OpenApiSpec, RouteDocEntry, RouteSpec,
    SecurityDeclaration, SwaggerConfig,
};
pub use docroute_validation::{
    schema, JsonSchema, LengthValidator, NumericValidator, PatternValidator, Rules, Schema,
    SchemaRef, TypedSchema, ValidationError, ValidationErrors,
};
