/*!
# docroute-openapi

Route documentation entries and their compilation into an OpenAPI 3 document.

Routers record a [`RouteDocEntry`] for every documented registration. At bind time
the aggregated entries are compiled once by [`OpenApiGenerator`] and the resulting
[`OpenApiSpec`] is published through [`SwaggerUi`].

## Usage

```rust
use docroute_openapi::{HttpMethod, OpenApiConfig, OpenApiGenerator, RouteDocEntry, RouteSpec};
use std::sync::Arc;

let entries = vec![RouteDocEntry::new("/health", HttpMethod::GET, Arc::new(RouteSpec::new()))];
let spec = OpenApiGenerator::new(OpenApiConfig::new("Status API", "1.0.0"))
    .generate(&entries)
    .unwrap();
assert!(spec.paths.contains_key("/health"));
```
*/

pub use crate::{
    config::OpenApiConfig,
    error::{OpenApiError, OpenApiResult},
    export::{write_spec, ExportFormat},
    generator::OpenApiGenerator,
    registry::DocumentRegistry,
    route::{BodySpec, HttpMethod, RouteDocEntry, RouteSpec},
    security::{compile_security, CompiledSecurity, SecurityDeclaration},
    specification::OpenApiSpec,
    swagger::{SwaggerConfig, SwaggerUi, DEFAULT_DOCS_PATH},
};

// Core modules
pub mod config;
pub mod error;
pub mod generator;
pub mod registry;
pub mod route;
pub mod security;
pub mod specification;

// Export functionality
pub mod export;

// Interactive documentation
pub mod swagger;

// Utilities
pub mod utils;
