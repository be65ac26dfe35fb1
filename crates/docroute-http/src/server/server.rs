//! Binding a documented router into a servable application
//!
//! The document is compiled exactly once, when the router is bound. Binding also
//! publishes the document and its UI, so a compilation failure aborts startup
//! before any connection is accepted.

use super::lifecycle::{start_server, ServerHandle};
use crate::{
    config::HttpConfig,
    errors::HttpResult,
    middleware::BodyLimit,
    routing::DocRouter,
};
use axum::{extract::DefaultBodyLimit, Extension};
use docroute_openapi::{OpenApiConfig, OpenApiSpec, SwaggerConfig, SwaggerUi};
use std::sync::Arc;
use tokio::net::ToSocketAddrs;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Server for documented routers
///
/// # Example
///
/// ```rust,no_run
/// use docroute_http::{request_validator, DocRouter, HttpConfig, OpenApiConfig, RouteSpec, Server};
///
/// # async fn health() -> &'static str { "ok" }
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let router = DocRouter::new()
///         .get("/health", request_validator(RouteSpec::new().summary("Health")).handler(health));
///
///     let server = Server::new(HttpConfig::default())?;
///     let handle = server
///         .listen(router, "127.0.0.1:3000", &OpenApiConfig::new("Status API", "1.0.0"))
///         .await?;
///     handle.wait().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Server {
    config: HttpConfig,
    swagger: SwaggerConfig,
}

/// A router ready to serve, with the API document it publishes
#[derive(Debug, Clone)]
pub struct BoundApp {
    pub router: axum::Router,
    pub spec: Arc<OpenApiSpec>,
}

impl BoundApp {
    pub fn into_router(self) -> axum::Router {
        self.router
    }
}

impl Server {
    /// Create a server, rejecting an invalid configuration
    pub fn new(config: HttpConfig) -> HttpResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            swagger: SwaggerConfig::default(),
        })
    }

    /// Customise the documentation page
    pub fn with_swagger_config(mut self, swagger: SwaggerConfig) -> Self {
        self.swagger = swagger;
        self
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Compile the router's documentation and publish it next to its routes
    pub fn bind(&self, router: DocRouter, openapi: &OpenApiConfig) -> HttpResult<BoundApp> {
        let spec = router.compile(openapi)?;
        let docs = SwaggerUi::new(spec.clone(), self.swagger.clone())
            .into_router(&self.config.docs_path)?;

        info!(
            operations = spec.operation_count(),
            docs_path = %self.config.docs_path,
            "Published API document"
        );

        let mut app = router
            .into_axum_router()
            .merge(docs)
            .layer(Extension(BodyLimit(self.config.max_request_size)))
            .layer(DefaultBodyLimit::max(self.config.max_request_size));

        if self.config.enable_tracing {
            app = app.layer(TraceLayer::new_for_http());
        }

        Ok(BoundApp {
            router: app,
            spec: Arc::new(spec),
        })
    }

    /// Bind the router and start accepting connections on `addr`
    pub async fn listen<A>(
        &self,
        router: DocRouter,
        addr: A,
        openapi: &OpenApiConfig,
    ) -> HttpResult<ServerHandle>
    where
        A: ToSocketAddrs,
    {
        let app = self.bind(router, openapi)?;
        start_server(addr, app, self.config.shutdown_timeout()).await
    }
}

impl DocRouter<()> {
    /// Bind with the default [`HttpConfig`]
    pub fn into_app(self, openapi: &OpenApiConfig) -> HttpResult<BoundApp> {
        Server::new(HttpConfig::default())?.bind(self, openapi)
    }

    /// Serve on `addr` with the default [`HttpConfig`]
    pub async fn listen<A>(self, addr: A, openapi: &OpenApiConfig) -> HttpResult<ServerHandle>
    where
        A: ToSocketAddrs,
    {
        Server::new(HttpConfig::default())?
            .listen(self, addr, openapi)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HttpError;

    #[test]
    fn test_server_rejects_invalid_config() {
        let config = HttpConfig::default().with_max_request_size(0);
        assert!(matches!(
            Server::new(config),
            Err(HttpError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_bind_compiles_document() {
        let router: DocRouter = DocRouter::new();
        let app = router
            .into_app(&OpenApiConfig::new("Empty", "0.1.0"))
            .unwrap();
        assert_eq!(app.spec.info.title, "Empty");
        assert_eq!(app.spec.operation_count(), 0);
    }
}
