//! Router wrapper recording route documentation

use super::{
    docs::RouteDocs,
    handler::IntoRouteHandler,
    method_filter, RoutePath,
};
use crate::errors::HttpResult;
use axum::{
    extract::Request,
    response::IntoResponse,
    routing::Route,
    Router as AxumRouter,
};
use docroute_openapi::{HttpMethod, OpenApiConfig, OpenApiGenerator, OpenApiSpec, RouteDocEntry};
use std::convert::Infallible;
use tower::{Layer, Service};
use tracing::debug;

/// Router that forwards registrations to axum and records documented routes.
///
/// Dispatch is exactly what the wrapped [`axum::Router`] would do with the same
/// calls; documentation is a side channel read at bind time.
#[derive(Debug)]
pub struct DocRouter<S = ()> {
    router: AxumRouter<S>,
    docs: RouteDocs,
}

impl<S> Clone for DocRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            docs: self.docs.clone(),
        }
    }
}

impl<S> Default for DocRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> DocRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: AxumRouter::new(),
            docs: RouteDocs::new(),
        }
    }

    /// Register `handler` for `method` on `path`
    pub fn route<H, M>(mut self, method: HttpMethod, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        let (method_router, spec) = handler.into_method_router(method_filter(method));

        match path.into() {
            RoutePath::Literal(path) => {
                if let Some(spec) = spec {
                    debug!(method = %method, path = %path, "Recorded route documentation");
                    self.docs
                        .push_route(RouteDocEntry::new(path.as_str(), method, spec));
                }
                self.router = self.router.route(&path, method_router);
            }
            RoutePath::Many(paths) => {
                for path in &paths {
                    self.router = self.router.route(path, method_router.clone());
                }
            }
        }
        self
    }

    pub fn get<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::GET, path, handler)
    }

    pub fn post<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::POST, path, handler)
    }

    pub fn put<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::PUT, path, handler)
    }

    pub fn patch<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::PATCH, path, handler)
    }

    pub fn delete<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::DELETE, path, handler)
    }

    pub fn head<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::HEAD, path, handler)
    }

    pub fn options<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::OPTIONS, path, handler)
    }

    pub fn trace<H, M>(self, path: impl Into<RoutePath>, handler: H) -> Self
    where
        H: IntoRouteHandler<M, S>,
    {
        self.route(HttpMethod::TRACE, path, handler)
    }

    /// Mount `child` under `path`.
    ///
    /// Mounting at `""` or `"/"` merges the child's routes into this router.
    /// The child's documentation is frozen and recorded with the mount prefix and
    /// the tag derived from the last segment of `path`.
    pub fn mount(mut self, path: &str, child: DocRouter<S>) -> Self {
        let DocRouter { router, docs } = child;

        if !docs.is_empty() {
            debug!(prefix = %path, entries = docs.len(), "Merged mounted route documentation");
            self.docs.push_mount(path, docs);
        }
        self.router = Self::attach(self.router, path, router);
        self
    }

    fn attach(parent: AxumRouter<S>, path: &str, child: AxumRouter<S>) -> AxumRouter<S> {
        if path.is_empty() || path == "/" {
            parent.merge(child)
        } else {
            parent.nest(path, child)
        }
    }

    /// Apply a tower layer to every route registered so far
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.router = self.router.layer(layer);
        self
    }

    /// Provide the router state, keeping the recorded documentation
    pub fn with_state<S2>(self, state: S) -> DocRouter<S2> {
        DocRouter {
            router: self.router.with_state(state),
            docs: self.docs,
        }
    }

    pub fn docs(&self) -> &RouteDocs {
        &self.docs
    }

    /// Flattened documentation entries, mount prefixes applied
    pub fn entries(&self) -> Vec<RouteDocEntry> {
        self.docs.flatten()
    }

    /// Compile the recorded entries into an API document
    pub fn compile(&self, config: &OpenApiConfig) -> HttpResult<OpenApiSpec> {
        let spec = OpenApiGenerator::new(config.clone()).generate(&self.entries())?;
        Ok(spec)
    }

    /// The underlying axum router, without documentation
    pub fn into_axum_router(self) -> AxumRouter<S> {
        self.router
    }
}
