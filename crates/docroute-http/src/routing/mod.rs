//! Documented routing
//!
//! [`DocRouter`] forwards registrations to an [`axum::Router`] and records a
//! [`RouteDocEntry`](docroute_openapi::RouteDocEntry) for every documented handler.
//! Mounting a child router freezes its entries into the parent's [`RouteDocs`] tree.

pub mod docs;
pub mod handler;
pub mod router;

pub use docs::{derive_tag, DocNode, MountedDocs, RouteDocs};
pub use handler::{Documented, IntoRouteHandler, Plain, WithDocs};
pub use router::DocRouter;

use axum::routing::MethodFilter;
use docroute_openapi::HttpMethod;

/// Path argument of a verb registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePath {
    /// A single path. Documented handlers registered here are recorded.
    Literal(String),
    /// The same handler on several paths. Dispatched on each, never documented.
    Many(Vec<String>),
}

impl From<&str> for RoutePath {
    fn from(path: &str) -> Self {
        RoutePath::Literal(path.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(path: String) -> Self {
        RoutePath::Literal(path)
    }
}

impl From<Vec<String>> for RoutePath {
    fn from(paths: Vec<String>) -> Self {
        RoutePath::Many(paths)
    }
}

impl From<Vec<&str>> for RoutePath {
    fn from(paths: Vec<&str>) -> Self {
        RoutePath::Many(paths.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RoutePath {
    fn from(paths: [&str; N]) -> Self {
        RoutePath::Many(paths.iter().map(|p| p.to_string()).collect())
    }
}

/// Method filter axum dispatches `method` under
pub fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::GET => MethodFilter::GET,
        HttpMethod::POST => MethodFilter::POST,
        HttpMethod::PUT => MethodFilter::PUT,
        HttpMethod::PATCH => MethodFilter::PATCH,
        HttpMethod::DELETE => MethodFilter::DELETE,
        HttpMethod::HEAD => MethodFilter::HEAD,
        HttpMethod::OPTIONS => MethodFilter::OPTIONS,
        HttpMethod::TRACE => MethodFilter::TRACE,
    }
}
