//! Documented handlers
//!
//! A handler either is a plain [`axum::handler::Handler`] or a [`Documented`]
//! wrapper produced by [`Validator::handler`]. The marker types [`Plain`] and
//! [`WithDocs`] keep the two [`IntoRouteHandler`] implementations apart, so the
//! router knows at compile time which registrations carry documentation.

use crate::middleware::{validate_request, Validator};
use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{on, MethodFilter, MethodRouter},
};
use docroute_openapi::RouteSpec;
use std::marker::PhantomData;
use std::sync::Arc;

/// A handler paired with the validator describing its request schemas
#[derive(Debug, Clone)]
pub struct Documented<H> {
    handler: H,
    validator: Validator,
}

impl<H> Documented<H> {
    pub fn new(handler: H, validator: Validator) -> Self {
        Self { handler, validator }
    }

    pub fn doc(&self) -> &RouteSpec {
        self.validator.doc()
    }
}

/// Marker for handlers registered without documentation
pub struct Plain<T>(PhantomData<fn() -> T>);

/// Marker for [`Documented`] handlers
pub struct WithDocs<T>(PhantomData<fn() -> T>);

/// Conversion of a registration argument into an axum method router
pub trait IntoRouteHandler<M, S>: Sized {
    /// Build the method router for `filter`, along with the route spec to record, if any
    fn into_method_router(self, filter: MethodFilter)
        -> (MethodRouter<S>, Option<Arc<RouteSpec>>);
}

impl<H, T, S> IntoRouteHandler<Plain<T>, S> for H
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    fn into_method_router(
        self,
        filter: MethodFilter,
    ) -> (MethodRouter<S>, Option<Arc<RouteSpec>>) {
        (on(filter, self), None)
    }
}

impl<H, T, S> IntoRouteHandler<WithDocs<T>, S> for Documented<H>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    fn into_method_router(
        self,
        filter: MethodFilter,
    ) -> (MethodRouter<S>, Option<Arc<RouteSpec>>) {
        let spec = self.validator.spec();
        let method_router = on(filter, self.handler)
            .route_layer(from_fn_with_state(Arc::clone(&spec), validate_request));
        (method_router, Some(spec))
    }
}
