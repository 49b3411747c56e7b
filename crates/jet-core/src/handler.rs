//! Handler capability

use crate::Response;
use std::sync::Arc;

/// Something that turns a request context into a response
///
/// Implemented for every `Fn(&mut C) -> Response + Send + Sync`, so plain
/// closures and functions can be routed directly.
pub trait Handler<C>: Send + Sync {
    fn handle(&self, ctx: &mut C) -> Response;
}

impl<C, F> Handler<C> for F
where
    F: Fn(&mut C) -> Response + Send + Sync,
{
    fn handle(&self, ctx: &mut C) -> Response {
        self(ctx)
    }
}

/// Type-erased, cheaply cloneable handler
///
/// Lets one route table mix closures of different types.
pub struct BoxedHandler<C>(Arc<dyn Fn(&mut C) -> Response + Send + Sync>);

impl<C> BoxedHandler<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> Response + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl<C> Handler<C> for BoxedHandler<C> {
    fn handle(&self, ctx: &mut C) -> Response {
        (self.0)(ctx)
    }
}

impl<C> Clone for BoxedHandler<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> std::fmt::Debug for BoxedHandler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoxedHandler")
    }
}

/// Shorthand for [`BoxedHandler::new`]
pub fn handler<C, F>(f: F) -> BoxedHandler<C>
where
    F: Fn(&mut C) -> Response + Send + Sync + 'static,
{
    BoxedHandler::new(f)
}
