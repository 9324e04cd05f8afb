//! The handler contract and its adapters.

use std::fmt;
use std::sync::Arc;

use super::continuation::next;
use crate::transport::{Request, Response};

/// A unit that serves one request.
///
/// Handlers in a chain receive a response produced by the chain; calling
/// [`next`] with it serves the rest of the chain. A [`Chain`](crate::Chain)
/// is itself a `Handler`, so chains nest.
///
/// Handlers are shared across concurrently served requests and must be
/// `Send + Sync`.
pub trait Handler: Send + Sync {
    fn serve(&self, response: &mut dyn Response, request: &Request);
}

impl<H> Handler for Arc<H>
where
    H: Handler + ?Sized,
{
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        (**self).serve(response, request)
    }
}

impl<H> Handler for Box<H>
where
    H: Handler + ?Sized,
{
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        (**self).serve(response, request)
    }
}

/// Handler backed by a plain function or closure.
///
/// Created with [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a function taking `(response, request)` as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut dyn Response, &Request) + Send + Sync,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut dyn Response, &Request) + Send + Sync,
{
    #[inline]
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        (self.f)(response, request)
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn")
            .field("f", &std::any::type_name::<F>())
            .finish()
    }
}

/// Serves the wrapped handler, then continues the chain once.
///
/// This is what [`Builder::stack`](super::Builder::stack) attaches. It lets a
/// handler that never calls [`next`] sit in a chain without ending it, and it
/// lets a nested chain hand control back to the chain it is stacked on.
///
/// A stacked handler that calls `next` itself serves the rest of the chain
/// twice.
#[derive(Debug, Clone)]
pub struct Stacked<H> {
    handler: H,
}

impl<H> Stacked<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.handler
    }
}

impl<H> Handler for Stacked<H>
where
    H: Handler,
{
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        self.handler.serve(response, request);
        next(response, request);
    }
}
