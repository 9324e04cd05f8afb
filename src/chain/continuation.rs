//! Continuing a chain from inside a handler.
//!
//! When a chain is served, its handlers are laid out first-attached-first
//! and the first one is called. Every response a chain hands out carries the
//! slice of handlers still pending *for that handler*. [`next`] serves the
//! head of that slice with a response carrying its tail.
//!
//! The slice a handler sees never changes: calling `next` again serves the
//! same tail again from its start. A nested chain lays out its own handlers
//! over the same cycle, so `next` inside it never reaches the outer chain.

use super::handler::Handler;
use crate::context::Context;
use crate::response::ChainResponse;
use crate::transport::sealed::Internal;
use crate::transport::{Request, Response};

/// One request cycle, as seen through the response of a single handler.
///
/// Only responses produced by a chain expose one, to [`next`] and the
/// [`context`](crate::context) functions.
pub trait Cycle {
    /// Serves the first of `pending`, handing it a response that carries the
    /// rest. Returns `false` if `pending` is empty.
    fn dispatch(&mut self, pending: &[&dyn Handler], request: &Request) -> bool;

    /// Serves the next pending handler. Returns `false` if there is none.
    fn next(&mut self, request: &Request) -> bool;

    /// Number of handlers still pending for this response.
    fn remaining(&self) -> usize;

    /// The context shared by every handler of the cycle.
    fn context(&mut self) -> &mut Context;
}

impl Cycle for ChainResponse<'_> {
    fn dispatch(&mut self, pending: &[&dyn Handler], request: &Request) -> bool {
        let Some((handler, rest)) = pending.split_first() else {
            return false;
        };

        tracing::trace!(remaining = rest.len(), "serving handler");
        let mut response = ChainResponse {
            transport: &mut *self.transport,
            context: &mut *self.context,
            pending: rest,
            capabilities: self.capabilities,
        };
        handler.serve(&mut response, request);
        true
    }

    fn next(&mut self, request: &Request) -> bool {
        let pending = self.pending;
        self.dispatch(pending, request)
    }

    fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn context(&mut self) -> &mut Context {
        &mut *self.context
    }
}

/// Serves the next handler in the chain.
///
/// `response` must be the response the current handler was served with.
/// Returns `false` if no handler is left, or if `response` was not produced
/// by a chain. Each call serves every remaining handler once more, so calling
/// `next` twice runs the rest of the chain twice.
pub fn next(response: &mut dyn Response, request: &Request) -> bool {
    match response.cycle(Internal) {
        Some(cycle) => cycle.next(request),
        None => {
            tracing::debug!("next called with a response that is not part of a chain");
            false
        }
    }
}

/// Number of handlers `next` would still walk through for this response.
///
/// `None` if `response` was not produced by a chain.
pub fn remaining(response: &mut dyn Response) -> Option<usize> {
    response.cycle(Internal).map(|cycle| cycle.remaining())
}
