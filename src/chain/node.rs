//! Immutable chains and the builder API.
//!
//! A [`Chain`] is a backward-linked list of nodes, identified by its last
//! node. Attaching a handler allocates one new node pointing at the old
//! chain; nothing existing is modified, so one chain can be extended in
//! several directions and every branch keeps sharing the common prefix.
//!
//! # Example
//!
//! ```
//! use infuse::{Builder, Chain, Handler, Request, Response, ResponseRecorder};
//!
//! fn named(name: &'static str) -> impl Fn(&mut dyn Response, &Request) + Send + Sync {
//!     move |response, request| {
//!         write!(response, "{} ", name).unwrap();
//!         infuse::next(response, request);
//!     }
//! }
//!
//! let base = Chain::new().handle_func(named("auth"));
//! let hello = base.handle_func(named("hello"));
//! let goodbye = base.handle_func(named("goodbye"));
//!
//! let mut recorder = ResponseRecorder::new();
//! hello.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "auth hello ");
//!
//! let mut recorder = ResponseRecorder::new();
//! goodbye.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "auth goodbye ");
//! ```

use std::fmt;
use std::sync::Arc;

use super::continuation::Cycle;
use super::handler::{handler_fn, Handler, Stacked};
use crate::context::Context;
use crate::response::ChainResponse;
use crate::transport::sealed::Internal;
use crate::transport::{Request, Response};

/// Fluent API for attaching handlers.
///
/// Implemented by [`Chain`] and by [`MockChain`](crate::mock::MockChain), so
/// code that assembles chains can be handed either.
pub trait Builder: Handler + Sized {
    /// Returns a new chain with `handler` attached after the existing ones.
    ///
    /// `handler` runs when the handler attached before it calls
    /// [`next`](crate::next); the first handler attached runs when the chain
    /// is served.
    fn handle<H>(&self, handler: H) -> Self
    where
        H: Handler + 'static;

    /// Same as [`handle`](Self::handle) for a plain function or closure.
    fn handle_func<F>(&self, handler: F) -> Self
    where
        F: Fn(&mut dyn Response, &Request) + Send + Sync + 'static,
    {
        self.handle(handler_fn(handler))
    }

    /// Same as [`handle`](Self::handle), but continues the chain once after
    /// `handler` returns.
    ///
    /// Use it for handlers that do not call [`next`](crate::next)
    /// themselves, and to attach one chain to another so that the outer
    /// chain proceeds once the inner chain is done. Calls to `next` inside a
    /// nested chain never reach the chain it is attached to.
    fn stack<H>(&self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handle(Stacked::new(handler))
    }

    /// Same as [`stack`](Self::stack) for a plain function or closure.
    fn stack_func<F>(&self, handler: F) -> Self
    where
        F: Fn(&mut dyn Response, &Request) + Send + Sync + 'static,
    {
        self.stack(handler_fn(handler))
    }
}

struct Node {
    handler: Arc<dyn Handler>,
    previous: Option<Arc<Node>>,
}

/// An immutable chain of handlers.
///
/// Cloning is cheap and shares every node. Chains are `Send + Sync` and may
/// be served from many threads at once.
#[derive(Clone, Default)]
pub struct Chain {
    last: Option<Arc<Node>>,
}

impl Chain {
    /// Create an empty chain. Serving it does nothing.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Whether no handler has been attached.
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Number of attached handlers.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.last.as_deref(), |node| node.previous.as_deref())
    }

    /// Handlers in the order they run: first attached first.
    pub(crate) fn pending(&self) -> Vec<&dyn Handler> {
        let mut handlers: Vec<&dyn Handler> = Vec::new();
        for node in self.nodes() {
            handlers.push(&*node.handler);
        }
        handlers.reverse();
        handlers
    }
}

impl Builder for Chain {
    fn handle<H>(&self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        Chain {
            last: Some(Arc::new(Node {
                handler: Arc::new(handler),
                previous: self.last.clone(),
            })),
        }
    }
}

impl Handler for Chain {
    /// Serves the first attached handler.
    ///
    /// With a raw transport this starts a new cycle with an empty context.
    /// With a response from another chain the handlers run over that
    /// response's cycle: they share its context, but `next` inside this chain
    /// only walks this chain's own handlers.
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        let pending = self.pending();
        if pending.is_empty() {
            return;
        }

        if let Some(cycle) = response.cycle(Internal) {
            cycle.dispatch(&pending, request);
            return;
        }

        let mut context = Context::new();
        let mut root = ChainResponse::root(response, &mut context);
        tracing::debug!(
            handlers = pending.len(),
            capabilities = %root.capability_set(),
            "starting cycle"
        );
        root.dispatch(&pending, request);
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.len()).finish()
    }
}
