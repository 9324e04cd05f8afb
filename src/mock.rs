//! Test double for code that builds chains.
//!
//! [`MockChain`] implements [`Builder`] like [`Chain`](crate::Chain), but
//! serving it does not run the attached handlers. It calls a stub with them
//! instead, so a test can check what the code under test attached and drive
//! the handlers however it likes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use infuse::mock::MockChain;
//! use infuse::{Builder, Handler, Request, Response, ResponseRecorder};
//!
//! fn install<B: Builder>(chain: B) -> B {
//!     chain.handle_func(|response: &mut dyn Response, _: &Request| {
//!         write!(response, "installed;").unwrap();
//!     })
//! }
//!
//! let mock = MockChain::new().with_stub(
//!     |response: &mut dyn Response, request: &Request, handlers: &[Arc<dyn Handler>]| {
//!         write!(response, "{} handler(s):", handlers.len()).unwrap();
//!         for handler in handlers {
//!             handler.serve(response, request);
//!         }
//!     },
//! );
//!
//! let chain = install(mock);
//! let mut recorder = ResponseRecorder::new();
//! chain.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "1 handler(s):installed;");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::chain::{Builder, Handler};
use crate::transport::{Request, Response};

/// Stub called when a [`MockChain`] is served, with the handlers attached so far.
pub type StubFn = dyn Fn(&mut dyn Response, &Request, &[Arc<dyn Handler>]) + Send + Sync;

/// A chain that records attached handlers and hands them to a stub.
///
/// Chains derived from a mock with [`Builder`] methods inherit its stub.
#[derive(Clone, Default)]
pub struct MockChain {
    handlers: Vec<Arc<dyn Handler>>,
    stub: Option<Arc<StubFn>>,
}

impl MockChain {
    /// Create a mock with no handlers and no stub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stub called when this mock is served.
    pub fn stub<F>(&mut self, stub: F)
    where
        F: Fn(&mut dyn Response, &Request, &[Arc<dyn Handler>]) + Send + Sync + 'static,
    {
        self.stub = Some(Arc::new(stub));
    }

    /// Same as [`stub`](Self::stub), builder style.
    pub fn with_stub<F>(mut self, stub: F) -> Self
    where
        F: Fn(&mut dyn Response, &Request, &[Arc<dyn Handler>]) + Send + Sync + 'static,
    {
        self.stub(stub);
        self
    }

    /// Handlers attached so far, in attachment order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn has_stub(&self) -> bool {
        self.stub.is_some()
    }
}

impl Builder for MockChain {
    fn handle<H>(&self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        let mut handlers = self.handlers.clone();
        handlers.push(Arc::new(handler));
        MockChain {
            handlers,
            stub: self.stub.clone(),
        }
    }
}

impl Handler for MockChain {
    /// Calls the stub with the attached handlers.
    ///
    /// # Panics
    ///
    /// Panics if no stub was set.
    fn serve(&self, response: &mut dyn Response, request: &Request) {
        match &self.stub {
            Some(stub) => stub(response, request, self.handlers.as_slice()),
            None => panic!("MockChain served without a stub"),
        }
    }
}

impl fmt::Debug for MockChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockChain")
            .field("handlers", &self.handlers.len())
            .field("stub", &self.has_stub())
            .finish()
    }
}
