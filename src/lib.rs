//! # infuse
//!
//! Immutable, composable handler chains with explicit continuation and a
//! context shared by all handlers of one request.
//!
//! ## Architecture
//!
//! - **Chains** ([`Chain`]): built incrementally with [`Builder`]; attaching a
//!   handler returns a new chain and leaves the old one untouched, so chains
//!   can be shared, branched and served from many threads at once
//! - **Continuation** ([`next`]): a handler decides whether, and how many
//!   times, the rest of the chain runs
//! - **Context** ([`context`]): one value slot per request, visible to every
//!   handler of that request
//! - **Capabilities** ([`CapabilitySet`]): the response a handler receives
//!   supports exactly the optional capabilities (flush, hijack, close
//!   notification, bulk read, string write) of the transport underneath
//!
//! Serving is synchronous: handlers and continuations are plain calls on the
//! caller's stack. Hosts run many requests concurrently by serving the same
//! chain from many threads or tasks.
//!
//! ## Example
//!
//! ```
//! use infuse::{context, Builder, Chain, Handler, Request, Response, ResponseRecorder};
//!
//! let chain = Chain::new()
//!     .handle_func(|response: &mut dyn Response, request: &Request| {
//!         context::set(response, String::from("bob"));
//!         if !infuse::next(response, request) {
//!             write!(response, "nothing attached").unwrap();
//!         }
//!     })
//!     .handle_func(|response: &mut dyn Response, _: &Request| {
//!         let user = context::get_as::<String>(response).cloned().unwrap_or_default();
//!         write!(response, "Hello {}!", user).unwrap();
//!     });
//!
//! let mut recorder = ResponseRecorder::new();
//! chain.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "Hello bob!");
//! ```

pub mod capability;
pub mod chain;
pub mod context;
pub mod error;
pub mod mock;
pub mod transport;

mod response;

pub use capability::{Capability, CapabilitySet};
pub use chain::{handler_fn, next, Builder, Chain, Cycle, Handler, HandlerFn, Stacked};
pub use context::Context;
pub use error::{InfuseError, Result};
pub use transport::{FlushRecorder, Request, Response, ResponseRecorder};
