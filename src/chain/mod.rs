//! Chain module - building chains and serving them.
//!
//! Provides:
//! - [`Handler`] - the contract every handler and every chain implements
//! - [`Chain`] / [`Builder`] - immutable chains and the fluent API that extends them
//! - [`next`] - continuing a chain from inside a handler
//! - [`Cycle`] - one request cycle as seen through a chain's response
//!
//! # Example
//!
//! ```
//! use infuse::{Builder, Chain, Handler, Request, Response, ResponseRecorder};
//!
//! let chain = Chain::new()
//!     .handle_func(|response: &mut dyn Response, request: &Request| {
//!         write!(response, "<").unwrap();
//!         infuse::next(response, request);
//!         write!(response, ">").unwrap();
//!     })
//!     .stack_func(|response: &mut dyn Response, _: &Request| {
//!         // knows nothing about next(); stack continues for it
//!         write!(response, "body").unwrap();
//!     })
//!     .handle_func(|response: &mut dyn Response, _: &Request| {
//!         write!(response, "!").unwrap();
//!     });
//!
//! let mut recorder = ResponseRecorder::new();
//! chain.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "<body!>");
//! ```

mod continuation;
mod handler;
mod node;

pub use continuation::{next, remaining, Cycle};
pub use handler::{handler_fn, Handler, HandlerFn, Stacked};
pub use node::{Builder, Chain};
