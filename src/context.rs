//! Shared context for the handlers of one request cycle.
//!
//! Every cycle owns exactly one [`Context`] slot holding one untyped value.
//! Any handler reached through the cycle reads and writes it through the
//! response it was served with; the last write wins. Handlers that need
//! several values store an aggregate, such as a map, as the single value.
//!
//! The free functions take the response handle a handler received. They
//! return `None`/`false` when the response was not produced by a chain.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use infuse::{context, Builder, Chain, Handler, Request, Response, ResponseRecorder};
//!
//! fn scores(response: &mut dyn Response) -> Option<&mut HashMap<String, f64>> {
//!     context::get_or_insert_with(response, HashMap::new)
//! }
//!
//! let chain = Chain::new()
//!     .handle_func(|response: &mut dyn Response, request: &Request| {
//!         if let Some(scores) = scores(response) {
//!             scores.insert("auth".to_string(), 0.9);
//!         }
//!         infuse::next(response, request);
//!     })
//!     .handle_func(|response: &mut dyn Response, _: &Request| {
//!         let score = scores(response).and_then(|s| s.get("auth").copied());
//!         write!(response, "{:?}", score).unwrap();
//!     });
//!
//! let mut recorder = ResponseRecorder::new();
//! chain.serve(&mut recorder, &Request::default());
//! assert_eq!(recorder.body_string(), "Some(0.9)");
//! ```

use std::any::Any;
use std::fmt;

use crate::transport::Response;
use crate::transport::sealed::Internal;

/// The single value slot of one request cycle.
///
/// Created empty when a chain is served with a raw transport and dropped when
/// that serve call returns.
#[derive(Default)]
pub struct Context {
    value: Option<Box<dyn Any>>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Whether a value has been set.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&(dyn Any + 'static)> {
        self.value.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut (dyn Any + 'static)> {
        self.value.as_deref_mut()
    }

    /// Replace the value.
    pub fn set<T: Any>(&mut self, value: T) {
        self.value = Some(Box::new(value));
    }

    /// Remove and return the value, leaving the slot empty.
    pub fn take(&mut self) -> Option<Box<dyn Any>> {
        self.value.take()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("set", &self.is_set())
            .finish()
    }
}

fn context_of(response: &mut dyn Response) -> Option<&mut Context> {
    match response.cycle(Internal) {
        Some(cycle) => Some(cycle.context()),
        None => {
            tracing::debug!("context used with a response that is not part of a chain");
            None
        }
    }
}

/// Returns the cycle's context value.
///
/// `None` if no value is set or `response` was not produced by a chain.
pub fn get(response: &mut dyn Response) -> Option<&(dyn Any + 'static)> {
    context_of(response)?.get()
}

/// Returns the cycle's context value if it is a `T`.
pub fn get_as<T: Any>(response: &mut dyn Response) -> Option<&T> {
    get(response)?.downcast_ref::<T>()
}

/// Returns the cycle's context value mutably.
pub fn get_mut(response: &mut dyn Response) -> Option<&mut (dyn Any + 'static)> {
    context_of(response)?.get_mut()
}

/// Returns the cycle's context value mutably if it is a `T`.
pub fn get_mut_as<T: Any>(response: &mut dyn Response) -> Option<&mut T> {
    get_mut(response)?.downcast_mut::<T>()
}

/// Stores `value` as the cycle's context value, replacing any previous one.
///
/// Returns `false` if `response` was not produced by a chain.
pub fn set<T: Any>(response: &mut dyn Response, value: T) -> bool {
    match context_of(response) {
        Some(context) => {
            context.set(value);
            true
        }
        None => false,
    }
}

/// Whether the cycle's context value has been set.
pub fn is_set(response: &mut dyn Response) -> bool {
    context_of(response).map_or(false, |context| context.is_set())
}

/// Removes and returns the cycle's context value.
pub fn take(response: &mut dyn Response) -> Option<Box<dyn Any>> {
    context_of(response)?.take()
}

/// Returns the context value as a `T`, first storing `init()` if the slot is
/// empty or holds a different type.
///
/// `None` only if `response` was not produced by a chain.
pub fn get_or_insert_with<T, F>(response: &mut dyn Response, init: F) -> Option<&mut T>
where
    T: Any,
    F: FnOnce() -> T,
{
    let context = context_of(response)?;
    if !matches!(&context.value, Some(value) if value.is::<T>()) {
        context.set(init());
    }
    context.get_mut()?.downcast_mut::<T>()
}
