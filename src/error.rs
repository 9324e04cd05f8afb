//! Error types for infuse.
//!
//! Continuation and context operations never fail with an error: they report
//! `false` or `None` (see [`next`](crate::next) and [`context`](crate::context)).
//! `InfuseError` is the vocabulary transports use for the fallible capability
//! calls, such as taking over the connection.

use thiserror::Error;

/// Main error type for transport capability calls.
#[derive(Debug, Error)]
pub enum InfuseError {
    /// I/O error on the underlying connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was already taken over by an earlier hijack.
    #[error("Connection already hijacked")]
    AlreadyHijacked,

    /// The peer closed the connection before it could be taken over.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using InfuseError.
pub type Result<T> = std::result::Result<T, InfuseError>;
