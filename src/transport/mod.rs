//! Transport module - the response/request interface handlers are served with.
//!
//! Provides:
//! - [`Response`] - header/status/body writes plus optional capability accessors
//! - [`Request`] - the request type passed unmodified to every handler
//! - capability traits: [`CloseNotify`], [`Flush`], [`Hijack`], [`ReadFrom`], [`WriteString`]
//! - [`ResponseRecorder`] / [`FlushRecorder`] - in-memory transports for tests and demos
//!
//! # Capability queries
//!
//! Each optional capability has an accessor on [`Response`] returning
//! `Some` when the transport supports it. A transport implements the
//! capability trait and overrides the accessor to return itself:
//!
//! ```
//! use std::io;
//! use http::{HeaderMap, StatusCode};
//! use infuse::transport::{Flush, Response};
//!
//! #[derive(Default)]
//! struct Buffered {
//!     headers: HeaderMap,
//!     pending: Vec<u8>,
//!     sent: Vec<u8>,
//! }
//!
//! impl Response for Buffered {
//!     fn headers_mut(&mut self) -> &mut HeaderMap {
//!         &mut self.headers
//!     }
//!
//!     fn write_head(&mut self, _status: StatusCode) {}
//!
//!     fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         self.pending.extend_from_slice(buf);
//!         Ok(buf.len())
//!     }
//!
//!     fn flusher(&mut self) -> Option<&mut dyn Flush> {
//!         Some(self)
//!     }
//! }
//!
//! impl Flush for Buffered {
//!     fn flush(&mut self) -> io::Result<()> {
//!         self.sent.append(&mut self.pending);
//!         Ok(())
//!     }
//! }
//!
//! let mut response = Buffered::default();
//! response.write_all(b"hello").unwrap();
//! response.flusher().unwrap().flush().unwrap();
//! assert_eq!(response.sent, b"hello");
//! ```

mod recorder;

use std::fmt;
use std::io;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use tokio::sync::watch;

use crate::capability::CapabilitySet;
use crate::chain::Cycle;
use crate::error::Result;

pub use recorder::{FlushRecorder, ResponseRecorder};

pub(crate) mod sealed {
    /// Token restricting [`Response::cycle`](super::Response::cycle) to this crate.
    #[derive(Debug, Clone, Copy)]
    pub struct Internal;
}

/// Request type handed to every handler in a chain.
///
/// Handlers receive it by shared reference; the chain never modifies it.
pub type Request = http::Request<Bytes>;

/// The response side of a transport.
///
/// Only header, status and body writes are required. The capability
/// accessors default to `None`; a transport overrides the ones it supports.
pub trait Response {
    /// Headers to be sent with the response.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sends the status line and headers.
    fn write_head(&mut self, status: StatusCode);

    /// Writes body bytes, returning how many were accepted.
    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Writes the whole buffer, retrying short writes.
    fn write_all(&mut self, mut buf: &[u8]) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write_body(buf) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ))
                }
                Ok(n) => buf = &buf[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Formatted body write, so `write!(response, ...)` works on any response.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match args.as_str() {
            Some(s) => self.write_all(s.as_bytes()),
            None => self.write_all(args.to_string().as_bytes()),
        }
    }

    fn close_notifier(&mut self) -> Option<&mut dyn CloseNotify> {
        None
    }

    fn flusher(&mut self) -> Option<&mut dyn Flush> {
        None
    }

    fn hijacker(&mut self) -> Option<&mut dyn Hijack> {
        None
    }

    fn reader_from(&mut self) -> Option<&mut dyn ReadFrom> {
        None
    }

    fn string_writer(&mut self) -> Option<&mut dyn WriteString> {
        None
    }

    /// The capabilities this response supports.
    ///
    /// Defaults to probing each accessor.
    fn capabilities(&mut self) -> CapabilitySet {
        CapabilitySet::probe(self)
    }

    /// The chain cycle this response belongs to, if any.
    ///
    /// Only responses produced by a [`Chain`](crate::Chain) return `Some`.
    /// The argument cannot be named outside this crate, so transports and
    /// wrappers cannot override or forward this method. A wrapper around a
    /// chain response is therefore not part of the chain: [`next`](crate::next)
    /// returns `false` and the [`context`](crate::context) functions return
    /// `None` when called with it.
    #[doc(hidden)]
    fn cycle(&mut self, _: sealed::Internal) -> Option<&mut dyn Cycle> {
        None
    }
}

/// Notification that the peer has gone away.
pub trait CloseNotify {
    /// Returns a receiver whose value turns `true` once the peer disconnects.
    fn close_notify(&mut self) -> watch::Receiver<bool>;
}

/// Pushing buffered output to the peer.
pub trait Flush {
    fn flush(&mut self) -> io::Result<()>;
}

/// Taking over the raw connection.
///
/// After a successful hijack the transport no longer owns the connection;
/// further writes through the response are the transport's to reject.
pub trait Hijack {
    fn hijack(&mut self) -> Result<Hijacked>;
}

/// Copying a byte source into the response body in bulk.
pub trait ReadFrom {
    /// Reads `src` to exhaustion, returning the number of bytes copied.
    fn read_from(&mut self, src: &mut dyn io::Read) -> io::Result<u64>;
}

/// Writing a string directly.
pub trait WriteString {
    fn write_string(&mut self, s: &str) -> io::Result<usize>;
}

/// A raw bidirectional connection handed out by [`Hijack`].
pub trait Connection: io::Read + io::Write + Send {}

impl<T> Connection for T where T: io::Read + io::Write + Send {}

/// A connection taken over from a transport.
pub struct Hijacked {
    /// The raw connection.
    pub connection: Box<dyn Connection>,
    /// Bytes the transport had read from the connection but not consumed.
    pub buffered: Bytes,
}

impl Hijacked {
    pub fn new(connection: Box<dyn Connection>, buffered: Bytes) -> Self {
        Self {
            connection,
            buffered,
        }
    }
}

impl fmt::Debug for Hijacked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hijacked")
            .field("buffered", &self.buffered.len())
            .finish_non_exhaustive()
    }
}
