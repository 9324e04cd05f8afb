//! In-memory transports that record what a handler wrote.
//!
//! [`ResponseRecorder`] supports no optional capability; [`FlushRecorder`]
//! supports exactly [`Flush`]. Both are meant for tests, demos and hosts that
//! buffer a whole response before sending it.
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use infuse::{Response, ResponseRecorder};
//!
//! let mut recorder = ResponseRecorder::new();
//! recorder.write_head(StatusCode::CREATED);
//! write!(recorder, "id={}", 7).unwrap();
//!
//! assert_eq!(recorder.status(), StatusCode::CREATED);
//! assert_eq!(recorder.body_string(), "id=7");
//! ```

use std::io;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};

use super::{Flush, Response};

/// Records status, headers and body in memory.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far; `200 OK` if the body was written without one,
    /// or if nothing was written at all.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Whether the status line has been sent.
    pub fn head_written(&self) -> bool {
        self.status.is_some()
    }

    /// Recorded headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Recorded body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Recorded body as text; invalid UTF-8 is replaced.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consume the recorder and take the body.
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }
}

impl Response for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        if let Some(sent) = self.status {
            tracing::debug!(%sent, ignored = %status, "superfluous write_head");
            return;
        }
        self.status = Some(status);
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// A [`ResponseRecorder`] that also supports [`Flush`].
///
/// Each flush records how much of the body had been written at that point.
#[derive(Debug, Default)]
pub struct FlushRecorder {
    recorder: ResponseRecorder,
    flushes: Vec<usize>,
}

impl FlushRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying recorder.
    pub fn recorder(&self) -> &ResponseRecorder {
        &self.recorder
    }

    /// Body length at each flush, in order.
    pub fn flushes(&self) -> &[usize] {
        &self.flushes
    }

    /// Consume and return the underlying recorder.
    pub fn into_recorder(self) -> ResponseRecorder {
        self.recorder
    }
}

impl Response for FlushRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.recorder.headers_mut()
    }

    fn write_head(&mut self, status: StatusCode) {
        self.recorder.write_head(status)
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.recorder.write_body(buf)
    }

    fn flusher(&mut self) -> Option<&mut dyn Flush> {
        Some(self)
    }
}

impl Flush for FlushRecorder {
    fn flush(&mut self) -> io::Result<()> {
        self.flushes.push(self.recorder.body.len());
        Ok(())
    }
}
