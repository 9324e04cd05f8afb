//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use tokio::sync::watch;

use infuse::transport::{CloseNotify, Flush, Hijack, Hijacked, ReadFrom, WriteString};
use infuse::{Handler, InfuseError, Request, Response, ResponseRecorder};

/// Handler that reports each step and calls `next` `nexts` times.
pub fn build_handler(
    name: &'static str,
    nexts: usize,
) -> impl Fn(&mut dyn Response, &Request) + Send + Sync + 'static {
    move |response, request| {
        writeln!(response, "start {}", name).unwrap();
        for _ in 0..nexts {
            writeln!(response, "attempting next for {}", name).unwrap();
            if infuse::next(response, request) {
                writeln!(response, "finished next for {}", name).unwrap();
            } else {
                writeln!(response, "no next for {}", name).unwrap();
            }
        }
        writeln!(response, "end {}", name).unwrap();
    }
}

/// Serves `handler` with a fresh [`ResponseRecorder`] and returns the body.
pub fn serve<H: Handler + ?Sized>(handler: &H) -> String {
    let mut recorder = ResponseRecorder::new();
    handler.serve(&mut recorder, &Request::default());
    recorder.body_string()
}

/// Transport supporting every optional capability.
///
/// Each capability call is reported in the body.
pub struct Instrumented {
    recorder: ResponseRecorder,
    closed: watch::Sender<bool>,
    hijacked: bool,
}

impl Instrumented {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            recorder: ResponseRecorder::new(),
            closed,
            hijacked: false,
        }
    }

    /// Signals every close notification receiver handed out so far.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn body_string(&self) -> String {
        self.recorder.body_string()
    }
}

impl Default for Instrumented {
    fn default() -> Self {
        Self::new()
    }
}

impl Response for Instrumented {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.recorder.headers_mut()
    }

    fn write_head(&mut self, status: StatusCode) {
        self.recorder.write_head(status)
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.recorder.write_body(buf)
    }

    fn close_notifier(&mut self) -> Option<&mut dyn CloseNotify> {
        Some(self)
    }

    fn flusher(&mut self) -> Option<&mut dyn Flush> {
        Some(self)
    }

    fn hijacker(&mut self) -> Option<&mut dyn Hijack> {
        Some(self)
    }

    fn reader_from(&mut self) -> Option<&mut dyn ReadFrom> {
        Some(self)
    }

    fn string_writer(&mut self) -> Option<&mut dyn WriteString> {
        Some(self)
    }
}

impl CloseNotify for Instrumented {
    fn close_notify(&mut self) -> watch::Receiver<bool> {
        let _ = writeln!(self.recorder, "CloseNotify called");
        self.closed.subscribe()
    }
}

impl Flush for Instrumented {
    fn flush(&mut self) -> io::Result<()> {
        writeln!(self.recorder, "Flush called")
    }
}

impl Hijack for Instrumented {
    fn hijack(&mut self) -> infuse::Result<Hijacked> {
        if self.hijacked {
            return Err(InfuseError::AlreadyHijacked);
        }
        self.hijacked = true;
        writeln!(self.recorder, "Hijack called")?;
        Ok(Hijacked::new(
            Box::new(io::Cursor::new(Vec::new())),
            Bytes::new(),
        ))
    }
}

impl ReadFrom for Instrumented {
    fn read_from(&mut self, src: &mut dyn io::Read) -> io::Result<u64> {
        let mut data = String::new();
        let n = io::Read::read_to_string(src, &mut data)?;
        writeln!(self.recorder, "ReadFrom called with {}", data)?;
        Ok(n as u64)
    }
}

impl WriteString for Instrumented {
    fn write_string(&mut self, s: &str) -> io::Result<usize> {
        writeln!(self.recorder, "WriteString called with {}", s)?;
        Ok(s.len())
    }
}
