//! The response handed to handlers inside a chain.
//!
//! [`ChainResponse`] wraps the transport a chain was served with. It carries
//! the cycle's context and the handlers still pending for the current handler,
//! and re-exposes the transport's optional capabilities.
//!
//! Every `ChainResponse` of a cycle points straight at the transport, never at
//! another `ChainResponse`, and all of them hold the capability set captured
//! once when the cycle started. A handler nested any number of levels deep
//! therefore sees exactly the capabilities of the transport: each accessor
//! answers from the captured set and forwards to the transport, nothing is
//! emulated and nothing is hidden.

use std::io;

use http::{HeaderMap, StatusCode};

use crate::capability::{Capability, CapabilitySet};
use crate::chain::{Cycle, Handler};
use crate::context::Context;
use crate::transport::sealed::Internal;
use crate::transport::{CloseNotify, Flush, Hijack, ReadFrom, Response, WriteString};

pub(crate) struct ChainResponse<'a> {
    pub(crate) transport: &'a mut dyn Response,
    pub(crate) context: &'a mut Context,
    pub(crate) pending: &'a [&'a dyn Handler],
    pub(crate) capabilities: CapabilitySet,
}

impl<'a> ChainResponse<'a> {
    /// Wraps a raw transport at the start of a cycle.
    ///
    /// The transport's capabilities are queried here and nowhere else.
    pub(crate) fn root(transport: &'a mut dyn Response, context: &'a mut Context) -> Self {
        let capabilities = transport.capabilities();
        Self {
            transport,
            context,
            pending: &[],
            capabilities,
        }
    }

    pub(crate) fn capability_set(&self) -> CapabilitySet {
        self.capabilities
    }

    #[inline]
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

impl Response for ChainResponse<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.transport.headers_mut()
    }

    fn write_head(&mut self, status: StatusCode) {
        self.transport.write_head(status)
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.transport.write_body(buf)
    }

    fn close_notifier(&mut self) -> Option<&mut dyn CloseNotify> {
        if !self.supports(Capability::CloseNotify) {
            return None;
        }
        self.transport.close_notifier()
    }

    fn flusher(&mut self) -> Option<&mut dyn Flush> {
        if !self.supports(Capability::Flush) {
            return None;
        }
        self.transport.flusher()
    }

    fn hijacker(&mut self) -> Option<&mut dyn Hijack> {
        if !self.supports(Capability::Hijack) {
            return None;
        }
        self.transport.hijacker()
    }

    fn reader_from(&mut self) -> Option<&mut dyn ReadFrom> {
        if !self.supports(Capability::ReadFrom) {
            return None;
        }
        self.transport.reader_from()
    }

    fn string_writer(&mut self) -> Option<&mut dyn WriteString> {
        if !self.supports(Capability::WriteString) {
            return None;
        }
        self.transport.string_writer()
    }

    fn capabilities(&mut self) -> CapabilitySet {
        self.capabilities
    }

    fn cycle(&mut self, _: Internal) -> Option<&mut dyn Cycle> {
        Some(self)
    }
}
