//! Optional transport capabilities.
//!
//! A transport may support any subset of five optional behaviors on top of
//! plain header/status/body writes. A [`CapabilitySet`] records which ones a
//! transport supports; the chain response captures it once when a cycle starts
//! and consults it on every capability call, so the set visible to a handler
//! is the transport's own set at any nesting depth.
//!
//! # Example
//!
//! ```
//! use infuse::{Capability, CapabilitySet, ResponseRecorder, Response};
//!
//! let mut recorder = ResponseRecorder::new();
//! assert_eq!(recorder.capabilities(), CapabilitySet::NONE);
//!
//! let set = CapabilitySet::NONE.with(Capability::Flush);
//! assert_eq!(set, CapabilitySet::FLUSH_ONLY);
//! assert!(!set.contains(Capability::Hijack));
//! ```

use std::fmt;

use crate::transport::Response;

/// One optional transport capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Notification when the peer goes away.
    CloseNotify,
    /// Pushing buffered output to the peer.
    Flush,
    /// Taking over the raw connection.
    Hijack,
    /// Copying a byte source into the response in bulk.
    ReadFrom,
    /// Writing a string without an intermediate byte copy.
    WriteString,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 5] = [
        Capability::CloseNotify,
        Capability::Flush,
        Capability::Hijack,
        Capability::ReadFrom,
        Capability::WriteString,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Stable lowercase name, used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Capability::CloseNotify => "close_notify",
            Capability::Flush => "flush",
            Capability::Hijack => "hijack",
            Capability::ReadFrom => "read_from",
            Capability::WriteString => "write_string",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The exact set of capabilities a transport supports.
///
/// [`NONE`](Self::NONE), [`FLUSH_ONLY`](Self::FLUSH_ONLY) and
/// [`ALL`](Self::ALL) are the common shapes; any other combination is
/// equally valid and is forwarded exactly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// No optional capability.
    pub const NONE: CapabilitySet = CapabilitySet(0);

    /// Flush and nothing else.
    pub const FLUSH_ONLY: CapabilitySet = CapabilitySet(Capability::Flush.bit());

    /// All five capabilities.
    pub const ALL: CapabilitySet = CapabilitySet(
        Capability::CloseNotify.bit()
            | Capability::Flush.bit()
            | Capability::Hijack.bit()
            | Capability::ReadFrom.bit()
            | Capability::WriteString.bit(),
    );

    /// Returns a copy of this set with `capability` added.
    #[inline]
    pub const fn with(self, capability: Capability) -> Self {
        CapabilitySet(self.0 | capability.bit())
    }

    /// Returns a copy of this set with `capability` removed.
    #[inline]
    pub const fn without(self, capability: Capability) -> Self {
        CapabilitySet(self.0 & !capability.bit())
    }

    #[inline]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of capabilities in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the capabilities in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Asks each capability accessor of `response` whether it is present.
    ///
    /// This is the default for [`Response::capabilities`]; transports rarely
    /// need to call it directly.
    pub fn probe<R: Response + ?Sized>(response: &mut R) -> Self {
        let mut set = CapabilitySet::NONE;
        if response.close_notifier().is_some() {
            set = set.with(Capability::CloseNotify);
        }
        if response.flusher().is_some() {
            set = set.with(Capability::Flush);
        }
        if response.hijacker().is_some() {
            set = set.with(Capability::Hijack);
        }
        if response.reader_from().is_some() {
            set = set.with(Capability::ReadFrom);
        }
        if response.string_writer().is_some() {
            set = set.with(Capability::WriteString);
        }
        set
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CapabilitySet::NONE, |set, capability| set.with(capability))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for capability in self.iter() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(capability.name())?;
            first = false;
        }
        Ok(())
    }
}
