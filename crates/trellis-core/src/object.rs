//! Object identifiers.
//!
//! Every widget owns an [`ObjectId`] that stays stable for its whole lifetime.
//! Ids are how the focus manager, overlay stack and event router refer to
//! widgets without holding references into the widget tree.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh identifiers. Starts at 1 so ids fit in a `NonZeroU64`.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a widget or other addressable object.
///
/// Identifiers are never reused within a process. They carry no ownership:
/// holding an `ObjectId` does not keep the object alive, and looking up a
/// dropped object simply finds nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU64);

impl ObjectId {
    /// Allocate a new, never before seen identifier.
    pub fn next() -> Self {
        let raw = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and would need 2^64 allocations to wrap.
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// The raw numeric value, for logging and debug output.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
