//! Stable handles over the relocatable region.
//!
//! A handle is the only identity callers ever hold: an index into a table
//! of byte offsets. When a container outgrows its block the payload moves,
//! the table entry is rewritten, and the handle value stays the same. That
//! is what gives the embedding pointer-like stability without pointers.
//!
//! ## Interned handles
//!
//! Three values are interned and always map to the same handle:
//! - `nil` → `Handle::NIL`
//! - `true` → `Handle::TRUE`
//! - `false` → `Handle::FALSE`
//!
//! Interned handles never touch the region: the store decodes them before
//! consulting the offset table, so they stay valid even after a release.
//! `Handle::NIL` doubles as the "no value" return of native functions.

/// Number of table slots reserved for the interned singletons.
pub(crate) const INTERNED_SLOTS: usize = 3;

/// An opaque, stable identity for a script-visible object.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    /// The interned nil singleton.
    pub const NIL: Handle = Handle(0);
    /// The interned `true` singleton.
    pub const TRUE: Handle = Handle(1);
    /// The interned `false` singleton.
    pub const FALSE: Handle = Handle(2);

    pub(crate) const fn from_index(index: usize) -> Self {
        Handle(index as u64)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw integer form, as stored inside container slots.
    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }

    pub fn is_nil(self) -> bool {
        self == Handle::NIL
    }
}

/// Maps each handle to the current byte offset of its encoded payload.
///
/// Registration is monotonic and slots are never recycled within one state
/// lifetime, so a stale handle from a dead object can never alias a live
/// one. The table lives outside the region, the way `cora_state` keeps its
/// `objects` array beside `memory`.
#[derive(Debug)]
pub(crate) struct HandleTable {
    offsets: Vec<usize>,
}

impl HandleTable {
    pub fn new() -> Self {
        // Seed the interned slots; their offsets are never read.
        Self {
            offsets: vec![0; INTERNED_SLOTS],
        }
    }

    /// Assign a fresh handle bound to `offset`.
    pub fn register(&mut self, offset: usize) -> Handle {
        let handle = Handle::from_index(self.offsets.len());
        self.offsets.push(offset);
        handle
    }

    /// Current payload offset for `handle`. Interned and unknown handles
    /// have no payload.
    pub fn offset(&self, handle: Handle) -> Option<usize> {
        if handle.index() < INTERNED_SLOTS {
            return None;
        }
        self.offsets.get(handle.index()).copied()
    }

    /// Rebind `handle` to a relocated payload. Only the table entry moves;
    /// the handle value callers hold is untouched.
    pub fn relocate(&mut self, handle: Handle, new_offset: usize) {
        if let Some(slot) = self.offsets.get_mut(handle.index()) {
            *slot = new_offset;
        }
    }
}
