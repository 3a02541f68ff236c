//! Handle-based list operations.
//!
//! A list block is `tag, u64 len, u64 cap, cap * u64 slots`. Growth doubles
//! the capacity into a fresh block at the end of the region and rebinds the
//! list's handle to it; the elements are referenced by handle and never
//! move.

use crate::error::CoraResult;
use crate::handle::Handle;
use crate::state::CoraState;
use crate::value::Tag;

const HEADER: usize = 1 + 8 + 8;
const SLOT: usize = 8;

impl CoraState {
    /// Allocate an empty list.
    pub fn make_list(&mut self) -> CoraResult<Handle> {
        let offset = self.arena.alloc(HEADER)?;
        self.arena.write_u8(offset, Tag::List as u8);
        self.arena.write_u64(offset + 1, 0);
        self.arena.write_u64(offset + 9, 0);
        Ok(self.objects.register(offset))
    }

    /// Append `value` at the end of the list. Amortized O(1).
    pub fn list_append(&mut self, list: Handle, value: Handle) -> CoraResult<()> {
        let Some((offset, len)) = self.list_reserve(list)? else {
            return Ok(());
        };
        self.arena
            .write_u64(offset + HEADER + len as usize * SLOT, value.raw());
        self.arena.write_u64(offset + 1, len + 1);
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements one slot right.
    /// An index past the end clamps to an append.
    pub fn list_insert(&mut self, list: Handle, value: Handle, index: usize) -> CoraResult<()> {
        let Some((offset, len)) = self.list_reserve(list)? else {
            return Ok(());
        };
        let index = index.min(len as usize);
        let slots = offset + HEADER;
        self.arena.copy(
            slots + index * SLOT,
            slots + (index + 1) * SLOT,
            (len as usize - index) * SLOT,
        );
        self.arena.write_u64(slots + index * SLOT, value.raw());
        self.arena.write_u64(offset + 1, len + 1);
        Ok(())
    }

    /// Delete the element at `index`, shifting later elements one slot
    /// left. An index past the end is a no-op, never an error.
    pub fn list_delete(&mut self, list: Handle, index: usize) {
        let Some((offset, len, _)) = self.list_header(list) else {
            return;
        };
        let len = len as usize;
        if index >= len {
            return;
        }
        let slots = offset + HEADER;
        self.arena.copy(
            slots + (index + 1) * SLOT,
            slots + index * SLOT,
            (len - 1 - index) * SLOT,
        );
        self.arena.write_u64(offset + 1, (len - 1) as u64);
    }

    /// Number of elements. O(1); zero for anything that is not a list.
    pub fn list_length(&self, list: Handle) -> usize {
        self.list_header(list)
            .map(|(_, len, _)| len as usize)
            .unwrap_or(0)
    }

    /// Element handle at `index`, if in bounds.
    pub fn list_get(&self, list: Handle, index: usize) -> Option<Handle> {
        let (offset, len, _) = self.list_header(list)?;
        if index >= len as usize {
            return None;
        }
        Some(Handle::from_raw(
            self.arena.read_u64(offset + HEADER + index * SLOT),
        ))
    }

    /// Read-only view over the current element sequence. The view borrows
    /// the state, so any later mutation invalidates it at compile time.
    pub fn list_items(&self, list: Handle) -> ListItems<'_> {
        let (slots, len) = match self.list_header(list) {
            Some((offset, len, _)) => (offset + HEADER, len as usize),
            None => (0, 0),
        };
        ListItems {
            state: self,
            slots,
            index: 0,
            len,
        }
    }

    fn list_header(&self, list: Handle) -> Option<(usize, u64, u64)> {
        let offset = self.objects.offset(list)?;
        if self.arena.read_u8(offset) != Tag::List as u8 {
            return None;
        }
        Some((
            offset,
            self.arena.read_u64(offset + 1),
            self.arena.read_u64(offset + 9),
        ))
    }

    /// Make room for one more element, relocating the list's own block when
    /// its capacity is exhausted. Returns the (possibly new) block offset
    /// and the current length; `None` when `list` is not a list.
    fn list_reserve(&mut self, list: Handle) -> CoraResult<Option<(usize, u64)>> {
        let Some((offset, len, cap)) = self.list_header(list) else {
            return Ok(None);
        };
        if len < cap {
            return Ok(Some((offset, len)));
        }
        let new_cap = if cap == 0 { 4 } else { cap * 2 };
        let new_offset = self.arena.alloc(HEADER + new_cap as usize * SLOT)?;
        self.arena
            .copy(offset, new_offset, HEADER + len as usize * SLOT);
        self.arena.write_u64(new_offset + 9, new_cap);
        self.objects.relocate(list, new_offset);
        Ok(Some((new_offset, len)))
    }
}

/// Lazy iterator over a list's element handles.
#[derive(Clone)]
pub struct ListItems<'a> {
    state: &'a CoraState,
    slots: usize,
    index: usize,
    len: usize,
}

impl<'a> ListItems<'a> {
    pub(crate) fn state(&self) -> &'a CoraState {
        self.state
    }
}

impl Iterator for ListItems<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        if self.index >= self.len {
            return None;
        }
        let raw = self.state.arena.read_u64(self.slots + self.index * SLOT);
        self.index += 1;
        Some(Handle::from_raw(raw))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ListItems<'_> {}
