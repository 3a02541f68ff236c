//! Handle-based map operations.
//!
//! A map block is `tag, u64 len, u64 cap, cap * (u64 name handle,
//! u64 value handle)`. Names are string objects in the region, unique
//! within one map, kept in insertion order. Lookup is a linear scan: the
//! key sets carried here (record fields, module namespaces) are small, and
//! nothing in the contract promises more than insertion order and
//! uniqueness.

use crate::error::CoraResult;
use crate::handle::Handle;
use crate::state::CoraState;
use crate::value::Tag;

const HEADER: usize = 1 + 8 + 8;
const ENTRY: usize = 16;

impl CoraState {
    /// Allocate an empty map.
    pub fn make_map(&mut self) -> CoraResult<Handle> {
        let offset = self.arena.alloc(HEADER)?;
        self.arena.write_u8(offset, Tag::Map as u8);
        self.arena.write_u64(offset + 1, 0);
        self.arena.write_u64(offset + 9, 0);
        Ok(self.objects.register(offset))
    }

    /// Bind `name` to `value`. A present name is overwritten in place, its
    /// position unchanged; a new name is appended at the end. Fails with
    /// `NoMemory` only when growth fails, and then the map is unchanged.
    pub fn map_insert(&mut self, map: Handle, name: &str, value: Handle) -> CoraResult<()> {
        let Some((offset, len, _)) = self.map_header(map) else {
            return Ok(());
        };
        for i in 0..len as usize {
            let entry = offset + HEADER + i * ENTRY;
            let bound = Handle::from_raw(self.arena.read_u64(entry));
            if self.string_at(bound) == Some(name) {
                self.arena.write_u64(entry + 8, value.raw());
                return Ok(());
            }
        }
        // New name: the name object is allocated first; a growth failure
        // after that leaves the map observably unchanged.
        let name_handle = self.make_string(name)?;
        let Some((offset, len)) = self.map_reserve(map)? else {
            return Ok(());
        };
        let entry = offset + HEADER + len as usize * ENTRY;
        self.arena.write_u64(entry, name_handle.raw());
        self.arena.write_u64(entry + 8, value.raw());
        self.arena.write_u64(offset + 1, len + 1);
        Ok(())
    }

    /// Remove the binding for `name`, shifting later pairs one entry left.
    /// An absent name is a no-op, never an error.
    pub fn map_delete(&mut self, map: Handle, name: &str) {
        let Some((offset, len, _)) = self.map_header(map) else {
            return;
        };
        let len = len as usize;
        let Some(index) = (0..len).find(|&i| {
            let bound = Handle::from_raw(self.arena.read_u64(offset + HEADER + i * ENTRY));
            self.string_at(bound) == Some(name)
        }) else {
            return;
        };
        let entries = offset + HEADER;
        self.arena.copy(
            entries + (index + 1) * ENTRY,
            entries + index * ENTRY,
            (len - 1 - index) * ENTRY,
        );
        self.arena.write_u64(offset + 1, (len - 1) as u64);
    }

    /// Handle bound to `name`, if present.
    pub fn map_get(&self, map: Handle, name: &str) -> Option<Handle> {
        let (offset, len, _) = self.map_header(map)?;
        (0..len as usize).find_map(|i| {
            let entry = offset + HEADER + i * ENTRY;
            let bound = Handle::from_raw(self.arena.read_u64(entry));
            if self.string_at(bound) == Some(name) {
                Some(Handle::from_raw(self.arena.read_u64(entry + 8)))
            } else {
                None
            }
        })
    }

    /// Number of pairs. O(1); zero for anything that is not a map.
    pub fn map_length(&self, map: Handle) -> usize {
        self.map_header(map)
            .map(|(_, len, _)| len as usize)
            .unwrap_or(0)
    }

    /// Read-only pairs in insertion order. The view borrows the state, so
    /// any later mutation invalidates it at compile time.
    pub fn map_pairs(&self, map: Handle) -> MapPairs<'_> {
        let (entries, len) = match self.map_header(map) {
            Some((offset, len, _)) => (offset + HEADER, len as usize),
            None => (0, 0),
        };
        MapPairs {
            state: self,
            entries,
            index: 0,
            len,
        }
    }

    fn map_header(&self, map: Handle) -> Option<(usize, u64, u64)> {
        let offset = self.objects.offset(map)?;
        if self.arena.read_u8(offset) != Tag::Map as u8 {
            return None;
        }
        Some((
            offset,
            self.arena.read_u64(offset + 1),
            self.arena.read_u64(offset + 9),
        ))
    }

    fn map_reserve(&mut self, map: Handle) -> CoraResult<Option<(usize, u64)>> {
        let Some((offset, len, cap)) = self.map_header(map) else {
            return Ok(None);
        };
        if len < cap {
            return Ok(Some((offset, len)));
        }
        let new_cap = if cap == 0 { 4 } else { cap * 2 };
        let new_offset = self.arena.alloc(HEADER + new_cap as usize * ENTRY)?;
        self.arena
            .copy(offset, new_offset, HEADER + len as usize * ENTRY);
        self.arena.write_u64(new_offset + 9, new_cap);
        self.objects.relocate(map, new_offset);
        Ok(Some((new_offset, len)))
    }
}

/// Lazy iterator over a map's (name, value) pairs, insertion-ordered.
#[derive(Clone)]
pub struct MapPairs<'a> {
    state: &'a CoraState,
    entries: usize,
    index: usize,
    len: usize,
}

impl<'a> MapPairs<'a> {
    pub(crate) fn state(&self) -> &'a CoraState {
        self.state
    }
}

impl<'a> Iterator for MapPairs<'a> {
    type Item = (&'a str, Handle);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let entry = self.entries + self.index * ENTRY;
        self.index += 1;
        let name = Handle::from_raw(self.state.arena.read_u64(entry));
        let value = Handle::from_raw(self.state.arena.read_u64(entry + 8));
        Some((self.state.string_at(name).unwrap_or_default(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MapPairs<'_> {}
