//! Host-managed memory for the cora object store.
//!
//! Every object payload lives at a byte offset inside one growable region.
//! The region changes size only through a host-supplied [`MemoryHost`], so
//! the embedding controls every byte the runtime uses. Payload blocks are
//! bump-allocated at the end of the region and are never moved or freed
//! individually; a container that outgrows its block gets a fresh block and
//! the handle table is rebound to the new offset (see `handle`).

use crate::error::{CoraError, CoraResult};

/// Host reallocation seam for the backing region.
///
/// Contract, mirrored by every provided host:
/// - on success the first `min(old_len, new_len)` bytes of `region` are
///   preserved;
/// - failure is only allowed for `new_len > 0` and must leave `region`
///   untouched and usable;
/// - `new_len == 0` is a release request: all memory returns to the host.
pub trait MemoryHost {
    fn resize(&mut self, region: &mut Vec<u8>, new_len: usize) -> CoraResult<()>;
}

/// Default host backed by the process heap. Never fails.
#[derive(Debug, Default)]
pub struct HeapHost;

impl MemoryHost for HeapHost {
    fn resize(&mut self, region: &mut Vec<u8>, new_len: usize) -> CoraResult<()> {
        region.resize(new_len, 0);
        if new_len == 0 {
            region.shrink_to_fit();
        }
        Ok(())
    }
}

/// Host that refuses to grow the region past a fixed byte budget.
#[derive(Debug)]
pub struct QuotaHost {
    limit: usize,
}

impl QuotaHost {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl MemoryHost for QuotaHost {
    fn resize(&mut self, region: &mut Vec<u8>, new_len: usize) -> CoraResult<()> {
        if new_len > self.limit {
            return Err(CoraError::NoMemory);
        }
        region.resize(new_len, 0);
        if new_len == 0 {
            region.shrink_to_fit();
        }
        Ok(())
    }
}

/// Host that refuses every growth request. Release still works. Useful for
/// driving the out-of-memory paths in tests.
#[derive(Debug, Default)]
pub struct NoGrowth;

impl MemoryHost for NoGrowth {
    fn resize(&mut self, region: &mut Vec<u8>, new_len: usize) -> CoraResult<()> {
        if new_len > region.len() {
            return Err(CoraError::NoMemory);
        }
        region.resize(new_len, 0);
        if new_len == 0 {
            region.shrink_to_fit();
        }
        Ok(())
    }
}

/// The single growable byte region backing all object payloads.
///
/// All multi-byte fields are little-endian and byte-addressed; nothing in
/// the region is assumed to be aligned. Reads are total: an offset past the
/// current length reads as zero, which decodes as nil. Writes only happen
/// at offsets handed out by [`Arena::alloc`] and re-validated through the
/// container headers, so they index directly.
pub(crate) struct Arena {
    host: Box<dyn MemoryHost>,
    bytes: Vec<u8>,
    released: bool,
}

impl Arena {
    pub fn new(host: Box<dyn MemoryHost>) -> Self {
        Self {
            host,
            bytes: Vec::new(),
            released: false,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Bump-allocate `size` bytes at the end of the region, growing it
    /// through the host. On failure nothing changes and every existing
    /// offset stays valid.
    pub fn alloc(&mut self, size: usize) -> CoraResult<usize> {
        if self.released {
            return Err(CoraError::NoMemory);
        }
        let offset = self.bytes.len();
        let new_len = offset.checked_add(size).ok_or(CoraError::NoMemory)?;
        self.host.resize(&mut self.bytes, new_len)?;
        Ok(offset)
    }

    /// Return all memory to the host. The arena refuses further allocation.
    pub fn release(&mut self) {
        // A release request cannot fail under the host contract.
        let _ = self.host.resize(&mut self.bytes, 0);
        self.bytes.clear();
        self.released = true;
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    pub fn read_u32(&self, offset: usize) -> u32 {
        let mut buf = [0u8; 4];
        if let Some(src) = self.bytes.get(offset..offset + 4) {
            buf.copy_from_slice(src);
        }
        u32::from_le_bytes(buf)
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn read_u64(&self, offset: usize) -> u64 {
        let mut buf = [0u8; 8];
        if let Some(src) = self.bytes.get(offset..offset + 8) {
            buf.copy_from_slice(src);
        }
        u64::from_le_bytes(buf)
    }

    pub fn write_u64(&mut self, offset: usize, value: u64) {
        self.bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
    }

    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        self.bytes
            .get(offset..offset.saturating_add(len))
            .unwrap_or(&[])
    }

    pub fn write_bytes(&mut self, offset: usize, data: &[u8]) {
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Copy `len` bytes from `src` to `dst` inside the region. Overlap is
    /// fine; container shifts rely on it.
    pub fn copy(&mut self, src: usize, dst: usize, len: usize) {
        self.bytes.copy_within(src..src + len, dst);
    }
}
