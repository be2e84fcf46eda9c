//! The backing buffer: one contiguous raw allocation for the whole pool.
//!
//! This is the only module in the crate that contains `unsafe` code. It
//! wraps a single `std::alloc` allocation and exposes the two things the
//! pool needs from raw memory: the address of a slot, and a validated
//! byte offset for a caller-supplied pointer. Everything above this module
//! works with indices.

use std::alloc::{alloc, dealloc, Layout};
use std::ptr::NonNull;

use crate::config::BLOCK_ALIGNMENT;
use crate::error::PoolError;

/// A contiguous, 16-byte-aligned raw allocation owned for the lifetime of
/// the pool.
///
/// Allocated in one request at construction and freed exactly once on
/// drop. The buffer itself carries no notion of blocks; slot geometry
/// lives in the pool, which always derives addresses as
/// `base + index × aligned_block_size`.
pub struct BackingBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl BackingBuffer {
    /// Allocate `len` bytes aligned to [`BLOCK_ALIGNMENT`].
    ///
    /// Returns `Err(OutOfMemory)` if the system allocator refuses the
    /// request. `len` must be non-zero and already rounded so that
    /// `Layout::from_size_align` accepts it; the pool guarantees this by
    /// validating its config first.
    pub fn new(len: usize) -> Result<Self, PoolError> {
        let layout = Layout::from_size_align(len, BLOCK_ALIGNMENT)
            .map_err(|_| PoolError::OutOfMemory { requested: len })?;
        // SAFETY: layout has non-zero size, checked by the pool's config
        // validation before this is called.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw).ok_or(PoolError::OutOfMemory { requested: len })?;
        Ok(Self { ptr, layout })
    }

    /// Base address of the buffer.
    pub fn base(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Whether the buffer is zero-length. Never true for a live pool.
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Address of the byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not strictly inside the buffer.
    pub fn addr_at(&self, offset: usize) -> NonNull<u8> {
        assert!(offset < self.len(), "offset {offset} outside buffer");
        // SAFETY: offset is in-bounds for the allocation, so the result
        // is a valid non-null pointer into it.
        unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(offset)) }
    }

    /// Byte offset of `addr` within the buffer, or `None` if the address
    /// does not fall inside it.
    ///
    /// Containment is decided by integer comparison against the buffer's
    /// address range; the caller's pointer is never dereferenced.
    pub fn offset_of(&self, addr: usize) -> Option<usize> {
        let base = self.ptr.as_ptr() as usize;
        if addr < base || addr >= base + self.len() {
            return None;
        }
        Some(addr - base)
    }
}

impl Drop for BackingBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc with exactly this layout and
        // is freed only here, once.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

// SAFETY: the buffer is a plain region of bytes with no interior
// bookkeeping. All pool bookkeeping that refers to it is guarded by the
// pool's mutex, and block contents are the caller's responsibility per
// the pool contract.
unsafe impl Send for BackingBuffer {}
// SAFETY: as above — shared references to the buffer only expose its
// address range and length, which never change after construction.
unsafe impl Sync for BackingBuffer {}
