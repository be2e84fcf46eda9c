//! The block pool: fixed-capacity, fixed-size, thread-safe.

use std::fmt;
use std::ptr::NonNull;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::buffer::BackingBuffer;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::free_list::FreeList;

/// A pre-allocated pool of equally sized memory blocks with O(1)
/// acquire/release.
///
/// The pool carves one contiguous backing buffer into `block_count` slots
/// of `aligned_block_size` bytes each and threads the free slots into a
/// free list. [`acquire`](Self::acquire) pops the head and returns the
/// slot's address; [`release`](Self::release) validates the address
/// against pool membership, then pushes the slot back.
///
/// All bookkeeping is serialized by one mutex per pool, so any number of
/// threads may share a pool by reference. What callers *store* in their
/// blocks is not covered by that lock — concurrent use of the same block
/// needs external synchronization, exactly as with any raw allocation.
///
/// The pool is move-only: it owns the backing buffer and the slot array
/// outright, and cloning either would double-free on drop. Slot indices
/// are `u32`, so a pool holds at most `u32::MAX` blocks; larger counts
/// are rejected at construction.
///
/// # Examples
///
/// ```
/// use fixpool::BlockPool;
///
/// let pool = BlockPool::new(24, 4)?;
/// let block = pool.acquire()?;
/// assert_eq!(pool.available(), 3);
/// pool.release(block.as_ptr())?;
/// assert_eq!(pool.available(), 4);
/// # Ok::<(), fixpool::PoolError>(())
/// ```
pub struct BlockPool {
    buffer: BackingBuffer,
    state: Mutex<FreeList>,
    aligned_block_size: usize,
    block_count: usize,
}

impl BlockPool {
    /// Create a pool of `block_count` blocks of `block_size` bytes.
    ///
    /// `block_size` is rounded up to a multiple of
    /// [`BLOCK_ALIGNMENT`](crate::BLOCK_ALIGNMENT) first. Fails with
    /// `InvalidConfig` if either value is zero (or the total size
    /// overflows), and with `OutOfMemory` if the backing buffer cannot
    /// be allocated.
    pub fn new(block_size: usize, block_count: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(block_size, block_count))
    }

    /// Create a pool from an explicit [`PoolConfig`].
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let count: u32 =
            config
                .block_count
                .try_into()
                .map_err(|_| PoolError::InvalidConfig {
                    block_size: config.block_size,
                    block_count: config.block_count,
                })?;
        let buffer = BackingBuffer::new(config.total_bytes()?)?;
        Ok(Self {
            buffer,
            state: Mutex::new(FreeList::new(count)),
            aligned_block_size: config.aligned_block_size(),
            block_count: config.block_count,
        })
    }

    /// Take one free block out of the pool.
    ///
    /// Returns the block's address, stable until the matching
    /// [`release`](Self::release). Fails with `Exhausted` when no block
    /// is free; the call never blocks waiting for one.
    ///
    /// The returned region is `block_size()` bytes, 16-byte aligned, and
    /// uninitialized.
    pub fn acquire(&self) -> Result<NonNull<u8>, PoolError> {
        let index = self.state().pop().ok_or(PoolError::Exhausted {
            capacity: self.block_count,
        })?;
        Ok(self.buffer.addr_at(index as usize * self.aligned_block_size))
    }

    /// Return a block to the pool.
    ///
    /// `addr` must be an address previously returned by
    /// [`acquire`](Self::acquire) on this pool. A null pointer is a
    /// silent no-op. The slot is recomputed from the address itself —
    /// containment in the backing buffer and slot alignment are checked
    /// before any bookkeeping is touched, so a bad pointer can never
    /// corrupt the free list. Fails with `InvalidPointer` for addresses
    /// the pool does not own and `DoubleRelease` for blocks already free.
    pub fn release(&self, addr: *mut u8) -> Result<(), PoolError> {
        if addr.is_null() {
            return Ok(());
        }
        let index = self.slot_index(addr as usize)?;
        self.state().push(index)
    }

    /// Number of blocks currently free.
    ///
    /// Counted under the pool lock by scanning the slot array, so the
    /// value is exact at the instant of the call. With other threads
    /// active it is of course stale by the time it is read.
    pub fn available(&self) -> usize {
        self.state().available()
    }

    /// Size of each block in bytes, after alignment rounding.
    pub fn block_size(&self) -> usize {
        self.aligned_block_size
    }

    /// Total number of blocks in the pool.
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Map a caller address to its slot index, validating pool
    /// membership.
    ///
    /// The buffer is exactly `aligned_block_size × block_count` bytes,
    /// so a contained, slot-aligned offset always yields an in-range
    /// index.
    fn slot_index(&self, addr: usize) -> Result<u32, PoolError> {
        let offset = self
            .buffer
            .offset_of(addr)
            .ok_or(PoolError::InvalidPointer { addr })?;
        if offset % self.aligned_block_size != 0 {
            // Interior pointer: contained, but not the start of a slot.
            return Err(PoolError::InvalidPointer { addr });
        }
        Ok((offset / self.aligned_block_size) as u32)
    }

    /// Lock the free list, recovering from poisoning.
    ///
    /// No caller code runs while the lock is held and no lock-holding
    /// path allocates or panics mid-mutation, so a poisoned list is
    /// still consistent.
    fn state(&self) -> MutexGuard<'_, FreeList> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for BlockPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockPool")
            .field("block_size", &self.aligned_block_size)
            .field("block_count", &self.block_count)
            .field("available", &self.available())
            .finish()
    }
}
