//! Pool configuration and alignment arithmetic.

use crate::error::PoolError;

/// Alignment unit for block addresses, in bytes.
///
/// Block sizes are rounded up to a multiple of this before the backing
/// buffer is carved, so every address handed out by the pool satisfies
/// 16-byte alignment and callers may store alignment-sensitive types in
/// their blocks.
pub const BLOCK_ALIGNMENT: usize = 16;

/// Configuration for a [`BlockPool`](crate::BlockPool).
///
/// Captures the requested block size and block count. Validated at pool
/// construction; both values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Requested size of one block in bytes, before alignment rounding.
    pub block_size: usize,
    /// Number of blocks in the pool.
    pub block_count: usize,
}

impl PoolConfig {
    /// Create a config for `block_count` blocks of `block_size` bytes.
    pub fn new(block_size: usize, block_count: usize) -> Self {
        Self {
            block_size,
            block_count,
        }
    }

    /// The block size rounded up to the nearest multiple of
    /// [`BLOCK_ALIGNMENT`].
    ///
    /// Saturates at the top of the `usize` range; a saturating size can
    /// never pass [`validate`](Self::validate), which uses the checked
    /// arithmetic in [`total_bytes`](Self::total_bytes).
    pub fn aligned_block_size(&self) -> usize {
        self.checked_aligned_block_size().unwrap_or(usize::MAX)
    }

    /// Total backing-buffer size in bytes: `aligned_block_size × block_count`.
    ///
    /// Returns `Err(InvalidConfig)` if the rounding or the multiplication
    /// overflows.
    pub fn total_bytes(&self) -> Result<usize, PoolError> {
        self.checked_aligned_block_size()
            .and_then(|size| size.checked_mul(self.block_count))
            .ok_or(PoolError::InvalidConfig {
                block_size: self.block_size,
                block_count: self.block_count,
            })
    }

    fn checked_aligned_block_size(&self) -> Option<usize> {
        self.block_size
            .checked_add(BLOCK_ALIGNMENT - 1)
            .map(|v| v & !(BLOCK_ALIGNMENT - 1))
    }

    /// Check that this configuration describes a usable pool.
    ///
    /// Rejects a zero aligned block size, a zero block count, and any
    /// combination whose total byte size overflows `usize`.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.aligned_block_size() == 0 || self.block_count == 0 {
            return Err(PoolError::InvalidConfig {
                block_size: self.block_size,
                block_count: self.block_count,
            });
        }
        self.total_bytes().map(|_| ())
    }
}
