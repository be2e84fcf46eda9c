//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// Rejected at construction: zero block size, zero block count, or a
    /// pool so large the byte arithmetic overflows `usize`.
    InvalidConfig {
        /// Requested block size in bytes (before alignment rounding).
        block_size: usize,
        /// Requested number of blocks.
        block_count: usize,
    },
    /// The backing-buffer allocation failed.
    OutOfMemory {
        /// Number of bytes requested from the system allocator.
        requested: usize,
    },
    /// No free block is available — the free list is empty.
    Exhausted {
        /// Total number of blocks in the pool.
        capacity: usize,
    },
    /// A released address does not identify a block of this pool: it lies
    /// outside the backing buffer or is not on a slot boundary.
    InvalidPointer {
        /// The offending address.
        addr: usize,
    },
    /// A released address identifies a block that is already free.
    DoubleRelease {
        /// Index of the slot that was already free.
        index: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig {
                block_size,
                block_count,
            } => {
                write!(
                    f,
                    "invalid pool configuration: block_size {block_size}, block_count {block_count}"
                )
            }
            Self::OutOfMemory { requested } => {
                write!(f, "backing buffer allocation of {requested} bytes failed")
            }
            Self::Exhausted { capacity } => {
                write!(f, "pool exhausted: all {capacity} blocks are in use")
            }
            Self::InvalidPointer { addr } => {
                write!(f, "address {addr:#x} is not a block of this pool")
            }
            Self::DoubleRelease { index } => {
                write!(f, "double release: block {index} is already free")
            }
        }
    }
}

impl Error for PoolError {}
