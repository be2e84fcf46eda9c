//! Thread-safe fixed-size block pool with O(1) acquire/release.
//!
//! A [`BlockPool`] pre-allocates one contiguous buffer, carves it into
//! equally sized 16-byte-aligned blocks, and serves them through a free
//! list. It is built for workloads that repeatedly take and return
//! objects of one size — node pools, fixed-size object caches — where
//! per-allocation trips to the general-purpose allocator are wasted work.
//!
//! # Architecture
//!
//! ```text
//! BlockPool (orchestrator, one Mutex per pool)
//! ├── BackingBuffer (single raw allocation, the only unsafe module)
//! └── FreeList → Slot[] (used flag + next_free index per block)
//! ```
//!
//! Acquire pops the free-list head; release re-derives the slot from the
//! returned address (containment, slot alignment) before pushing it back,
//! so foreign pointers and double releases are detected instead of
//! corrupting the list.
//!
//! # Contract
//!
//! - One block size and one capacity per pool; the pool never grows.
//! - `acquire` fails fast with [`PoolError::Exhausted`] — there is no
//!   blocking variant.
//! - Any number of threads may share a pool by reference; block
//!   *contents* are unsynchronized and belong to the caller.
//! - A pool is move-only. Dropping it frees the buffer once; addresses
//!   still outstanding at that point dangle, so callers must quiesce
//!   first (the borrow checker enforces this for safe callers).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod free_list;
pub mod pool;

// Public re-exports for the primary API surface.
pub use config::{PoolConfig, BLOCK_ALIGNMENT};
pub use error::PoolError;
pub use pool::BlockPool;
