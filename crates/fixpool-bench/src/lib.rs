//! Benchmark profiles and utilities for the fixpool block pool.
//!
//! Provides pre-built pools and helpers shared by the benchmarks and the
//! walkthrough example:
//!
//! - [`burst_pool`]: 100 000 int-sized blocks, for tight acquire/release
//!   loops against a general-purpose-allocator baseline
//! - [`shared_pool`]: 10 000 int-sized blocks, for the multi-thread
//!   churn scenario
//! - [`shuffled_release_order`]: deterministic shuffled indices, so churn
//!   benchmarks release in non-LIFO order

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fixpool::{BlockPool, PoolError};
use rand::prelude::*;

/// Capacity of the [`burst_pool`] profile.
pub const BURST_CAPACITY: usize = 100_000;

/// Capacity of the [`shared_pool`] profile.
pub const SHARED_CAPACITY: usize = 10_000;

/// Build the burst profile: 100 000 blocks of `u32` size.
///
/// Matches the tight allocate-write-free loop used to compare the pool
/// against the general-purpose allocator.
pub fn burst_pool() -> Result<BlockPool, PoolError> {
    BlockPool::new(std::mem::size_of::<u32>(), BURST_CAPACITY)
}

/// Build the shared profile: 10 000 blocks of `u32` size.
///
/// Sized so ten threads can each hold 1 000 blocks at once without
/// exhausting the pool.
pub fn shared_pool() -> Result<BlockPool, PoolError> {
    BlockPool::new(std::mem::size_of::<u32>(), SHARED_CAPACITY)
}

/// A deterministic shuffled permutation of `0..n`.
///
/// Used to release blocks in an order unrelated to acquisition order, so
/// the free list is churned rather than driven purely LIFO.
pub fn shuffled_release_order(n: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}
