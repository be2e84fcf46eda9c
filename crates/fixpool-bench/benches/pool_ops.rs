//! Criterion micro-benchmarks comparing the block pool against the
//! general-purpose allocator.
//!
//! The headline comparison is `acquire_write_release` vs
//! `box_new_write_drop`: one int-sized allocation round trip per
//! iteration. The burst benchmarks run the full 100 000-pair loop per
//! iteration, and the churn benchmark drains and refills a 10 000-block
//! pool with a shuffled release order so the free list is not driven
//! purely LIFO.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fixpool_bench::{burst_pool, shared_pool, shuffled_release_order, BURST_CAPACITY};

fn bench_single_pair(c: &mut Criterion) {
    let pool = burst_pool().unwrap();

    c.bench_function("acquire_write_release", |b| {
        b.iter(|| {
            let block = pool.acquire().unwrap();
            unsafe { block.cast::<u32>().as_ptr().write(black_box(42)) };
            pool.release(block.as_ptr()).unwrap();
        });
    });

    c.bench_function("box_new_write_drop", |b| {
        b.iter(|| {
            let boxed = Box::new(black_box(42u32));
            black_box(&boxed);
        });
    });
}

fn bench_burst(c: &mut Criterion) {
    let pool = burst_pool().unwrap();

    c.bench_function("pool_burst_100k", |b| {
        b.iter(|| {
            for i in 0..BURST_CAPACITY as u32 {
                let block = pool.acquire().unwrap();
                unsafe { block.cast::<u32>().as_ptr().write(i) };
                pool.release(block.as_ptr()).unwrap();
            }
        });
    });

    c.bench_function("heap_burst_100k", |b| {
        b.iter(|| {
            for i in 0..BURST_CAPACITY as u32 {
                let boxed = Box::new(i);
                black_box(&boxed);
            }
        });
    });
}

fn bench_shuffled_churn(c: &mut Criterion) {
    let pool = shared_pool().unwrap();
    let order = shuffled_release_order(pool.block_count(), 42);

    c.bench_function("drain_refill_shuffled_10k", |b| {
        b.iter(|| {
            let blocks: Vec<_> = (0..pool.block_count())
                .map(|_| pool.acquire().unwrap())
                .collect();
            for &i in &order {
                pool.release(blocks[i].as_ptr()).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_single_pair, bench_burst, bench_shuffled_churn);
criterion_main!(benches);
