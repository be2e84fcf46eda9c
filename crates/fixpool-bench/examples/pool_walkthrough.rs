//! Walkthrough of the pool's public interface.
//!
//! Three parts: a basic acquire/write/release sequence on a tiny pool of
//! double-sized blocks, a timed 100 000-pair burst against a `Box`
//! baseline, and ten threads churning one shared pool. Run with
//! `cargo run --example pool_walkthrough`.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use fixpool::{BlockPool, PoolError};
use fixpool_bench::{burst_pool, shared_pool, BURST_CAPACITY};

fn basic_usage() -> Result<(), PoolError> {
    let pool = BlockPool::new(std::mem::size_of::<f64>(), 5)?;

    let d1 = pool.acquire()?.cast::<f64>();
    let d2 = pool.acquire()?.cast::<f64>();
    unsafe {
        d1.as_ptr().write(3.14);
        d2.as_ptr().write(2.718);
    }
    println!("Available blocks: {}/5", pool.available());

    pool.release(d1.cast::<u8>().as_ptr())?;
    pool.release(d2.cast::<u8>().as_ptr())?;
    println!("Available blocks: {}/5\n", pool.available());
    Ok(())
}

fn timing_comparison() -> Result<(), PoolError> {
    let pool = burst_pool()?;
    let start = Instant::now();
    for i in 0..BURST_CAPACITY as u32 {
        let block = pool.acquire()?;
        unsafe { block.cast::<u32>().as_ptr().write(i) };
        pool.release(block.as_ptr())?;
    }
    println!("BlockPool time: {} µs", start.elapsed().as_micros());

    let start = Instant::now();
    for i in 0..BURST_CAPACITY as u32 {
        let boxed = Box::new(i);
        std::hint::black_box(&boxed);
    }
    println!("Box/drop time:  {} µs\n", start.elapsed().as_micros());
    Ok(())
}

fn threaded_churn() -> Result<(), PoolError> {
    let pool = Arc::new(shared_pool()?);

    let handles: Vec<_> = (0..10)
        .map(|id| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut held = Vec::with_capacity(1_000);
                for _ in 0..1_000 {
                    held.push(pool.acquire().unwrap());
                }
                for block in held {
                    pool.release(block.as_ptr()).unwrap();
                }
                println!("Thread {id} completed");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    println!(
        "\nThread-safe churn completed, {} blocks available",
        pool.available()
    );
    Ok(())
}

fn main() -> Result<(), PoolError> {
    basic_usage()?;
    timing_comparison()?;
    threaded_churn()
}
