//! Scalar benchmark: one element per step.
//!
//! The operation symbol is decoded inside the inner loop, once per element
//! per pass. That repeated branch is part of what this baseline measures.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::bench::check_buffers;
use crate::error::Result;
use crate::op::Operation;

/// Applies `a[i] = a[i] OP b[i]` for every element, `iterations` times.
///
/// Stops at the first step whose symbol is not a known operation; elements
/// already processed keep their new values.
#[inline(always)]
pub fn passes(a: &mut [f32], b: &[f32], symbol: char, iterations: usize) -> Result<()> {
    for _ in 0..iterations {
        for (x, &y) in a.iter_mut().zip(b) {
            let op = Operation::from_symbol(symbol)?;
            *x = op.apply(*x, y);
        }
        black_box(&mut *a);
    }
    Ok(())
}

/// Runs the scalar benchmark and returns the elapsed time of all passes.
pub fn run(a: &mut [f32], b: &[f32], symbol: char, iterations: usize) -> Result<Duration> {
    check_buffers(a, b, 1)?;

    tracing::debug!(len = a.len(), iterations, %symbol, "scalar benchmark started");

    let start = Instant::now();
    passes(a, b, black_box(symbol), iterations)?;
    let elapsed = start.elapsed();

    tracing::debug!(?elapsed, "scalar benchmark finished");
    Ok(elapsed)
}
