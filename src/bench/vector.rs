//! Vectorized benchmark: one 8-lane group per step.
//!
//! Each step loads 8 values of A and of B into [`SimdLane`] vectors, applies
//! the operation and stores the 8 results back into A. The symbol is decoded
//! once per step, after the loads, mirroring the scalar benchmark's per-step
//! dispatch.
//!
//! With `N = 256` a pass is exactly 32 steps.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::bench::check_buffers;
use crate::error::Result;
use crate::op::Operation;
use crate::simd::{fallback, Backend, SimdLane, LANE_COUNT};

/// Number of vector steps in one pass over `len` elements.
pub const fn steps_per_pass(len: usize) -> usize {
    len / LANE_COUNT
}

/// Applies `a = a OP b` one lane group at a time, `iterations` times.
///
/// Only whole lane groups are processed; callers validate the length first.
///
/// # Safety
///
/// The CPU must support the instruction set `V` is built on.
#[inline(always)]
pub unsafe fn passes<V: SimdLane>(
    a: &mut [f32],
    b: &[f32],
    symbol: char,
    iterations: usize,
) -> Result<()> {
    for _ in 0..iterations {
        for (a_chunk, b_chunk) in a
            .chunks_exact_mut(V::LANE_COUNT)
            .zip(b.chunks_exact(V::LANE_COUNT))
        {
            let va = V::load(a_chunk.as_ptr());
            let vb = V::load(b_chunk.as_ptr());
            let op = Operation::from_symbol(symbol)?;
            op.apply(va, vb).store_at(a_chunk.as_mut_ptr());
        }
        black_box(&mut *a);
    }
    Ok(())
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "avx2")]
unsafe fn passes_avx2(a: &mut [f32], b: &[f32], symbol: char, iterations: usize) -> Result<()> {
    passes::<crate::simd::avx2::F32x8>(a, b, symbol, iterations)
}

/// Dispatches to the pass loop of `backend`, falling back to the portable
/// lanes if the CPU cannot run it.
fn dispatch(backend: Backend, a: &mut [f32], b: &[f32], symbol: char, iterations: usize) -> Result<()> {
    match backend {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Backend::Avx2 if backend.is_available() => unsafe { passes_avx2(a, b, symbol, iterations) },
        Backend::Avx2 => {
            tracing::warn!("AVX2 unavailable on this CPU, running fallback lanes");
            unsafe { passes::<fallback::F32x8>(a, b, symbol, iterations) }
        }
        Backend::Fallback => unsafe { passes::<fallback::F32x8>(a, b, symbol, iterations) },
    }
}

/// Runs the vectorized benchmark and returns the elapsed time of all passes.
pub fn run(
    backend: Backend,
    a: &mut [f32],
    b: &[f32],
    symbol: char,
    iterations: usize,
) -> Result<Duration> {
    check_buffers(a, b, LANE_COUNT)?;

    tracing::debug!(
        %backend,
        len = a.len(),
        steps = steps_per_pass(a.len()),
        iterations,
        %symbol,
        "vector benchmark started"
    );

    let start = Instant::now();
    dispatch(backend, a, b, black_box(symbol), iterations)?;
    let elapsed = start.elapsed();

    tracing::debug!(?elapsed, "vector benchmark finished");
    Ok(elapsed)
}
