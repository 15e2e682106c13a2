//! Scalar vs. 8-lane SIMD elementwise arithmetic benchmark.
//!
//! Two benchmarks apply the same in-place operation `a[i] = a[i] OP b[i]` to a
//! pair of f32 buffers for a fixed number of passes and report the elapsed
//! wall-clock time:
//!
//! - [`bench::scalar`]: one element per step (`Regular`)
//! - [`bench::vector`]: eight elements per step through a [`simd::SimdLane`] (`AVX`)
//!
//! The [`orchestrator`] launches both on their own threads. In the default
//! [`ExecutionMode::Serialized`] mode they share buffer A behind a single
//! [`sync::ExclusiveBuffer`], so their timed sections never overlap.
//!
//! # Usage
//!
//! ```rust
//! use lanebench::bench::{scalar, vector};
//! use lanebench::simd::Backend;
//!
//! let b = vec![2.0f32; 8];
//!
//! let mut a = vec![1.0f32; 8];
//! scalar::run(&mut a, &b, '+', 2).unwrap();
//! assert!(a.iter().all(|&x| x == 5.0));
//!
//! let mut a = vec![1.0f32; 8];
//! vector::run(Backend::Fallback, &mut a, &b, '+', 2).unwrap();
//! assert!(a.iter().all(|&x| x == 5.0));
//! ```

pub mod bench;
pub mod error;
pub mod logging;
pub mod op;
pub mod orchestrator;
pub mod simd;
pub mod sync;

pub use error::{BenchError, Result};
pub use op::Operation;
pub use orchestrator::{ExecutionMode, Orchestrator};

/// Number of full passes each benchmark makes over the buffers.
pub const ITERATIONS: usize = 10_000_000;

/// Length of buffers A and B.
pub const BUFFER_LEN: usize = 256;

/// Initial value of every element of buffer A.
pub const A_INIT: f32 = 1.0;

/// Value of every element of buffer B.
pub const B_INIT: f32 = 2.0;

/// Operation symbol used by the program run.
pub const OPERATION: char = '*';

/// How the program run schedules the two benchmarks.
pub const EXECUTION_MODE: ExecutionMode = ExecutionMode::Serialized;
