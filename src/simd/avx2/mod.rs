//! AVX2 lane backend.
//!
//! Wraps Intel's 256-bit `__m256` register: 8 packed single-precision values
//! per load, arithmetic instruction and store.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: [`crate::simd::Backend::is_available`] must report
//!   `true` before any [`F32x8`] is loaded
//!
//! The kernels that use this type are compiled with
//! `#[target_feature(enable = "avx2")]` so the intrinsics inline into them.

pub mod f32x8;

pub use f32x8::F32x8;
