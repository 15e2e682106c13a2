//! AVX2 8-lane f32 SIMD vector.
//!
//! `F32x8` wraps the `__m256` intrinsic type. Loads and stores pick the
//! aligned or unaligned instruction from the pointer; arithmetic maps one to
//! one onto `_mm256_{add,sub,mul,div}_ps`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::{Alignment, SimdLane};

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
///
/// Values of this type only come out of [`SimdLane::load`], whose safety
/// contract requires AVX2 support; the arithmetic operators rely on that.
///
/// # Usage
///
/// ```rust
/// # #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
/// # {
/// use lanebench::simd::{avx2::F32x8, Backend, SimdLane};
///
/// if Backend::Avx2.is_available() {
///     let a = [1.0f32; 8];
///     let b = [2.0f32; 8];
///     let mut out = [0.0f32; 8];
///     unsafe {
///         let sum = F32x8::load(a.as_ptr()) + F32x8::load(b.as_ptr());
///         sum.store_at(out.as_mut_ptr());
///     }
///     assert_eq!(out, [3.0f32; 8]);
/// }
/// # }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX2 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

impl Alignment<f32> for F32x8 {
    /// Checks if a pointer is 32-byte aligned for `_mm256_load_ps` /
    /// `_mm256_store_ps`.
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl F32x8 {
    /// Loads 8 elements from 32-byte aligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to at least 8 valid f32 values.
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    /// Loads 8 elements from unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Stores 8 elements to 32-byte aligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to at least 8 writable f32
    /// locations.
    #[inline(always)]
    pub unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.elements)
    }

    /// Stores 8 elements to unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 writable f32 locations.
    #[inline(always)]
    pub unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }
}

impl SimdLane for F32x8 {
    const LANE_COUNT: usize = LANE_COUNT;

    /// Loads exactly 8 elements, choosing the aligned instruction when the
    /// pointer allows it.
    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => Self::load_aligned(ptr),
            false => Self::load_unaligned(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => self.store_aligned_at(ptr),
            false => self.store_unaligned_at(ptr),
        }
    }
}

impl Add for F32x8 {
    type Output = Self;

    /// Element-wise addition with `_mm256_add_ps`.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    /// Element-wise subtraction with `_mm256_sub_ps`.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    /// Element-wise multiplication with `_mm256_mul_ps`.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    /// Element-wise division with `_mm256_div_ps`. Division by zero follows
    /// IEEE 754 (inf / NaN).
    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}
