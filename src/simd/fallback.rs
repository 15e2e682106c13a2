//! Portable lane backend: eight f32 values in a plain array.
//!
//! Same interface as the AVX2 vector, so the vectorized benchmark runs on any
//! target. The compiler is free to auto-vectorize the lane loops.

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::{SimdLane, LANE_COUNT};

/// Eight f32 lanes held in an array.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x8 {
    pub elements: [f32; LANE_COUNT],
}

impl From<&[f32]> for F32x8 {
    /// Takes the first 8 values of the slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than 8 elements.
    fn from(slice: &[f32]) -> Self {
        let mut elements = [0.0f32; LANE_COUNT];
        elements.copy_from_slice(&slice[..LANE_COUNT]);
        Self { elements }
    }
}

impl F32x8 {
    #[inline(always)]
    fn zip_with(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut elements = self.elements;
        for (lhs, rhs) in elements.iter_mut().zip(rhs.elements) {
            *lhs = f(*lhs, rhs);
        }
        Self { elements }
    }
}

impl SimdLane for F32x8 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        std::ptr::write_unaligned(ptr as *mut [f32; LANE_COUNT], self.elements)
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |x, y| x + y)
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |x, y| x - y)
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |x, y| x * y)
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |x, y| x / y)
    }
}
