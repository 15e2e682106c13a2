//! 8-lane f32 vector types and backend selection.
//!
//! The vectorized benchmark is written once against [`SimdLane`] and
//! instantiated for each backend:
//!
//! - [`avx2::F32x8`]: one `__m256` register (x86/x86_64 only)
//! - [`fallback::F32x8`]: eight plain f32 lanes, available everywhere
//!
//! [`Backend::preferred`] picks the backend for the program run. The build
//! script sets `cfg(avx2)` when the build host advertises AVX2; the choice is
//! then confirmed at run time with `is_x86_feature_detected!`.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::sync::OnceLock;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;

pub mod fallback;

/// Number of f32 values in every lane vector (256 bits).
pub const LANE_COUNT: usize = 8;

/// Alignment check for vector loads and stores.
pub trait Alignment<T> {
    fn is_aligned(ptr: *const T) -> bool;
}

/// A fixed-width vector of f32 lanes with elementwise arithmetic.
pub trait SimdLane:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Number of f32 values processed per step.
    const LANE_COUNT: usize;

    /// Loads `LANE_COUNT` contiguous values.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `LANE_COUNT` readable f32 values, and the
    /// CPU must support the instruction set of the implementing backend.
    unsafe fn load(ptr: *const f32) -> Self;

    /// Stores all `LANE_COUNT` values.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `LANE_COUNT` writable f32 values.
    unsafe fn store_at(&self, ptr: *mut f32);
}

/// Lane backend used by the vectorized benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Native 256-bit AVX2 registers.
    Avx2,
    /// Eight scalar lanes, portable to any target.
    Fallback,
}

static PREFERRED: OnceLock<Backend> = OnceLock::new();

impl Backend {
    /// Whether this backend can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Fallback => true,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            Backend::Avx2 => false,
        }
    }

    /// Backend for the program run: the build-time choice, demoted to
    /// [`Backend::Fallback`] if the running CPU lacks it. Cached after the
    /// first call.
    pub fn preferred() -> Backend {
        *PREFERRED.get_or_init(|| {
            let built_for = if cfg!(avx2) {
                Backend::Avx2
            } else {
                Backend::Fallback
            };

            if built_for.is_available() {
                tracing::info!(backend = %built_for, "lane backend selected");
                built_for
            } else {
                tracing::warn!(
                    wanted = %built_for,
                    "lane backend unsupported by this CPU, using fallback"
                );
                Backend::Fallback
            }
        })
    }

    /// Every backend the current CPU can run.
    pub fn available() -> Vec<Backend> {
        [Backend::Avx2, Backend::Fallback]
            .into_iter()
            .filter(|backend| backend.is_available())
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx2 => "AVX2 (256-bit)",
            Backend::Fallback => "Fallback (8 x f32)",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
