//! Pass semantics: doubling, lane coverage, the two-pass add scenario and the
//! invalid-operator path.

use std::cell::Cell;
use std::ops::{Add, Div, Mul, Sub};

use lanebench::bench::{scalar, vector, Kernel, MemorySink, ReportSink};
use lanebench::simd::{fallback, Backend, SimdLane};
use lanebench::BenchError;

#[test]
fn test_multiply_doubles_per_pass() {
    let b = vec![2.0f32; 256];

    for kernel in [Kernel::Scalar, Kernel::Vector(Backend::preferred())] {
        let mut a = vec![1.0f32; 256];
        kernel.run(&mut a, &b, '*', 1).unwrap();
        assert!(a.iter().all(|&x| x == 2.0), "{kernel:?} after one pass");

        kernel.run(&mut a, &b, '*', 1).unwrap();
        assert!(a.iter().all(|&x| x == 4.0), "{kernel:?} after two passes");
    }
}

#[test]
fn test_two_additive_passes_reach_five() {
    let b = [2.0f32; 8];

    let mut a = [1.0f32; 8];
    scalar::run(&mut a, &b, '+', 2).unwrap();
    assert_eq!(a, [5.0; 8]);

    for backend in Backend::available() {
        let mut a = [1.0f32; 8];
        vector::run(backend, &mut a, &b, '+', 2).unwrap();
        assert_eq!(a, [5.0; 8], "{backend}");
    }
}

#[test]
fn test_every_element_touched_once_per_pass() {
    // Distinct starting values; adding 1.0 once per pass exposes skipped or
    // repeated lanes.
    let start: Vec<f32> = (0..256).map(|i| i as f32).collect();
    let b = vec![1.0f32; 256];

    for backend in Backend::available() {
        let mut a = start.clone();
        vector::run(backend, &mut a, &b, '+', 3).unwrap();
        for (i, (&before, &after)) in start.iter().zip(&a).enumerate() {
            assert_eq!(after, before + 3.0, "{backend} index {i}");
        }
    }
}

thread_local! {
    static LOADS: Cell<usize> = const { Cell::new(0) };
    static STORES: Cell<usize> = const { Cell::new(0) };
}

/// Fallback lanes that count loads and stores.
#[derive(Clone, Copy)]
struct CountingLane(fallback::F32x8);

impl SimdLane for CountingLane {
    const LANE_COUNT: usize = 8;

    unsafe fn load(ptr: *const f32) -> Self {
        LOADS.with(|n| n.set(n.get() + 1));
        CountingLane(fallback::F32x8::load(ptr))
    }

    unsafe fn store_at(&self, ptr: *mut f32) {
        STORES.with(|n| n.set(n.get() + 1));
        self.0.store_at(ptr)
    }
}

impl Add for CountingLane {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        CountingLane(self.0 + rhs.0)
    }
}

impl Sub for CountingLane {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        CountingLane(self.0 - rhs.0)
    }
}

impl Mul for CountingLane {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        CountingLane(self.0 * rhs.0)
    }
}

impl Div for CountingLane {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        CountingLane(self.0 / rhs.0)
    }
}

#[test]
fn test_thirty_two_steps_per_pass() {
    assert_eq!(vector::steps_per_pass(256), 32);

    let mut a = vec![1.0f32; 256];
    let b = vec![2.0f32; 256];
    unsafe { vector::passes::<CountingLane>(&mut a, &b, '*', 2) }.unwrap();

    // Two loads (A and B) and one store per step.
    assert_eq!(LOADS.with(Cell::get), 2 * 32 * 2);
    assert_eq!(STORES.with(Cell::get), 32 * 2);
    assert!(a.iter().all(|&x| x == 4.0));
}

#[test]
fn test_invalid_operator_reports_without_timing() {
    for kernel in [Kernel::Scalar, Kernel::Vector(Backend::preferred())] {
        let sink = MemorySink::new();
        let mut a = vec![1.0f32; 256];
        let b = vec![2.0f32; 256];

        let result = kernel.run(&mut a, &b, '%', 10_000_000);
        sink.emit(&result);

        assert_eq!(result, Err(BenchError::UnrecognizedOperation('%')));
        assert!(sink.out_lines().is_empty(), "{kernel:?} printed a timing line");
        assert_eq!(sink.err_lines(), vec!["Invalid operator.".to_string()]);
        assert!(a.iter().all(|&x| x == 1.0));
    }
}
