//! Scalar and vectorized benchmarks must leave buffer A in the same state.

use lanebench::bench::{scalar, vector};
use lanebench::simd::Backend;
use lanebench::Operation;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pair(rng: &mut StdRng, len: usize) -> (Vec<f32>, Vec<f32>) {
    // Keep operands near 1.0 so repeated multiply/divide stays finite.
    let a = (0..len).map(|_| rng.random_range(0.5f32..1.5)).collect();
    let b = (0..len).map(|_| rng.random_range(0.5f32..1.5)).collect();
    (a, b)
}

fn assert_close(scalar: &[f32], vector: &[f32], context: &str) {
    assert_eq!(scalar.len(), vector.len());
    for (i, (&s, &v)) in scalar.iter().zip(vector).enumerate() {
        let tolerance = 1e-6 * s.abs().max(1.0);
        assert!(
            (s - v).abs() <= tolerance,
            "{context}: index {i} differs, scalar={s}, vector={v}"
        );
    }
}

#[test]
fn test_all_operations_match_on_every_backend() {
    let mut rng = StdRng::seed_from_u64(12345);

    for backend in Backend::available() {
        for op in Operation::ALL {
            for &len in &[8usize, 64, 256] {
                let (a, b) = random_pair(&mut rng, len);

                let mut a_scalar = a.clone();
                let mut a_vector = a;
                scalar::run(&mut a_scalar, &b, op.symbol(), 5).unwrap();
                vector::run(backend, &mut a_vector, &b, op.symbol(), 5).unwrap();

                assert_close(&a_scalar, &a_vector, &format!("{backend} {op} len={len}"));
            }
        }
    }
}

#[test]
fn test_backends_agree_with_each_other() {
    let backends = Backend::available();
    if backends.len() < 2 {
        return;
    }

    let mut rng = StdRng::seed_from_u64(7);
    let (a, b) = random_pair(&mut rng, 256);

    for op in Operation::ALL {
        let results: Vec<Vec<f32>> = backends
            .iter()
            .map(|&backend| {
                let mut a = a.clone();
                vector::run(backend, &mut a, &b, op.symbol(), 4).unwrap();
                a
            })
            .collect();

        assert_close(&results[0], &results[1], &format!("{op} across backends"));
    }
}

#[test]
fn test_divide_by_zero_matches() {
    let b = vec![0.0f32; 8];
    let mut a_scalar = vec![1.0f32, -1.0, 0.0, 2.0, -2.0, 0.0, 3.0, -3.0];
    let mut a_vector = a_scalar.clone();

    scalar::run(&mut a_scalar, &b, '/', 1).unwrap();
    vector::run(Backend::preferred(), &mut a_vector, &b, '/', 1).unwrap();

    for (s, v) in a_scalar.iter().zip(&a_vector) {
        if s.is_nan() {
            assert!(v.is_nan());
        } else {
            assert_eq!(s, v);
            assert!(s.is_infinite());
        }
    }
}
