//! Orchestrator runs: lock discipline, report lines and execution modes.

use lanebench::bench::{Label, MemorySink};
use lanebench::simd::Backend;
use lanebench::{logging, BenchError, ExecutionMode, Orchestrator};

fn small_run() -> Orchestrator {
    Orchestrator::new().with_len(256).with_iterations(2_000)
}

#[test]
fn test_critical_sections_never_overlap() {
    logging::init_for_tests();

    for _ in 0..20 {
        let sink = MemorySink::new();
        let summary = small_run().with_symbol('+').run(&sink);

        assert_eq!(summary.peak_holders, 1);
        assert_eq!(summary.spans.len(), 2);
        let (first, second) = (&summary.spans[0], &summary.spans[1]);
        assert!(!first.overlaps(second), "{first:?} overlaps {second:?}");
        assert!(first.left <= second.entered);
    }
}

#[test]
fn test_serialized_add_sees_both_runs() {
    let sink = MemorySink::new();
    let summary = Orchestrator::new()
        .with_len(8)
        .with_iterations(2)
        .with_symbol('+')
        .run(&sink);

    // 1 + 2 + 2 from the first worker, + 2 + 2 from the second.
    assert_eq!(summary.final_buffers, vec![vec![9.0f32; 8]]);

    let mut lines = sink.out_lines();
    lines.sort();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("AVX calculation took "));
    assert!(lines[1].starts_with("Regular calculation took "));
    assert!(lines.iter().all(|line| line.ends_with("ms.")));
}

#[test]
fn test_parallel_add_scenario() {
    for backend in Backend::available() {
        let sink = MemorySink::new();
        let summary = Orchestrator::new()
            .with_len(8)
            .with_iterations(2)
            .with_symbol('+')
            .with_backend(backend)
            .with_mode(ExecutionMode::Parallel)
            .run(&sink);

        assert_eq!(summary.mode, ExecutionMode::Parallel);
        assert_eq!(summary.final_buffers, vec![vec![5.0f32; 8], vec![5.0f32; 8]]);
        assert_eq!(sink.out_lines().len(), 2);
    }
}

#[test]
fn test_invalid_operator_is_local_to_each_worker() {
    for mode in [ExecutionMode::Serialized, ExecutionMode::Parallel] {
        let sink = MemorySink::new();
        let summary = small_run().with_symbol('%').with_mode(mode).run(&sink);

        for label in [Label::Regular, Label::Avx] {
            let outcome = summary.outcome(label).unwrap();
            assert_eq!(outcome.result, Err(BenchError::UnrecognizedOperation('%')));
        }

        assert!(sink.out_lines().is_empty());
        assert_eq!(sink.err_lines(), vec!["Invalid operator."; 2]);
        assert!(summary
            .final_buffers
            .iter()
            .all(|a| a.iter().all(|&x| x == 1.0)));
    }
}

#[test]
fn test_partial_lane_group_only_fails_vector_worker() {
    let sink = MemorySink::new();
    let summary = Orchestrator::new()
        .with_len(12)
        .with_iterations(1)
        .with_symbol('*')
        .run(&sink);

    assert!(summary.outcome(Label::Regular).unwrap().result.is_ok());
    assert_eq!(
        summary.outcome(Label::Avx).unwrap().result,
        Err(BenchError::LaneRemainder { len: 12, lanes: 8 })
    );
    assert_eq!(summary.final_buffers, vec![vec![2.0f32; 12]]);
    assert_eq!(sink.out_lines().len(), 1);
    assert_eq!(sink.err_lines().len(), 1);
}
