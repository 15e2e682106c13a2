//! Sets up the buffers, launches both benchmarks and waits for them.
//!
//! In [`ExecutionMode::Serialized`] the two workers are OS threads sharing
//! one [`ExclusiveBuffer`]: whichever enters first runs to completion, then
//! the other sees buffer A as the first one left it. In
//! [`ExecutionMode::Parallel`] each worker gets its own copy of the buffers
//! and the pair runs through `rayon::join` without contention.

use std::thread;

use crate::bench::{Kernel, Label, ReportSink, Timing};
use crate::error::{BenchError, Result};
use crate::simd::Backend;
use crate::sync::{CriticalSpan, ExclusiveBuffer};
use crate::{A_INIT, BUFFER_LEN, B_INIT, EXECUTION_MODE, ITERATIONS, OPERATION};

/// How the two benchmarks are scheduled relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Both workers share buffer A behind one lock; their runs never overlap.
    Serialized,
    /// Each worker owns its buffers; the runs may overlap.
    Parallel,
}

/// One benchmark run's settings. [`Default`] uses the crate constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orchestrator {
    pub iterations: usize,
    pub len: usize,
    pub a_init: f32,
    pub b_init: f32,
    pub symbol: char,
    pub mode: ExecutionMode,
    pub backend: Backend,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            len: BUFFER_LEN,
            a_init: A_INIT,
            b_init: B_INIT,
            symbol: OPERATION,
            mode: EXECUTION_MODE,
            backend: Backend::preferred(),
        }
    }
}

/// Outcome of one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerOutcome {
    pub label: Label,
    pub result: Result<Timing>,
}

/// What a completed orchestrator run observed.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: ExecutionMode,
    /// Outcomes in launch order: `Regular`, then `AVX`.
    pub outcomes: Vec<WorkerOutcome>,
    /// Final contents of buffer A per buffer set: one entry when serialized,
    /// one per worker (launch order) when parallel.
    pub final_buffers: Vec<Vec<f32>>,
    /// Critical sections of every buffer set, in the order they were left.
    pub spans: Vec<CriticalSpan>,
    /// Highest number of simultaneous holders on any one buffer.
    pub peak_holders: usize,
}

impl RunSummary {
    pub fn outcome(&self, label: Label) -> Option<&WorkerOutcome> {
        self.outcomes.iter().find(|outcome| outcome.label == label)
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    fn kernels(&self) -> [Kernel; 2] {
        [Kernel::Scalar, Kernel::Vector(self.backend)]
    }

    /// Runs both benchmarks and waits for both to finish.
    ///
    /// Worker failures are reported through `sink` and recorded in the
    /// summary; they never abort the other worker.
    pub fn run(&self, sink: &dyn ReportSink) -> RunSummary {
        tracing::info!(
            mode = ?self.mode,
            backend = %self.backend,
            len = self.len,
            iterations = self.iterations,
            symbol = %self.symbol,
            "launching benchmarks"
        );

        let summary = match self.mode {
            ExecutionMode::Serialized => self.run_serialized(sink),
            ExecutionMode::Parallel => self.run_parallel(sink),
        };

        for outcome in &summary.outcomes {
            if let Err(error) = &outcome.result {
                tracing::debug!(label = %outcome.label, %error, "worker ended without timing");
            }
        }

        summary
    }

    fn run_serialized(&self, sink: &dyn ReportSink) -> RunSummary {
        let shared = ExclusiveBuffer::filled(self.len, self.a_init);
        let b = vec![self.b_init; self.len];

        let (shared_ref, b_ref) = (&shared, b.as_slice());

        let outcomes: Vec<WorkerOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .kernels()
                .into_iter()
                .map(|kernel| {
                    let label = kernel.label();
                    let spawned = thread::Builder::new()
                        .name(label.to_string().to_lowercase())
                        .spawn_scoped(scope, move || self.worker(kernel, shared_ref, b_ref, sink));
                    (label, spawned)
                })
                .collect();

            handles
                .into_iter()
                .map(|(label, spawned)| WorkerOutcome {
                    label,
                    result: join_worker(label, spawned),
                })
                .collect()
        });

        let spans = shared.spans();
        let peak_holders = shared.peak_holders();
        let final_buffers = shared.into_inner().into_iter().collect();

        RunSummary {
            mode: ExecutionMode::Serialized,
            outcomes,
            final_buffers,
            spans,
            peak_holders,
        }
    }

    fn run_parallel(&self, sink: &dyn ReportSink) -> RunSummary {
        let [scalar, vector] = self.kernels();
        let buffers = [
            (ExclusiveBuffer::filled(self.len, self.a_init), vec![self.b_init; self.len]),
            (ExclusiveBuffer::filled(self.len, self.a_init), vec![self.b_init; self.len]),
        ];
        let [(scalar_a, scalar_b), (vector_a, vector_b)] = &buffers;

        let (scalar_result, vector_result) = rayon::join(
            || self.worker(scalar, scalar_a, scalar_b, sink),
            || self.worker(vector, vector_a, vector_b, sink),
        );

        let mut spans = Vec::new();
        let mut peak_holders = 0;
        let mut final_buffers = Vec::new();
        for (a, _) in buffers {
            spans.extend(a.spans());
            peak_holders = peak_holders.max(a.peak_holders());
            if let Ok(data) = a.into_inner() {
                final_buffers.push(data);
            }
        }
        spans.sort_by_key(|span| span.left);

        RunSummary {
            mode: ExecutionMode::Parallel,
            outcomes: vec![
                WorkerOutcome {
                    label: scalar.label(),
                    result: scalar_result,
                },
                WorkerOutcome {
                    label: vector.label(),
                    result: vector_result,
                },
            ],
            final_buffers,
            spans,
            peak_holders,
        }
    }

    /// One worker's whole run: enter the critical section, time the
    /// benchmark, report, leave.
    fn worker(
        &self,
        kernel: Kernel,
        shared: &ExclusiveBuffer,
        b: &[f32],
        sink: &dyn ReportSink,
    ) -> Result<Timing> {
        let label = kernel.label();
        let mut section = match shared.enter(label) {
            Ok(section) => section,
            Err(error) => {
                let result = Err(error);
                sink.emit(&result);
                return result;
            }
        };

        let result = kernel.run(&mut section, b, self.symbol, self.iterations);
        sink.emit(&result);

        drop(section);
        result
    }
}

fn join_worker(
    label: Label,
    spawned: std::io::Result<thread::ScopedJoinHandle<'_, Result<Timing>>>,
) -> Result<Timing> {
    let handle = match spawned {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(%label, error = %e, "failed to spawn worker");
            return Err(BenchError::WorkerPanicked(label));
        }
    };

    handle.join().unwrap_or_else(|_| {
        tracing::error!(%label, "worker panicked");
        Err(BenchError::WorkerPanicked(label))
    })
}
