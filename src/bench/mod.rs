//! The two benchmarks and their reporting.
//!
//! Both benchmarks mutate buffer A in place and return the elapsed time of
//! all passes. A [`ReportSink`] turns each outcome into the single output
//! line the program prints for it.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::simd::Backend;

pub mod scalar;
pub mod vector;

/// Name a benchmark reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Regular,
    Avx,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Regular => f.write_str("Regular"),
            Label::Avx => f.write_str("AVX"),
        }
    }
}

/// Which benchmark a worker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// One element per step.
    Scalar,
    /// One lane group per step on the given backend.
    Vector(Backend),
}

impl Kernel {
    pub fn label(self) -> Label {
        match self {
            Kernel::Scalar => Label::Regular,
            Kernel::Vector(_) => Label::Avx,
        }
    }

    /// Runs `iterations` passes of `a = a OP b` with this kernel.
    pub fn run(self, a: &mut [f32], b: &[f32], symbol: char, iterations: usize) -> Result<Timing> {
        let elapsed = match self {
            Kernel::Scalar => scalar::run(a, b, symbol, iterations)?,
            Kernel::Vector(backend) => vector::run(backend, a, b, symbol, iterations)?,
        };

        Ok(Timing {
            label: self.label(),
            elapsed,
        })
    }
}

/// Elapsed time of one completed benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub label: Label,
    pub elapsed: Duration,
}

impl Timing {
    /// Elapsed time in whole milliseconds.
    pub fn millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} calculation took {}ms.", self.label, self.millis())
    }
}

/// Writes the outcome of a benchmark run: a timing line on success, the
/// error message on failure.
pub fn report<O: Write, E: Write>(outcome: &Result<Timing>, out: &mut O, err: &mut E) -> io::Result<()> {
    match outcome {
        Ok(timing) => writeln!(out, "{timing}"),
        Err(error) => writeln!(err, "{error}"),
    }
}

/// Destination for benchmark outcomes, shared by the worker threads.
pub trait ReportSink: Sync {
    fn emit(&self, outcome: &Result<Timing>);
}

/// Reports to the process's stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioSink;

impl ReportSink for StdioSink {
    fn emit(&self, outcome: &Result<Timing>) {
        let stdout = io::stdout();
        let stderr = io::stderr();
        if let Err(e) = report(outcome, &mut stdout.lock(), &mut stderr.lock()) {
            tracing::warn!(error = %e, "failed to write benchmark report");
        }
    }
}

/// Collects report lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Captured>,
}

#[derive(Debug, Default, Clone)]
struct Captured {
    out: Vec<String>,
    err: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that would have gone to stdout.
    pub fn out_lines(&self) -> Vec<String> {
        self.captured().out
    }

    /// Lines that would have gone to stderr.
    pub fn err_lines(&self) -> Vec<String> {
        self.captured().err
    }

    fn captured(&self) -> Captured {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, outcome: &Result<Timing>) {
        let mut lines = self
            .lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match outcome {
            Ok(timing) => lines.out.push(timing.to_string()),
            Err(error) => lines.err.push(error.to_string()),
        }
    }
}

/// Validates the buffer pair before any pass runs.
pub(crate) fn check_buffers(a: &[f32], b: &[f32], lanes: usize) -> Result<()> {
    crate::error::check_lengths(a, b)?;
    if a.len() % lanes != 0 {
        return Err(BenchError::LaneRemainder {
            len: a.len(),
            lanes,
        });
    }
    Ok(())
}
