//! The lock shared by the benchmark workers.
//!
//! [`ExclusiveBuffer`] owns buffer A behind a mutex. A worker enters its
//! critical section with [`ExclusiveBuffer::enter`] and holds the returned
//! [`CriticalSection`] for its whole run; dropping it releases the lock on
//! every exit path, including early error returns.
//!
//! The buffer also counts concurrent holders and records when each critical
//! section was entered and left, so callers can check that two sections
//! never overlapped.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::bench::Label;
use crate::error::{BenchError, Result};

/// Wall-clock interval one worker held the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalSpan {
    pub label: Label,
    pub entered: Instant,
    pub left: Instant,
}

impl CriticalSpan {
    pub fn overlaps(&self, other: &CriticalSpan) -> bool {
        self.entered < other.left && other.entered < self.left
    }
}

/// Buffer A with its lock and holder bookkeeping.
#[derive(Debug)]
pub struct ExclusiveBuffer {
    data: Mutex<Vec<f32>>,
    holders: AtomicUsize,
    peak_holders: AtomicUsize,
    spans: Mutex<Vec<CriticalSpan>>,
}

impl ExclusiveBuffer {
    pub fn new(data: Vec<f32>) -> Self {
        Self {
            data: Mutex::new(data),
            holders: AtomicUsize::new(0),
            peak_holders: AtomicUsize::new(0),
            spans: Mutex::new(Vec::new()),
        }
    }

    /// A buffer of `len` copies of `value`.
    pub fn filled(len: usize, value: f32) -> Self {
        Self::new(vec![value; len])
    }

    /// Blocks until the lock is free, then enters the critical section.
    pub fn enter(&self, label: Label) -> Result<CriticalSection<'_>> {
        tracing::debug!(%label, "waiting for shared buffer");

        let guard = self.data.lock().map_err(|_| BenchError::LockPoisoned)?;

        let holders = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_holders.fetch_max(holders, Ordering::SeqCst);

        tracing::debug!(%label, holders, "entered critical section");

        Ok(CriticalSection {
            guard,
            owner: self,
            label,
            entered: Instant::now(),
        })
    }

    /// Highest number of simultaneous holders observed so far.
    pub fn peak_holders(&self) -> usize {
        self.peak_holders.load(Ordering::SeqCst)
    }

    /// Completed critical sections, in the order they were left.
    pub fn spans(&self) -> Vec<CriticalSpan> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the lock and returns the buffer.
    pub fn into_inner(self) -> Result<Vec<f32>> {
        self.data.into_inner().map_err(|_| BenchError::LockPoisoned)
    }
}

/// Exclusive access to buffer A for one worker.
///
/// Dereferences to the buffer slice.
#[derive(Debug)]
pub struct CriticalSection<'a> {
    guard: MutexGuard<'a, Vec<f32>>,
    owner: &'a ExclusiveBuffer,
    label: Label,
    entered: Instant,
}

impl CriticalSection<'_> {
    pub fn label(&self) -> Label {
        self.label
    }
}

impl Deref for CriticalSection<'_> {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.guard
    }
}

impl DerefMut for CriticalSection<'_> {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.guard
    }
}

impl Drop for CriticalSection<'_> {
    // Runs before the guard field is dropped, so the bookkeeping happens while
    // the lock is still held.
    fn drop(&mut self) {
        let span = CriticalSpan {
            label: self.label,
            entered: self.entered,
            left: Instant::now(),
        };
        self.owner
            .spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(span);
        self.owner.holders.fetch_sub(1, Ordering::SeqCst);

        tracing::debug!(label = %self.label, "left critical section");
    }
}
