//! Test utilities and mock collaborators for Keel development.
//!
//! Provides a recording implementation of [`Diagnostics`] so tests can
//! assert on what a container reported, and [`DropCounter`] for checking
//! that pooled values are destroyed exactly when they should be.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use keel_core::Diagnostics;
use log::Level;

/// One captured diagnostics call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// [`Diagnostics`] mock that stores every record in memory.
///
/// `fatal` records the message at [`Level::Error`] and then panics with
/// `"fatal [<target>]: <message>"`, so fatal paths can be exercised with
/// `#[should_panic]` instead of aborting the test binary.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for injection: clone the `Arc` into the container and
    /// keep the original for assertions.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of every record so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Number of records at exactly `level`.
    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|r| r.level == level).count()
    }

    /// Whether any record's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|r| r.message.contains(needle))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        // A panicking fatal() test leaves nothing half-written.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn log(&self, level: Level, target: &str, message: fmt::Arguments<'_>) {
        self.lock().push(LogRecord {
            level,
            target: target.to_owned(),
            message: message.to_string(),
        });
    }

    fn fatal(&self, target: &str, message: fmt::Arguments<'_>) -> ! {
        let message = message.to_string();
        self.log(Level::Error, target, format_args!("{message}"));
        panic!("fatal [{target}]: {message}")
    }
}

/// Value that counts how many times it has been dropped.
///
/// Every clone shares the same counter.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drops observed across all clones.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}
