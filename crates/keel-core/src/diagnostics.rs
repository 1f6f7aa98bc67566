//! Injected logging and abort collaborator.
//!
//! Pools and queues never reach for a process-wide logger. They are handed
//! a [`Diagnostics`] implementation at construction and report through it:
//! recoverable conditions (queue overflow, stale releases) go to
//! [`Diagnostics::log`], unrecoverable capacity exhaustion goes to
//! [`Diagnostics::fatal`].
//!
//! [`LogDiagnostics`] is the stock implementation. It forwards to the `log`
//! facade and aborts the process on fatal conditions.

use std::fmt;
use std::sync::Arc;

use log::Level;

/// Shared, thread-safe diagnostics handle.
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Reporting capability injected into every Keel container.
///
/// Implementations must be cheap to call: the queue invokes
/// [`log`](Diagnostics::log) from the producer thread on every overflow.
/// They are never called while a container lock is held.
pub trait Diagnostics: Send + Sync {
    /// Report a condition at the given severity.
    ///
    /// `target` names the reporting subsystem (`keel::pool`,
    /// `keel::input`).
    fn log(&self, level: Level, target: &str, message: fmt::Arguments<'_>);

    /// Report an unrecoverable condition and terminate.
    ///
    /// Called for index-space exhaustion. Must not return. The default
    /// implementation logs at [`Level::Error`] and aborts the process.
    fn fatal(&self, target: &str, message: fmt::Arguments<'_>) -> ! {
        self.log(Level::Error, target, message);
        std::process::abort()
    }
}

/// [`Diagnostics`] backed by the `log` facade.
///
/// Output goes wherever the application's logger sends it (for example
/// `env_logger`). With no logger installed, messages are discarded, but
/// fatal conditions still abort.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl LogDiagnostics {
    /// Wrap in an `Arc` for injection.
    pub fn shared() -> SharedDiagnostics {
        Arc::new(Self)
    }
}

impl Diagnostics for LogDiagnostics {
    fn log(&self, level: Level, target: &str, message: fmt::Arguments<'_>) {
        log::log!(target: target, level, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<(Level, String, String)>>,
    }

    impl Diagnostics for Capture {
        fn log(&self, level: Level, target: &str, message: fmt::Arguments<'_>) {
            self.lines
                .lock()
                .unwrap()
                .push((level, target.to_owned(), message.to_string()));
        }

        fn fatal(&self, target: &str, message: fmt::Arguments<'_>) -> ! {
            panic!("fatal [{target}]: {message}")
        }
    }

    #[test]
    fn log_receives_formatted_message() {
        let capture = Capture::default();
        capture.log(Level::Warn, "keel::input", format_args!("dropped {}", 3));
        let lines = capture.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Warn);
        assert_eq!(lines[0].1, "keel::input");
        assert_eq!(lines[0].2, "dropped 3");
    }

    #[test]
    fn shared_handle_reaches_implementation() {
        let inner = Arc::new(Capture::default());
        let shared: SharedDiagnostics = inner.clone();
        shared.log(Level::Debug, "keel::pool", format_args!("retired"));
        assert_eq!(inner.lines.lock().unwrap().len(), 1);
    }

    #[test]
    #[should_panic(expected = "fatal [keel::pool]: exhausted")]
    fn fatal_does_not_return() {
        let shared: SharedDiagnostics = Arc::new(Capture::default());
        shared.fatal("keel::pool", format_args!("exhausted"));
    }

    #[test]
    fn log_diagnostics_without_logger_is_silent() {
        // No logger installed: the facade discards the record.
        LogDiagnostics.log(Level::Info, "keel::test", format_args!("hello"));
    }
}
