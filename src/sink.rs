//! Diagnostic sink capability
//!
//! Validation never fails hard: corrections surface as warnings and API
//! misuse as errors, both delivered through a [`DiagnosticSink`] the caller
//! passes in by reference. [`LogSink`] forwards to the `log` facade and is
//! the implementation embedders normally want; [`MemorySink`] captures
//! messages for inspection.
//!
//! The sink carries a verbosity level so callers (notably the round-trip
//! self-test) can raise it for a bounded scope via [`VerbosityGuard`] and
//! have it restored on every exit path.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity levels for a [`DiagnosticSink`]
pub mod verbosity {
    /// Emit nothing
    pub const SILENT: u8 = 0;
    /// Emit errors only
    pub const ERRORS: u8 = 1;
    /// Emit errors and warnings
    pub const WARNINGS: u8 = 2;
    /// Emit everything
    pub const DEBUG: u8 = 3;
    /// Highest defined level
    pub const MAX: u8 = DEBUG;
}

/// Capability interface for warning/error reporting with an adjustable
/// verbosity level
///
/// Configuration types depend on this by reference rather than owning a
/// logger, so embedders decide where diagnostics go.
pub trait DiagnosticSink {
    /// Report a non-fatal correction
    fn add_warning(&self, message: &str);

    /// Report an error (malformed invocation, I/O or self-test failure)
    fn add_error(&self, message: &str);

    /// Current verbosity level
    fn verbosity(&self) -> u8;

    /// Replace the verbosity level
    fn set_verbosity(&self, level: u8);
}

// =============================================================================
// Log Facade Sink
// =============================================================================

/// Sink forwarding to the `log` facade
///
/// Warnings are emitted at `verbosity::WARNINGS` and above, errors at
/// `verbosity::ERRORS` and above.
#[derive(Debug)]
pub struct LogSink {
    level: AtomicU8,
}

impl LogSink {
    /// Create a sink at the given verbosity level
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self {
            level: AtomicU8::new(level),
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(verbosity::WARNINGS)
    }
}

impl DiagnosticSink for LogSink {
    fn add_warning(&self, message: &str) {
        if self.verbosity() >= verbosity::WARNINGS {
            log::warn!("{message}");
        }
    }

    fn add_error(&self, message: &str) {
        if self.verbosity() >= verbosity::ERRORS {
            log::error!("{message}");
        }
    }

    fn verbosity(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }

    fn set_verbosity(&self, level: u8) {
        self.level.store(level, Ordering::Relaxed);
    }
}

// =============================================================================
// Capturing Sink
// =============================================================================

/// Sink that records messages in memory
///
/// Useful in tests and for embedders that surface diagnostics in a UI.
#[derive(Debug)]
pub struct MemorySink {
    level: AtomicU8,
    warnings: RwLock<Vec<String>>,
    errors: RwLock<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink at `verbosity::WARNINGS`
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(verbosity::WARNINGS),
            warnings: RwLock::new(Vec::new()),
            errors: RwLock::new(Vec::new()),
        }
    }

    /// Captured warnings, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.read().expect("Lock poisoned").clone()
    }

    /// Captured errors, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.read().expect("Lock poisoned").clone()
    }

    /// Drop all captured messages
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.warnings.write().expect("Lock poisoned").clear();
        self.errors.write().expect("Lock poisoned").clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for MemorySink {
    fn add_warning(&self, message: &str) {
        if self.verbosity() >= verbosity::WARNINGS {
            self.warnings
                .write()
                .expect("Lock poisoned")
                .push(message.to_string());
        }
    }

    fn add_error(&self, message: &str) {
        if self.verbosity() >= verbosity::ERRORS {
            self.errors
                .write()
                .expect("Lock poisoned")
                .push(message.to_string());
        }
    }

    fn verbosity(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }

    fn set_verbosity(&self, level: u8) {
        self.level.store(level, Ordering::Relaxed);
    }
}

// =============================================================================
// Scoped Verbosity Override
// =============================================================================

/// Saves the sink's verbosity level, overrides it, and restores the saved
/// level on drop
///
/// Restoration happens on every exit path, including unwinding.
pub struct VerbosityGuard<'a> {
    sink: &'a dyn DiagnosticSink,
    previous: u8,
}

impl<'a> VerbosityGuard<'a> {
    /// Override the sink's verbosity for the guard's lifetime
    #[must_use]
    pub fn new(sink: &'a dyn DiagnosticSink, level: u8) -> Self {
        let previous = sink.verbosity();
        sink.set_verbosity(level);
        Self { sink, previous }
    }
}

impl Drop for VerbosityGuard<'_> {
    fn drop(&mut self) {
        self.sink.set_verbosity(self.previous);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures() {
        let sink = MemorySink::new();
        sink.add_warning("w1");
        sink.add_error("e1");

        assert_eq!(sink.warnings(), vec!["w1".to_string()]);
        assert_eq!(sink.errors(), vec!["e1".to_string()]);

        sink.clear();
        assert!(sink.warnings().is_empty());
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_verbosity_gates_messages() {
        let sink = MemorySink::new();

        sink.set_verbosity(verbosity::ERRORS);
        sink.add_warning("suppressed");
        sink.add_error("kept");
        assert!(sink.warnings().is_empty());
        assert_eq!(sink.errors().len(), 1);

        sink.set_verbosity(verbosity::SILENT);
        sink.add_error("suppressed");
        assert_eq!(sink.errors().len(), 1);
    }

    #[test]
    fn test_verbosity_guard_restores() {
        let sink = MemorySink::new();
        sink.set_verbosity(verbosity::ERRORS);

        {
            let _guard = VerbosityGuard::new(&sink, verbosity::MAX);
            assert_eq!(sink.verbosity(), verbosity::MAX);
        }
        assert_eq!(sink.verbosity(), verbosity::ERRORS);
    }

    #[test]
    fn test_verbosity_guard_restores_on_panic() {
        let sink = MemorySink::new();
        sink.set_verbosity(verbosity::WARNINGS);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = VerbosityGuard::new(&sink, verbosity::MAX);
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(sink.verbosity(), verbosity::WARNINGS);
    }
}
