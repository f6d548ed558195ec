//! Diagnostic reporting.
//!
//! Conversions report progress and recoverable failures through a
//! [`DiagnosticSink`] handed to them by the caller, instead of writing to
//! process-wide state. [`LogSink`] forwards to the `log` facade and
//! [`CollectingSink`] keeps the messages in memory.

use log::Level;
use parking_lot::Mutex;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "mathdocx";

/// Receiver of leveled diagnostic messages.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message.
    fn report(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.report(Level::Debug, message);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _level: Level, _message: &str) {}
}

/// A recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Number of diagnostics recorded at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries.lock().iter().filter(|d| d.level == level).count()
    }

    /// Messages recorded at error level.
    pub fn errors(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.level == Level::Error)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, level: Level, message: &str) {
        self.entries.lock().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_collecting_sink_levels() {
        let sink = CollectingSink::new();
        sink.info("started");
        sink.error("bad formula");
        sink.warn("odd input");
        sink.error("another");

        assert_eq!(sink.count(Level::Error), 2);
        assert_eq!(sink.count(Level::Info), 1);
        assert_eq!(sink.errors(), vec!["bad formula", "another"]);
        assert_eq!(sink.diagnostics()[2].level, Level::Warn);
    }

    #[test]
    fn test_collecting_sink_take() {
        let sink = CollectingSink::new();
        sink.debug("a");
        assert_eq!(sink.take().len(), 1);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_collecting_sink_concurrent() {
        let sink = CollectingSink::new();
        (0..64).into_par_iter().for_each(|i| sink.info(&format!("item {}", i)));
        assert_eq!(sink.count(Level::Info), 64);
    }

    #[test]
    fn test_sinks_as_trait_objects() {
        let sinks: [&dyn DiagnosticSink; 2] = [&LogSink, &NullSink];
        for sink in sinks {
            sink.error("ignored");
        }
    }
}
