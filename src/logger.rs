//! Log sink capability handed to the product updater.

use parking_lot::Mutex;

/// Where the updater writes its human-readable log lines.
pub trait Logger {
    fn log(&self, line: &str);
}

/// Forwards lines to `tracing` at info level under the `crop` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::info!(target: "crop", "{line}");
    }
}

/// Keeps every line in memory. Used by tests and by callers that want to
/// attach the log to their own output.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Whether any recorded line contains `needle`.
    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|l| l.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, line: &str) {
        (**self).log(line)
    }
}
