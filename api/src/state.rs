//! Application state module.
//!
//! Defines the state that is passed to route handlers.

use shared::sink::{ConsoleSink, StdoutSink};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the console sink rendered payloads are written to. Nothing in here
/// is mutated by requests.
#[derive(Clone)]
pub struct AppState {
    /// Where rendered payloads go.
    sink: Arc<dyn ConsoleSink>,
}

impl AppState {
    /// Creates a new application state writing to the given sink.
    pub fn new(sink: Arc<dyn ConsoleSink>) -> Self {
        Self { sink }
    }

    /// Creates a new application state writing to standard output.
    #[must_use]
    pub fn with_stdout_sink() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    /// Returns a reference to the console sink.
    #[must_use]
    pub fn sink(&self) -> &dyn ConsoleSink {
        self.sink.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_stdout_sink()
    }
}
