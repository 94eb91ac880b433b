//! Console sink capability.
//!
//! Rendered blocks are written through a [`ConsoleSink`] instead of straight
//! to standard output so the server can be exercised in tests and the output
//! inspected afterwards.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// A destination for rendered console blocks.
pub trait ConsoleSink: Send + Sync {
    /// Writes one rendered block.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_block(&self, block: &str) -> io::Result<()>;
}

/// Writes blocks to the process's standard output.
///
/// Each block is written and flushed under one stdout lock, so blocks from
/// concurrent requests never interleave mid-block.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_block(&self, block: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(block.as_bytes())?;
        stdout.flush()
    }
}

/// Collects blocks in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every block written so far.
    ///
    /// Pushes are atomic, so a poisoned lock is read through.
    #[must_use]
    pub fn blocks(&self) -> Vec<String> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns everything written so far as one string.
    #[must_use]
    pub fn contents(&self) -> String {
        self.blocks().concat()
    }
}

impl ConsoleSink for MemorySink {
    fn write_block(&self, block: &str) -> io::Result<()> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(block.to_owned());
        Ok(())
    }
}
