//! Operator console shared by the orchestrator and child output readers.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable handle to the operator-facing output.
///
/// Every write is flushed before the lock is released, so lines forwarded from
/// different reader threads never tear and become visible immediately.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console backed by the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write raw bytes (typically one forwarded line) and flush.
    pub fn write_chunk(&self, bytes: &[u8]) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("console lock poisoned"))?;
        sink.write_all(bytes)?;
        sink.flush()
    }

    /// Write `text` followed by a newline.
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.write_chunk(format!("{text}\n").as_bytes())
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
