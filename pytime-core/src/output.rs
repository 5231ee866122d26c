//! Output trait for the pytime interpreter
//!
//! `print` and REPL echo go through an `Output` installed on the interpreter.
//! The CLI writes to stdout; tests capture into a `BufferOutput`.

use std::sync::{Arc, Mutex};

/// Byte sink used by the interpreter for everything it prints.
pub trait Output: Send {
    /// Write bytes to the output.
    fn write(&mut self, data: &[u8]) -> Result<(), ()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), ()>;
}

// RUST CONCEPT: Shared capture buffer
// The interpreter owns its boxed Output, so the buffer lives behind an Arc and
// a clone kept by the caller can read what was written
#[derive(Debug, Clone, Default)]
pub struct BufferOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Output for BufferOutput {
    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        let mut buffer = self.buffer.lock().map_err(|_| ())?;
        buffer.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}
