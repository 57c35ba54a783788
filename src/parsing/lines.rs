use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// The lines of a sensor log, right-trimmed and addressable by index.
///
/// Sensor reports are decoded at fixed offsets from their trigger line, so the
/// buffer is built once and then only read.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split `text` into lines, dropping line terminators and trailing
    /// whitespace. Leading whitespace and blank lines are kept.
    pub fn from_text(text: &str) -> Self {
        let lines = text.lines().map(|line| line.trim_end().to_string()).collect();
        Self { lines }
    }

    /// Read a log from disk.
    ///
    /// Invalid UTF-8 is replaced rather than rejected: a Latin-1 degree sign
    /// still decodes to a single character and the unit suffix stays two
    /// characters long.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).map_err(Error::IOError)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::from_text(&text))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Borrow `len` lines starting at `start`.
    ///
    /// Returns [`Error::TruncatedBlockError`] naming `block` when the buffer ends
    /// before the window does.
    pub fn window(&self, start: usize, len: usize, block: &'static str) -> Result<&[String]> {
        let available = self.lines.len().saturating_sub(start);
        if available < len {
            return Err(Error::TruncatedBlockError {
                block,
                line: start,
                required: len,
                available,
            });
        }
        Ok(&self.lines[start..start + len])
    }
}
