//! Log-to-record parsing.
//!
//! [`LineBuffer`] splits the raw log once, [`RecordAssembler`] walks it and
//! hands trigger lines to the decoders in [`crate::blocks`].

pub mod assembler;
pub mod config;
pub mod lines;

pub use assembler::RecordAssembler;
pub use config::{DEFAULT_MARKER_PREFIX, FinalRecord, ParserConfig};
pub use lines::LineBuffer;

use crate::{Result, types::Measurement};
use std::path::Path;

/// Parse a sensor log with the default configuration.
///
/// The last tick is dropped unless another marker follows it; see
/// [`FinalRecord`].
pub fn parse(text: &str) -> Result<Vec<Measurement>> {
    parse_with(text, &ParserConfig::default())
}

/// Parse a sensor log held in memory.
pub fn parse_with(text: &str, config: &ParserConfig) -> Result<Vec<Measurement>> {
    parse_lines(&LineBuffer::from_text(text), config)
}

/// Read and parse a sensor log from disk.
pub fn parse_file<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Vec<Measurement>> {
    let lines = LineBuffer::from_file(path)?;
    parse_lines(&lines, config)
}

/// Parse an already split log.
pub fn parse_lines(lines: &LineBuffer, config: &ParserConfig) -> Result<Vec<Measurement>> {
    RecordAssembler::new(config).assemble(lines)
}
