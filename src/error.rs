//! Error types for sensor log operations.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur when reading, parsing, serializing or loading sensor logs.
//!
//! # Example
//!
//! ```no_run
//! use hwmon_log_rs::{parse_file, Error, ParserConfig, Result};
//!
//! fn process_file(path: &str) -> Result<()> {
//!     match parse_file(path, &ParserConfig::default()) {
//!         Ok(measurements) => {
//!             println!("Parsed {} ticks", measurements.len());
//!             Ok(())
//!         }
//!         Err(e @ Error::TruncatedBlockError { .. }) => {
//!             eprintln!("Log ends mid-report: {e}");
//!             Err(e)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur during sensor log operations.
///
/// Every parse error is fatal for the file being parsed. Line indices are
/// 0-based in the variants and reported 1-based by [`fmt::Display`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while reading or writing a file.
    IOError(std::io::Error),

    /// A marker timestamp did not match `YYYY-MM-DDThh:mm:ss±hh[:]mm`.
    TimestampFormatError {
        /// The text that failed to parse
        text: String,
        /// Index of the marker line, when known
        line: Option<usize>,
    },

    /// Fewer lines remain after a trigger line than the report needs.
    TruncatedBlockError {
        /// Name of the sensor report ("CPU" or "GPU")
        block: &'static str,
        /// Index of the trigger line
        line: usize,
        /// Lines required, trigger line included
        required: usize,
        /// Lines available from the trigger line to the end of input
        available: usize,
    },

    /// A required token was missing or not numeric.
    MalformedValueError {
        /// Index of the offending line
        line: usize,
        /// Field being decoded
        field: &'static str,
        /// The token found, `None` when the line had too few tokens
        token: Option<String>,
    },

    /// A sensor report appeared before any marker line.
    UnexpectedBlockError {
        /// Name of the sensor report ("CPU" or "GPU")
        block: &'static str,
        /// Index of the trigger line
        line: usize,
    },

    /// JSON encoding or decoding of measurements failed.
    SerializationError(String),
}

impl Error {
    /// Attach a line index to a timestamp error raised outside the assembler.
    pub(crate) fn at_line(self, index: usize) -> Self {
        match self {
            Error::TimestampFormatError { text, .. } => Error::TimestampFormatError {
                text,
                line: Some(index),
            },
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::TimestampFormatError { text, line } => match line {
                Some(line) => write!(
                    f,
                    "Invalid marker timestamp at line {}: {text:?}",
                    line + 1
                ),
                None => write!(f, "Invalid marker timestamp: {text:?}"),
            },
            Error::TruncatedBlockError {
                block,
                line,
                required,
                available,
            } => write!(
                f,
                "{block} report at line {} is truncated: need {required} lines, got {available}",
                line + 1
            ),
            Error::MalformedValueError { line, field, token } => match token {
                Some(token) => write!(
                    f,
                    "Malformed {field} value at line {}: {token:?}",
                    line + 1
                ),
                None => write!(f, "Missing {field} value at line {}", line + 1),
            },
            Error::UnexpectedBlockError { block, line } => write!(
                f,
                "{block} report at line {} appears before any DATE marker",
                line + 1
            ),
            Error::SerializationError(s) => write!(f, "Serialization error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for sensor log operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
