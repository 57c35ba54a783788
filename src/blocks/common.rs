// blocks/common.rs
//! Common trait and token helpers for sensor report decoding.
//!
//! This module provides:
//! - [`SensorBlock`]: Trait for decoding a fixed-shape report from a [`LineBuffer`]
//! - Token helpers shared by the CPU and GPU decoders
//!
//! `sensors` prints fixed-width reports, so every value sits at a known line
//! offset from the chip header and at a known whitespace-separated position
//! within that line.

use crate::{Error, Result, parsing::LineBuffer, types::Measurement};

// ============================================================================
// Token Helpers
// ============================================================================

/// Return the `n`th (0-based) whitespace-separated token of `line`.
///
/// Runs of whitespace count as one separator.
#[inline]
pub fn nth_token<'a>(line: &'a str, n: usize, line_index: usize, field: &'static str) -> Result<&'a str> {
    line.split_whitespace()
        .nth(n)
        .ok_or(Error::MalformedValueError {
            line: line_index,
            field,
            token: None,
        })
}

/// Drop the two-character unit suffix (`°C`) from a reading.
///
/// Characters are counted, not bytes: the degree sign is two bytes in UTF-8.
#[inline]
pub fn strip_unit<'a>(token: &'a str, line_index: usize, field: &'static str) -> Result<&'a str> {
    match token.char_indices().rev().nth(1) {
        Some((cut, _)) => Ok(&token[..cut]),
        None => Err(malformed(token, line_index, field)),
    }
}

/// Parse a decimal reading such as `+42.0` or `0.80`.
///
/// `nan` and `inf` are rejected: JSON has no spelling for them.
#[inline]
pub fn parse_float(token: &str, line_index: usize, field: &'static str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed(token, line_index, field)),
    }
}

/// Parse an integral reading such as `1200`.
#[inline]
pub fn parse_integer(token: &str, line_index: usize, field: &'static str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| malformed(token, line_index, field))
}

fn malformed(token: &str, line_index: usize, field: &'static str) -> Error {
    Error::MalformedValueError {
        line: line_index,
        field,
        token: Some(token.to_string()),
    }
}

// ============================================================================
// SensorBlock Trait
// ============================================================================

/// A fixed-shape sensor report introduced by a trigger line.
///
/// Implementors decode into a value first and touch the measurement only in
/// [`SensorBlock::apply`], so a failed decode never leaves partial fields.
pub trait SensorBlock: Sized {
    /// Short name used in errors and logs.
    const NAME: &'static str;

    /// Prefix of the trigger line as printed by `sensors`.
    const DEFAULT_TRIGGER: &'static str;

    /// Lines covered by the report, trigger line included.
    const SPAN: usize;

    /// Decode the report from its lines. `block[0]` is the trigger line and
    /// `trigger_index` its absolute index, used for error reporting.
    fn from_lines(block: &[String], trigger_index: usize) -> Result<Self>;

    /// Merge the decoded values into `measurement`.
    fn apply(self, measurement: &mut Measurement);

    /// Decode the report whose trigger line is at `trigger_index`.
    fn decode(lines: &LineBuffer, trigger_index: usize) -> Result<Self> {
        let block = lines.window(trigger_index, Self::SPAN, Self::NAME)?;
        Self::from_lines(block, trigger_index)
    }
}
