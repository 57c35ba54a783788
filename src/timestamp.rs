//! Canonical, offset-aware timestamps for measurement ticks.
//!
//! The logging script writes its marker lines with GNU `date --iso-8601=seconds`,
//! which renders the UTC offset as `-04:00`. Older captures used `date +%FT%T%z`
//! and render it as `-0400`. Both parse to the same [`Timestamp`].

use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use std::borrow::Cow;
use std::fmt;

/// Pattern of the timestamp following a `DATE::` marker, after colon removal.
const MARKER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Pattern used for the serialized `date` key.
const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// A second-precision instant with an explicit UTC offset.
///
/// Equality, ordering and hashing compare the instant adjusted to UTC, so
/// `13:17:05-0400` and `17:17:05+0000` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parse the text of a marker line, e.g. `2019-10-12T13:17:05-04:00`.
    ///
    /// The offset may be written with or without the colon.
    pub fn parse_marker(text: &str) -> Result<Self> {
        Self::parse_with(text, MARKER_FORMAT)
    }

    /// Parse the canonical rendering, e.g. `2019-10-12 13:17:05-0400`.
    ///
    /// The offset colon is accepted here too, since older JSON dumps were
    /// written with it.
    pub fn parse_canonical(text: &str) -> Result<Self> {
        Self::parse_with(text, CANONICAL_FORMAT)
    }

    fn parse_with(text: &str, format: &str) -> Result<Self> {
        let normalized = strip_offset_colon(text);
        DateTime::parse_from_str(&normalized, format)
            .map(Timestamp)
            .map_err(|_| Error::TimestampFormatError {
                text: text.to_string(),
                line: None,
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Signed UTC offset in minutes (`-240` for `-0400`).
    pub fn offset_minutes(&self) -> i32 {
        self.0.offset().local_minus_utc() / 60
    }

    /// Whole seconds elapsed since `earlier`; negative if `earlier` is later.
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    /// The underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    /// Sub-second precision is discarded.
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let text = <Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Timestamp::parse_canonical(&text).map_err(serde::de::Error::custom)
    }
}

/// Remove the colon of a `±hh:mm` offset. It always sits three characters
/// from the end; anything else is returned untouched.
fn strip_offset_colon(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 3 && bytes[bytes.len() - 3] == b':' {
        let cut = bytes.len() - 3;
        Cow::Owned(format!("{}{}", &text[..cut], &text[cut + 1..]))
    } else {
        Cow::Borrowed(text)
    }
}
