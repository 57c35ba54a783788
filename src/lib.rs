#![forbid(unsafe_code)]

//! # hwmon-log-rs
//!
//! A Rust library for turning lm-sensors console dumps into ordered
//! measurement records.
//!
//! A logging script samples the machine on a fixed interval: it prints a
//! `DATE::` marker line with the current time, then appends the raw output of
//! `sensors` for the CPU (`coretemp-isa-0000`) and the GPU (`amdgpu-pci-0100`).
//! This crate reconstructs one [`Measurement`] per tick from that text.
//!
//! ## Features
//!
//! - **Parsing**: Marker-driven record assembly with fixed-offset decoding of
//!   the CPU and GPU reports
//! - **Timestamps**: Both `-04:00` and `-0400` offsets normalize to one instant
//! - **JSON**: Serialize measurements and load dumps back
//! - **Series**: Aligned per-field columns for plotting
//! - **Batch**: Convert a directory of logs, isolating failures per file
//!
//! ## Quick Start
//!
//! ### Parsing a log
//!
//! ```
//! use hwmon_log_rs::{FinalRecord, ParserConfig, Result, parse_with};
//!
//! fn main() -> Result<()> {
//!     let log = "\
//! DATE::2019-10-12T13:17:05-04:00
//! amdgpu-pci-0100
//! Adapter: PCI adapter
//! vddgfx:       +0.80 V
//! fan1:        1200 RPM  (min =    0 RPM, max = 3200 RPM)
//! edge:         +40.0°C  (crit = +94.0°C, hyst = -273.1°C)
//! power1:       10.00 W  (cap = 120.00 W)
//! ";
//!     let config = ParserConfig::default().with_final_record(FinalRecord::Flush);
//!     let measurements = parse_with(log, &config)?;
//!
//!     let gpu = measurements[0].gpu().expect("GPU report");
//!     assert_eq!(gpu.fan_rpm, 1200);
//!     assert_eq!(measurements[0].timestamp().to_string(), "2019-10-12 13:17:05-0400");
//!     Ok(())
//! }
//! ```
//!
//! ### Writing and reading JSON
//!
//! ```no_run
//! use hwmon_log_rs::{ParserConfig, Result, json, parse_file};
//!
//! fn main() -> Result<()> {
//!     let measurements = parse_file("run_log.txt", &ParserConfig::default())?;
//!     json::save_to_file(&measurements, "run_log.json")?;
//!
//!     let text = std::fs::read_to_string("run_log.json")?;
//!     assert_eq!(json::load_measurements(&text)?, measurements);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`parsing`] | Line buffer, record assembler and parser configuration |
//! | [`blocks`] | CPU and GPU report decoders |
//! | [`json`] | JSON serialization and loading |
//! | [`series`] | Aligned column extraction for plotting |
//! | [`batch`] | Directory conversion |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## End of Input
//!
//! A tick is only finalized when the next `DATE::` marker is read, so by
//! default the last tick of a log is dropped. This matches the JSON dumps
//! produced so far. Use [`FinalRecord::Flush`] to keep it.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`. Parsing is fail-fast: any malformed
//! marker or report aborts the whole file.

pub mod blocks;
pub mod parsing;

mod timestamp;
mod types;

pub mod error;
pub mod series;

#[cfg(feature = "serde_json")]
pub mod batch;
#[cfg(feature = "serde_json")]
pub mod json;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use parsing::{FinalRecord, LineBuffer, ParserConfig, parse, parse_file, parse_with};
pub use series::{SeriesSet, Tick};
pub use timestamp::Timestamp;
pub use types::{
    CPU_CORE_COUNT, DATE_KEY, GPU_FAN_KEY, GPU_TEMP_KEY, GPU_VOLTAGE_KEY, GPU_WATTS_KEY,
    GpuReading, Measurement, cpu_key,
};

#[cfg(feature = "serde_json")]
pub use batch::{BatchConfig, BatchReport};
#[cfg(feature = "serde_json")]
pub use json::{LoadedEntry, load, serialize};
