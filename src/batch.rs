//! Directory conversion of sensor logs to JSON dumps.
//!
//! Every file in the input directory with the configured extension is parsed
//! and written as `<stem>.json` into the output directory. A file that fails
//! to parse is logged and reported; the remaining files are still converted.
//!
//! ```no_run
//! use hwmon_log_rs::{BatchConfig, Result, batch};
//!
//! fn main() -> Result<()> {
//!     let config = BatchConfig::new("analysis/data", "analysis/json");
//!     let report = batch::convert_directory(&config)?;
//!     for (path, err) in &report.failed {
//!         eprintln!("{}: {err}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

use crate::{Error, Result, json, parsing::ParserConfig};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Where to find logs and where to write their dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory scanned for logs (not recursive).
    pub input_dir: PathBuf,
    /// Directory receiving the JSON dumps; created if missing.
    pub output_dir: PathBuf,
    /// Extension of log files, without the dot.
    pub extension: String,
    /// Settings applied to every file.
    pub parser: ParserConfig,
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extension: "txt".to_string(),
            parser: ParserConfig::default(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// A converted log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub input: PathBuf,
    pub output: PathBuf,
    pub measurements: usize,
}

/// Outcome of [`convert_directory`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    /// Logs that could not be converted, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every matching log in `config.input_dir`.
///
/// Only a failure to list the input directory or create the output directory
/// is returned as an error. Files are processed in path order.
pub fn convert_directory(config: &BatchConfig) -> Result<BatchReport> {
    let inputs = list_logs(&config.input_dir, &config.extension)?;
    fs::create_dir_all(&config.output_dir)?;

    let mut report = BatchReport::default();
    for input in inputs {
        match convert_one(&input, &config.output_dir, &config.parser) {
            Ok(converted) => report.converted.push(converted),
            Err(e) => {
                warn!("Skipping {}: {}", input.display(), e);
                report.failed.push((input, e));
            }
        }
    }

    info!(
        "Converted {} of {} logs in {}",
        report.converted.len(),
        report.converted.len() + report.failed.len(),
        config.input_dir.display()
    );
    Ok(report)
}

/// Parse one log and write `<stem>.json` into `output_dir`.
///
/// Returns the path of the written dump.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    parser: &ParserConfig,
) -> Result<PathBuf> {
    convert_one(input.as_ref(), output_dir.as_ref(), parser).map(|c| c.output)
}

fn convert_one(input: &Path, output_dir: &Path, parser: &ParserConfig) -> Result<Converted> {
    let measurements = crate::parse_file(input, parser)?;
    let output = output_path(input, output_dir);
    json::save_to_file(&measurements, &output)?;

    info!(
        "Wrote {} ({} measurements)",
        output.display(),
        measurements.len()
    );
    Ok(Converted {
        input: input.to_path_buf(),
        output,
        measurements: measurements.len(),
    })
}

fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".json");
    output_dir.join(name)
}

fn list_logs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            logs.push(path);
        }
    }
    logs.sort();
    Ok(logs)
}
