//! JSON dumps of parsed measurements.
//!
//! The serialized form is an array with one object per tick, written one
//! object per line:
//!
//! ```text
//! [{"date":"2019-10-12 13:17:05-0400","CPU-0":42.0,...,"GPU Voltage":0.8,"GPU Fan":1200,"GPU Watts":10.0,"GPU":40.0},
//! {"date":"2019-10-12 13:17:10-0400","CPU-0":43.0,...}]
//! ```
//!
//! Loading is lenient: entries without a `date` are kept as they are, so a
//! dump edited by hand (or annotated by other tooling) still loads.
//!
//! ```no_run
//! use hwmon_log_rs::{ParserConfig, Result, json, parse_file};
//!
//! fn convert() -> Result<()> {
//!     let measurements = parse_file("data/run_log.txt", &ParserConfig::default())?;
//!     json::save_to_file(&measurements, "json/run_log.json")?;
//!
//!     let entries = json::load_from_file("json/run_log.json")?;
//!     assert_eq!(entries.len(), measurements.len());
//!     Ok(())
//! }
//! ```

use crate::{
    Error, Result,
    timestamp::Timestamp,
    types::{
        CPU_CORE_COUNT, DATE_KEY, GPU_FAN_KEY, GPU_TEMP_KEY, GPU_VOLTAGE_KEY, GPU_WATTS_KEY,
        GpuReading, Measurement, cpu_key,
    },
};
use serde_json::Value;
use std::path::Path;

/// Render measurements as a JSON array, one object per line.
pub fn serialize(measurements: &[Measurement]) -> Result<String> {
    let mut out = String::from("[");
    for (i, measurement) in measurements.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        let object = serde_json::to_string(measurement).map_err(|e| {
            Error::SerializationError(format!("JSON serialization failed: {}", e))
        })?;
        out.push_str(&object);
    }
    out.push(']');
    Ok(out)
}

/// Save measurements to a JSON file.
pub fn save_to_file<P: AsRef<Path>>(measurements: &[Measurement], path: P) -> Result<()> {
    let json = serialize(measurements)?;

    std::fs::write(path, json).map_err(Error::IOError)?;

    Ok(())
}

/// One element of a loaded dump.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedEntry {
    date: Option<Timestamp>,
    value: Value,
}

impl LoadedEntry {
    /// The parsed `date`, or `None` for entries without one.
    pub fn date(&self) -> Option<Timestamp> {
        self.date
    }

    /// The entry exactly as it appeared in the file.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// A numeric field by key, `None` when absent or not a number.
    pub fn field(&self, key: &str) -> Option<f64> {
        self.value.get(key)?.as_f64()
    }

    /// Rebuild the [`Measurement`] this entry was serialized from.
    ///
    /// Returns `Ok(None)` for undated entries. CPU temperatures must be all
    /// six or none, and the GPU keys all four or none.
    pub fn to_measurement(&self) -> Result<Option<Measurement>> {
        let Some(date) = self.date else {
            return Ok(None);
        };
        let mut measurement = Measurement::new(date);

        let temps: Vec<f64> = (0..CPU_CORE_COUNT)
            .filter_map(|core| self.number(&cpu_key(core)).transpose())
            .collect::<Result<_>>()?;
        match <[f64; CPU_CORE_COUNT]>::try_from(temps) {
            Ok(temps) => measurement.set_cpu_temps(temps),
            Err(temps) if temps.is_empty() => {}
            Err(temps) => {
                return Err(Error::SerializationError(format!(
                    "entry at {date} has {} of {CPU_CORE_COUNT} CPU temperatures",
                    temps.len()
                )));
            }
        }

        let voltage = self.number(GPU_VOLTAGE_KEY)?;
        let fan_rpm = self.integer(GPU_FAN_KEY)?;
        let watts = self.number(GPU_WATTS_KEY)?;
        let temp_celsius = self.number(GPU_TEMP_KEY)?;
        match (voltage, fan_rpm, watts, temp_celsius) {
            (Some(voltage), Some(fan_rpm), Some(watts), Some(temp_celsius)) => {
                measurement.set_gpu(GpuReading {
                    voltage,
                    fan_rpm,
                    watts,
                    temp_celsius,
                });
            }
            (None, None, None, None) => {}
            _ => {
                return Err(Error::SerializationError(format!(
                    "entry at {date} has a partial GPU reading"
                )));
            }
        }

        Ok(Some(measurement))
    }

    fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.value.get(key) {
            None => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| not_a_number(key, v)),
        }
    }

    fn integer(&self, key: &str) -> Result<Option<i64>> {
        match self.value.get(key) {
            None => Ok(None),
            Some(v) => v.as_i64().map(Some).ok_or_else(|| not_a_number(key, v)),
        }
    }
}

fn not_a_number(key: &str, value: &Value) -> Error {
    Error::SerializationError(format!("{key:?} is not a number: {value}"))
}

/// Parse a JSON dump.
///
/// A non-empty string `date` is parsed into a [`Timestamp`]; a bad one is a
/// [`Error::TimestampFormatError`]. Entries with no `date` (missing, `null` or
/// empty) pass through untouched.
pub fn load(json: &str) -> Result<Vec<LoadedEntry>> {
    let parsed: Value = serde_json::from_str(json).map_err(|e| {
        Error::SerializationError(format!("JSON deserialization failed: {}", e))
    })?;
    let Value::Array(items) = parsed else {
        return Err(Error::SerializationError(
            "expected a JSON array of measurements".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|value| -> Result<LoadedEntry> {
            let date = match value.get(DATE_KEY) {
                Some(Value::String(text)) if !text.is_empty() => {
                    Some(Timestamp::parse_canonical(text)?)
                }
                Some(Value::String(_)) | Some(Value::Null) | None => None,
                Some(other) => {
                    return Err(Error::SerializationError(format!(
                        "\"date\" must be a string, found {other}"
                    )));
                }
            };
            Ok(LoadedEntry { date, value })
        })
        .collect()
}

/// Load a JSON dump from disk.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedEntry>> {
    let json = std::fs::read_to_string(path).map_err(Error::IOError)?;
    load(&json)
}

/// Load a dump and rebuild its measurements, skipping undated entries.
pub fn load_measurements(json: &str) -> Result<Vec<Measurement>> {
    let mut measurements = Vec::new();
    for entry in load(json)? {
        if let Some(measurement) = entry.to_measurement()? {
            measurements.push(measurement);
        }
    }
    Ok(measurements)
}
