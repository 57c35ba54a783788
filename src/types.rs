//! Measurement records shared across the library.
//!
//! A [`Measurement`] is one sampling tick: the marker timestamp plus whatever
//! sensor reports followed it in the log.

use crate::timestamp::Timestamp;
use std::collections::BTreeMap;

/// Number of physical cores reported by the CPU sensor chip.
pub const CPU_CORE_COUNT: usize = 6;

/// Serialized key of the tick timestamp.
pub const DATE_KEY: &str = "date";
/// Serialized key of the GPU core voltage.
pub const GPU_VOLTAGE_KEY: &str = "GPU Voltage";
/// Serialized key of the GPU fan speed.
pub const GPU_FAN_KEY: &str = "GPU Fan";
/// Serialized key of the GPU power draw.
pub const GPU_WATTS_KEY: &str = "GPU Watts";
/// Serialized key of the GPU edge temperature.
pub const GPU_TEMP_KEY: &str = "GPU";

/// Serialized key of a CPU core temperature, `CPU-0` through `CPU-5`.
pub fn cpu_key(core: usize) -> String {
    format!("CPU-{core}")
}

/// Inverse of [`cpu_key`]; `None` for anything that is not a known core.
pub fn parse_cpu_key(key: &str) -> Option<usize> {
    key.strip_prefix("CPU-")?
        .parse::<usize>()
        .ok()
        .filter(|core| *core < CPU_CORE_COUNT)
}

/// The four values of one GPU telemetry report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuReading {
    /// Core voltage in volts
    pub voltage: f64,
    /// Fan speed in RPM
    pub fan_rpm: i64,
    /// Power draw in watts
    pub watts: f64,
    /// Edge temperature in degrees Celsius
    pub temp_celsius: f64,
}

/// One sampling tick.
///
/// The timestamp is fixed at construction. CPU temperatures are replaced six
/// at a time and the GPU group as a whole, so a measurement never holds part
/// of a sensor report.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    timestamp: Timestamp,
    cpu_temps: BTreeMap<usize, f64>,
    gpu: Option<GpuReading>,
}

impl Measurement {
    /// Start a measurement for the tick at `timestamp`, with no sensor data.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            cpu_temps: BTreeMap::new(),
            gpu: None,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Core temperatures keyed by core index, in ascending core order.
    pub fn cpu_temps(&self) -> &BTreeMap<usize, f64> {
        &self.cpu_temps
    }

    pub fn gpu(&self) -> Option<&GpuReading> {
        self.gpu.as_ref()
    }

    /// Store the temperatures of all cores, replacing any earlier report.
    pub fn set_cpu_temps(&mut self, temps: [f64; CPU_CORE_COUNT]) {
        for (core, temp) in temps.into_iter().enumerate() {
            self.cpu_temps.insert(core, temp);
        }
    }

    /// Store a GPU report, replacing any earlier one.
    pub fn set_gpu(&mut self, reading: GpuReading) {
        self.gpu = Some(reading);
    }

    /// Look up a numeric field by its serialized key (`CPU-3`, `GPU Fan`, ...).
    pub fn field(&self, key: &str) -> Option<f64> {
        if let Some(core) = parse_cpu_key(key) {
            return self.cpu_temps.get(&core).copied();
        }
        let gpu = self.gpu.as_ref()?;
        match key {
            GPU_VOLTAGE_KEY => Some(gpu.voltage),
            GPU_FAN_KEY => Some(gpu.fan_rpm as f64),
            GPU_WATTS_KEY => Some(gpu.watts),
            GPU_TEMP_KEY => Some(gpu.temp_celsius),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Measurement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let len = 1 + self.cpu_temps.len() + if self.gpu.is_some() { 4 } else { 0 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(DATE_KEY, &self.timestamp)?;
        for (core, temp) in &self.cpu_temps {
            map.serialize_entry(&cpu_key(*core), temp)?;
        }
        if let Some(gpu) = &self.gpu {
            map.serialize_entry(GPU_VOLTAGE_KEY, &gpu.voltage)?;
            map.serialize_entry(GPU_FAN_KEY, &gpu.fan_rpm)?;
            map.serialize_entry(GPU_WATTS_KEY, &gpu.watts)?;
            map.serialize_entry(GPU_TEMP_KEY, &gpu.temp_celsius)?;
        }
        map.end()
    }
}
