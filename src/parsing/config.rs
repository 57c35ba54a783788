use crate::blocks::{CpuBlock, GpuBlock, SensorBlock};

/// Prefix of the line the logging script writes before every tick.
pub const DEFAULT_MARKER_PREFIX: &str = "DATE::";

/// What to do with the measurement still open when the input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalRecord {
    /// Discard it. Records are only finalized by the next marker, which is how
    /// the existing JSON dumps were produced.
    #[default]
    Drop,
    /// Append it to the output.
    Flush,
}

/// Line prefixes and end-of-input policy for the record assembler.
///
/// # Example
///
/// ```
/// use hwmon_log_rs::{FinalRecord, ParserConfig};
///
/// let config = ParserConfig::default().with_final_record(FinalRecord::Flush);
/// assert_eq!(config.marker_prefix, "DATE::");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Prefix of marker lines; the timestamp follows immediately.
    pub marker_prefix: String,
    /// Prefix of the CPU report header.
    pub cpu_trigger: String,
    /// Prefix of the GPU report header.
    pub gpu_trigger: String,
    /// Policy for the last open measurement.
    pub final_record: FinalRecord,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            cpu_trigger: CpuBlock::DEFAULT_TRIGGER.to_string(),
            gpu_trigger: GpuBlock::DEFAULT_TRIGGER.to_string(),
            final_record: FinalRecord::default(),
        }
    }
}

impl ParserConfig {
    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    /// Use another `coretemp` chip name, e.g. `coretemp-isa-0001`.
    pub fn with_cpu_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.cpu_trigger = trigger.into();
        self
    }

    /// Use another `amdgpu` chip name, e.g. `amdgpu-pci-0300`.
    pub fn with_gpu_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.gpu_trigger = trigger.into();
        self
    }

    pub fn with_final_record(mut self, policy: FinalRecord) -> Self {
        self.final_record = policy;
        self
    }
}
