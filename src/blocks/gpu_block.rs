// src/blocks/gpu_block.rs
use crate::{
    Result,
    blocks::common::{SensorBlock, nth_token, parse_float, parse_integer, strip_unit},
    types::{GpuReading, Measurement},
};

const VOLTAGE_OFFSET: usize = 2;
const FAN_OFFSET: usize = 3;
const TEMP_OFFSET: usize = 4;
const WATTS_OFFSET: usize = 5;

/// Telemetry from an `amdgpu` report.
///
/// ```text
/// amdgpu-pci-0100              <- trigger
/// Adapter: PCI adapter
/// vddgfx:       +0.80 V                                   <- +2
/// fan1:        1200 RPM  (min =    0 RPM, max = 3200 RPM) <- +3
/// edge:         +40.0°C  (crit = +94.0°C, hyst = -273.1°C)<- +4
/// power1:       10.00 W  (cap = 120.00 W)                 <- +5
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuBlock {
    pub reading: GpuReading,
}

impl SensorBlock for GpuBlock {
    const NAME: &'static str = "GPU";
    const DEFAULT_TRIGGER: &'static str = "amdgpu-pci-0100";
    const SPAN: usize = WATTS_OFFSET + 1;

    fn from_lines(block: &[String], trigger_index: usize) -> Result<Self> {
        let at = |offset: usize| trigger_index + offset;

        let voltage = nth_token(&block[VOLTAGE_OFFSET], 1, at(VOLTAGE_OFFSET), "GPU voltage")?;
        let voltage = parse_float(voltage, at(VOLTAGE_OFFSET), "GPU voltage")?;

        let fan = nth_token(&block[FAN_OFFSET], 1, at(FAN_OFFSET), "GPU fan")?;
        let fan_rpm = parse_integer(fan, at(FAN_OFFSET), "GPU fan")?;

        let watts = nth_token(&block[WATTS_OFFSET], 1, at(WATTS_OFFSET), "GPU watts")?;
        let watts = parse_float(watts, at(WATTS_OFFSET), "GPU watts")?;

        let temp = nth_token(&block[TEMP_OFFSET], 1, at(TEMP_OFFSET), "GPU temperature")?;
        let temp = strip_unit(temp, at(TEMP_OFFSET), "GPU temperature")?;
        let temp_celsius = parse_float(temp, at(TEMP_OFFSET), "GPU temperature")?;

        Ok(Self {
            reading: GpuReading {
                voltage,
                fan_rpm,
                watts,
                temp_celsius,
            },
        })
    }

    fn apply(self, measurement: &mut Measurement) {
        measurement.set_gpu(self.reading);
    }
}
