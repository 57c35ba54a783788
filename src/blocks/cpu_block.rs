// src/blocks/cpu_block.rs
use crate::{
    Result,
    blocks::common::{SensorBlock, nth_token, parse_float, strip_unit},
    types::{CPU_CORE_COUNT, Measurement},
};

/// Offset of the `Core 0` line from the `coretemp-isa-0000` header.
const FIRST_CORE_OFFSET: usize = 3;

/// Per-core temperatures from a `coretemp` report.
///
/// ```text
/// coretemp-isa-0000            <- trigger
/// Adapter: ISA adapter
/// Package id 0:  +45.0°C  (high = +80.0°C, crit = +100.0°C)
/// Core 0:        +42.0°C  (high = +80.0°C, crit = +100.0°C)   <- +3
/// ...
/// Core 5:        +44.0°C  (high = +80.0°C, crit = +100.0°C)   <- +8
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuBlock {
    pub temps: [f64; CPU_CORE_COUNT],
}

impl SensorBlock for CpuBlock {
    const NAME: &'static str = "CPU";
    const DEFAULT_TRIGGER: &'static str = "coretemp-isa-0000";
    const SPAN: usize = FIRST_CORE_OFFSET + CPU_CORE_COUNT;

    fn from_lines(block: &[String], trigger_index: usize) -> Result<Self> {
        let mut temps = [0.0; CPU_CORE_COUNT];
        for (core, temp) in temps.iter_mut().enumerate() {
            let offset = FIRST_CORE_OFFSET + core;
            let line_index = trigger_index + offset;
            let token = nth_token(&block[offset], 2, line_index, "CPU core temperature")?;
            let value = strip_unit(token, line_index, "CPU core temperature")?;
            *temp = parse_float(value, line_index, "CPU core temperature")?;
        }
        Ok(Self { temps })
    }

    fn apply(self, measurement: &mut Measurement) {
        measurement.set_cpu_temps(self.temps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, parsing::LineBuffer};

    const REPORT: &str = "coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +45.0°C  (high = +80.0°C, crit = +100.0°C)
Core 0:        +42.0°C  (high = +80.0°C, crit = +100.0°C)
Core 1:        +43.0°C  (high = +80.0°C, crit = +100.0°C)
Core 2:        +41.0°C  (high = +80.0°C, crit = +100.0°C)
Core 3:        +44.0°C  (high = +80.0°C, crit = +100.0°C)
Core 4:        +40.0°C  (high = +80.0°C, crit = +100.0°C)
Core 5:        +46.5°C  (high = +80.0°C, crit = +100.0°C)
";

    #[test]
    fn decodes_six_cores_in_order() {
        let lines = LineBuffer::from_text(REPORT);
        let block = CpuBlock::decode(&lines, 0).unwrap();
        assert_eq!(block.temps, [42.0, 43.0, 41.0, 44.0, 40.0, 46.5]);
    }

    #[test]
    fn truncated_report() {
        let text: String = REPORT.lines().take(7).map(|l| format!("{l}\n")).collect();
        let lines = LineBuffer::from_text(&text);
        assert!(matches!(
            CpuBlock::decode(&lines, 0),
            Err(Error::TruncatedBlockError {
                block: "CPU",
                line: 0,
                required: 9,
                available: 7,
            })
        ));
    }

    #[test]
    fn malformed_core_line_reports_its_index() {
        let text = REPORT.replace("+44.0°C  (high", "ERROR  (high");
        let lines = LineBuffer::from_text(&text);
        match CpuBlock::decode(&lines, 0) {
            Err(Error::MalformedValueError { line, token, .. }) => {
                assert_eq!(line, 6);
                assert_eq!(token.as_deref(), Some("ERR"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
