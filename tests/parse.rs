//! Integration tests for log parsing.

use hwmon_log_rs::{
    Error, FinalRecord, GpuReading, Measurement, ParserConfig, Result, Timestamp, parse,
    parse_file, parse_with,
};
use std::path::Path;

const TEST_DATA_DIR: &str = "tests/data";

fn test_data_path(filename: &str) -> String {
    Path::new(TEST_DATA_DIR)
        .join(filename)
        .to_string_lossy()
        .to_string()
}

fn flush() -> ParserConfig {
    ParserConfig::default().with_final_record(FinalRecord::Flush)
}

const CPU_REPORT: &str = "coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +45.0°C  (high = +80.0°C, crit = +100.0°C)
Core 0:        +42.0°C  (high = +80.0°C, crit = +100.0°C)
Core 1:        +43.0°C  (high = +80.0°C, crit = +100.0°C)
Core 2:        +41.0°C  (high = +80.0°C, crit = +100.0°C)
Core 3:        +44.0°C  (high = +80.0°C, crit = +100.0°C)
Core 4:        +40.0°C  (high = +80.0°C, crit = +100.0°C)
Core 5:        +46.0°C  (high = +80.0°C, crit = +100.0°C)
";

const GPU_REPORT: &str = "amdgpu-pci-0100
Adapter: PCI adapter
vddgfx:       +0.80 V
fan1:        1187 RPM  (min =    0 RPM, max = 3200 RPM)
edge:         +41.0°C  (crit = +94.0°C, hyst = -273.1°C)
power1:      14.13 W  (cap = 150.00 W)
";

// ============================================================================
// Fixture file
// ============================================================================

#[test]
fn fixture_drops_the_last_tick_by_default() -> Result<()> {
    let measurements = parse_file(test_data_path("run_log.txt"), &ParserConfig::default())?;

    assert_eq!(measurements.len(), 2);
    let first = &measurements[0];
    assert_eq!(first.timestamp().to_string(), "2019-10-12 13:17:05-0400");
    assert_eq!(
        first.cpu_temps().values().copied().collect::<Vec<_>>(),
        vec![42.0, 43.0, 41.0, 44.0, 40.0, 46.0]
    );
    assert_eq!(
        first.gpu(),
        Some(&GpuReading {
            voltage: 0.8,
            fan_rpm: 1187,
            watts: 14.13,
            temp_celsius: 41.0,
        })
    );
    assert!(measurements[1].timestamp() > first.timestamp());
    Ok(())
}

#[test]
fn fixture_flush_keeps_the_last_tick() -> Result<()> {
    let measurements = parse_file(test_data_path("run_log.txt"), &flush())?;

    assert_eq!(measurements.len(), 3);
    // The last marker was written without the offset colon.
    assert_eq!(
        measurements[2].timestamp(),
        Timestamp::parse_marker("2019-10-12T13:17:15-04:00")?
    );
    assert_eq!(measurements[2].gpu().map(|g| g.fan_rpm), Some(1650));
    Ok(())
}

#[test]
fn missing_file() {
    let result = parse_file(test_data_path("does_not_exist.txt"), &ParserConfig::default());
    assert!(matches!(result, Err(Error::IOError(_))));
}

// ============================================================================
// Record assembly
// ============================================================================

#[test]
fn single_cpu_block_without_gpu() -> Result<()> {
    let text = format!("DATE::2019-10-12T13:17:05-04:00\n{CPU_REPORT}");
    let measurements = parse_with(&text, &flush())?;

    assert_eq!(measurements.len(), 1);
    assert_eq!(measurements[0].cpu_temps().len(), 6);
    assert!(measurements[0].gpu().is_none());
    Ok(())
}

#[test]
fn marker_count_minus_one_under_legacy_policy() -> Result<()> {
    let text = format!(
        "DATE::2019-10-12T13:17:05-04:00\n{CPU_REPORT}DATE::2019-10-12T13:17:10-04:00\n"
    );

    assert_eq!(parse(&text)?.len(), 1);
    assert_eq!(parse_with(&text, &flush())?.len(), 2);
    Ok(())
}

#[test]
fn ticks_keep_input_order() -> Result<()> {
    let mut text = String::new();
    for second in [5, 10, 15, 20] {
        text.push_str(&format!("DATE::2019-10-12T13:17:{second:02}-04:00\n"));
        text.push_str(GPU_REPORT);
    }
    let measurements = parse_with(&text, &flush())?;

    let seconds: Vec<u32> = measurements.iter().map(|m| m.timestamp().second()).collect();
    assert_eq!(seconds, vec![5, 10, 15, 20]);
    assert!(measurements.iter().all(|m| m.cpu_temps().is_empty()));
    Ok(())
}

#[test]
fn report_before_first_marker() {
    let text = format!("{GPU_REPORT}DATE::2019-10-12T13:17:05-04:00\n");
    assert!(matches!(
        parse(&text),
        Err(Error::UnexpectedBlockError {
            block: "GPU",
            line: 0
        })
    ));
}

#[test]
fn bad_marker_timestamp() {
    let text = format!("DATE::2019-10-12T13:17:05-04:00\n{CPU_REPORT}DATE::Sat Oct 12 13:17:10 EDT 2019\n");
    match parse(&text) {
        Err(Error::TimestampFormatError { text, line }) => {
            assert_eq!(text, "Sat Oct 12 13:17:10 EDT 2019");
            assert_eq!(line, Some(10));
        }
        other => panic!("unexpected {:?}", other),
    }
}

// ============================================================================
// Decoder failures
// ============================================================================

#[test]
fn truncated_cpu_block_aborts_the_file() {
    let partial: String = CPU_REPORT.lines().take(6).map(|l| format!("{l}\n")).collect();
    let text = format!(
        "DATE::2019-10-12T13:17:00-04:00\n{GPU_REPORT}DATE::2019-10-12T13:17:05-04:00\n{partial}"
    );

    match parse_with(&text, &flush()) {
        Err(Error::TruncatedBlockError {
            block,
            line,
            required,
            available,
        }) => {
            assert_eq!(block, "CPU");
            assert_eq!(line, 8);
            assert_eq!(required, 9);
            assert_eq!(available, 6);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unreadable_gpu_wattage_leaves_no_gpu_fields() {
    let bad = GPU_REPORT.replace("14.13 W", "N/A");
    let text = format!("DATE::2019-10-12T13:17:05-04:00\n{CPU_REPORT}{bad}");

    let err = parse_with(&text, &flush()).unwrap_err();
    match err {
        Error::MalformedValueError { line, field, token } => {
            assert_eq!(line, 15);
            assert_eq!(field, "GPU watts");
            assert_eq!(token.as_deref(), Some("N/A"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn gpu_fields_are_all_or_nothing() -> Result<()> {
    let variants = [
        GPU_REPORT.to_string(),
        GPU_REPORT.replace("+0.80 V", "N/A"),
        GPU_REPORT.replace("1187 RPM", "--"),
        GPU_REPORT.replace("+41.0°C", "hot"),
        GPU_REPORT.replace("14.13 W", "N/A"),
    ];

    for report in variants {
        let text = format!("DATE::2019-10-12T13:17:05-04:00\n{report}");
        match parse_with(&text, &flush()) {
            Ok(measurements) => {
                let m: &Measurement = &measurements[0];
                let present = [
                    m.field("GPU Voltage"),
                    m.field("GPU Fan"),
                    m.field("GPU Watts"),
                    m.field("GPU"),
                ]
                .iter()
                .filter(|v| v.is_some())
                .count();
                assert_eq!(present, 4);
            }
            Err(e) => assert!(matches!(e, Error::MalformedValueError { .. }), "{e}"),
        }
    }
    Ok(())
}

#[test]
fn error_messages_locate_the_input() {
    let text = format!("DATE::2019-10-12T13:17:05-04:00\n{}", GPU_REPORT.replace("1187", "fast"));
    let message = parse(&text).unwrap_err().to_string();
    assert_eq!(message, "Malformed GPU fan value at line 5: \"fast\"");
}
