use hwmon_log_rs::{FinalRecord, ParserConfig, Result, SeriesSet, parse_file};

fn main() -> Result<()> {
    env_logger::init();

    // This assumes a capture produced by the logging script
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "run_log.txt".to_string());
    let config = ParserConfig::default().with_final_record(FinalRecord::Flush);
    let measurements = parse_file(&path, &config)?;

    let series = SeriesSet::from_measurements(&measurements);
    let elapsed = series.elapsed_seconds();
    println!("{}: {} ticks", path, series.len());
    if let (Some(first), Some(last)) = (measurements.first(), elapsed.last()) {
        println!("  started {} and ran {:.0} s", first.timestamp(), last);
    }
    println!();

    // Peak value of every field over the run
    let mut keys: Vec<String> = (0..hwmon_log_rs::CPU_CORE_COUNT)
        .map(hwmon_log_rs::cpu_key)
        .collect();
    keys.extend(
        ["GPU", "GPU Fan", "GPU Watts", "GPU Voltage"]
            .iter()
            .map(|k| k.to_string()),
    );
    for key in keys {
        let column = series.column(&key);
        let present: Vec<f64> = column.iter().flatten().copied().collect();
        match present.iter().copied().reduce(f64::max) {
            Some(peak) => println!(
                "  {:<12} peak {:>8.2}  ({} of {} ticks)",
                key,
                peak,
                present.len(),
                column.len()
            ),
            None => println!("  {:<12} not reported", key),
        }
    }

    Ok(())
}
