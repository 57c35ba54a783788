use hwmon_log_rs::{BatchConfig, FinalRecord, ParserConfig, Result, batch};

fn main() -> Result<()> {
    // RUST_LOG=info shows one line per written dump
    env_logger::init();

    // 1) Directories come from the command line, defaulting to the layout
    //    the capture script uses
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut dirs = args.iter().filter(|a| !a.starts_with("--"));
    let data_dir = dirs.next().map_or("data", String::as_str);
    let json_dir = dirs.next().map_or("json", String::as_str);

    // 2) Keep the last tick of every log; pass --legacy to match old dumps
    let policy = if args.iter().any(|a| a == "--legacy") {
        FinalRecord::Drop
    } else {
        FinalRecord::Flush
    };
    let config = BatchConfig::new(data_dir, json_dir)
        .with_parser(ParserConfig::default().with_final_record(policy));

    // 3) Convert; a broken log is reported but does not stop the run
    let report = batch::convert_directory(&config)?;
    for converted in &report.converted {
        println!(
            "{} -> {} ({} ticks)",
            converted.input.display(),
            converted.output.display(),
            converted.measurements
        );
    }
    for (path, err) in &report.failed {
        eprintln!("FAILED {}: {}", path.display(), err);
    }

    Ok(())
}
