use super::{FinalRecord, LineBuffer, ParserConfig};
use crate::{
    Error, Result,
    blocks::{CpuBlock, GpuBlock, SensorBlock},
    timestamp::Timestamp,
    types::Measurement,
};
use log::{debug, trace};

/// Whether a measurement is under construction.
#[derive(Debug)]
enum State {
    /// No marker seen yet.
    Idle,
    /// A marker was seen; sensor reports merge into this measurement.
    Open(Measurement),
}

/// Walks a [`LineBuffer`] once and turns marker-delimited ticks into
/// [`Measurement`]s.
///
/// A measurement opens on a marker line, collects the CPU and GPU reports that
/// follow, and is emitted when the next marker appears. The measurement still
/// open at the end of input is handled per [`FinalRecord`].
#[derive(Debug)]
pub struct RecordAssembler<'a> {
    config: &'a ParserConfig,
    state: State,
    output: Vec<Measurement>,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            state: State::Idle,
            output: Vec::new(),
        }
    }

    /// Process every line of `lines` in order and return the finished records.
    ///
    /// Parsing stops at the first error; nothing is returned for the input in
    /// that case.
    pub fn assemble(mut self, lines: &LineBuffer) -> Result<Vec<Measurement>> {
        for index in 0..lines.len() {
            self.process_line(lines, index)?;
        }
        Ok(self.finish())
    }

    /// Handle the line at `index`; trigger lines read ahead from there.
    pub fn process_line(&mut self, lines: &LineBuffer, index: usize) -> Result<()> {
        let Some(line) = lines.get(index) else {
            return Ok(());
        };

        if let Some(text) = line.strip_prefix(self.config.marker_prefix.as_str()) {
            let timestamp = Timestamp::parse_marker(text).map_err(|e| e.at_line(index))?;
            self.open(timestamp, index);
        } else if line.starts_with(self.config.cpu_trigger.as_str()) {
            self.merge::<CpuBlock>(lines, index)?;
        } else if line.starts_with(self.config.gpu_trigger.as_str()) {
            self.merge::<GpuBlock>(lines, index)?;
        }
        Ok(())
    }

    /// End of input: apply the final-record policy and return the output.
    pub fn finish(mut self) -> Vec<Measurement> {
        if let State::Open(measurement) = self.state {
            match self.config.final_record {
                FinalRecord::Flush => {
                    debug!("flushing final tick {}", measurement.timestamp());
                    self.output.push(measurement);
                }
                FinalRecord::Drop => {
                    debug!(
                        "dropping final tick {}: no marker follows it",
                        measurement.timestamp()
                    );
                }
            }
        }
        self.output
    }

    fn open(&mut self, timestamp: Timestamp, index: usize) {
        let next = State::Open(Measurement::new(timestamp));
        if let State::Open(done) = core::mem::replace(&mut self.state, next) {
            self.output.push(done);
        }
        trace!("line {}: opened tick {}", index + 1, timestamp);
    }

    fn merge<B: SensorBlock>(&mut self, lines: &LineBuffer, index: usize) -> Result<()> {
        let State::Open(measurement) = &mut self.state else {
            return Err(Error::UnexpectedBlockError {
                block: B::NAME,
                line: index,
            });
        };
        let block = B::decode(lines, index)?;
        block.apply(measurement);
        trace!("line {}: merged {} report", index + 1, B::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_report(base: f64) -> String {
        let mut text = String::from("coretemp-isa-0000\nAdapter: ISA adapter\n");
        text.push_str("Package id 0:  +50.0°C  (high = +80.0°C, crit = +100.0°C)\n");
        for core in 0..6 {
            text.push_str(&format!(
                "Core {core}:        +{:.1}°C  (high = +80.0°C, crit = +100.0°C)\n",
                base + core as f64
            ));
        }
        text
    }

    fn parse(text: &str, policy: FinalRecord) -> Result<Vec<Measurement>> {
        let config = ParserConfig::default().with_final_record(policy);
        RecordAssembler::new(&config).assemble(&LineBuffer::from_text(text))
    }

    #[test]
    fn next_marker_finalizes_the_open_record() {
        let text = format!(
            "DATE::2019-10-12T13:17:05-04:00\n{}DATE::2019-10-12T13:17:10-04:00\n",
            cpu_report(40.0)
        );

        let dropped = parse(&text, FinalRecord::Drop).unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].cpu_temps().len(), 6);
        assert!(dropped[0].gpu().is_none());

        let flushed = parse(&text, FinalRecord::Flush).unwrap();
        assert_eq!(flushed.len(), 2);
        assert!(flushed[1].cpu_temps().is_empty());
    }

    #[test]
    fn report_before_any_marker() {
        let text = cpu_report(40.0);
        assert!(matches!(
            parse(&text, FinalRecord::Flush),
            Err(Error::UnexpectedBlockError {
                block: "CPU",
                line: 0
            })
        ));
    }

    #[test]
    fn bad_marker_carries_its_line() {
        let text = "noise\nDATE::not a date\n";
        assert!(matches!(
            parse(text, FinalRecord::Drop),
            Err(Error::TimestampFormatError { line: Some(1), .. })
        ));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse("", FinalRecord::Flush).unwrap().is_empty());
        assert!(parse("\n\n  \n", FinalRecord::Flush).unwrap().is_empty());
    }

    #[test]
    fn custom_prefixes() {
        let config = ParserConfig::default()
            .with_marker_prefix("TICK ")
            .with_cpu_trigger("coretemp-isa-0001")
            .with_final_record(FinalRecord::Flush);
        let text = format!(
            "TICK 2019-10-12T13:17:05-0400\n{}",
            cpu_report(30.0).replace("0000", "0001")
        );

        let out = RecordAssembler::new(&config)
            .assemble(&LineBuffer::from_text(&text))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].cpu_temps().get(&5), Some(&35.0));
    }
}
