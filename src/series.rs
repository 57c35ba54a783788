//! Column extraction for plotting.
//!
//! Plots want parallel arrays: one x-axis of seconds since the run started and
//! one y-array per field, all indexed by tick. [`SeriesSet`] keeps only dated
//! ticks, so every column lines up with [`SeriesSet::elapsed_seconds`].
//!
//! ```no_run
//! use hwmon_log_rs::{Result, SeriesSet, json};
//!
//! fn gpu_curve() -> Result<()> {
//!     let entries = json::load_from_file("json/run_log.json")?;
//!     let series = SeriesSet::from_entries(&entries);
//!
//!     let x = series.elapsed_seconds();
//!     let gpu = series.column("GPU");
//!     let fan = series.column("GPU Fan");
//!     assert_eq!(x.len(), gpu.len());
//!     assert_eq!(gpu.len(), fan.len());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "serde_json")]
use crate::json::LoadedEntry;
use crate::{timestamp::Timestamp, types::Measurement};

/// A source of per-tick values addressed by serialized key.
pub trait Tick {
    /// When the tick was sampled; undated ticks are left out of a series.
    fn date(&self) -> Option<Timestamp>;

    /// A numeric field by serialized key (`CPU-0`, `GPU Fan`, ...).
    fn field(&self, key: &str) -> Option<f64>;
}

impl Tick for Measurement {
    fn date(&self) -> Option<Timestamp> {
        Some(self.timestamp())
    }

    fn field(&self, key: &str) -> Option<f64> {
        Measurement::field(self, key)
    }
}

#[cfg(feature = "serde_json")]
impl Tick for LoadedEntry {
    fn date(&self) -> Option<Timestamp> {
        LoadedEntry::date(self)
    }

    fn field(&self, key: &str) -> Option<f64> {
        LoadedEntry::field(self, key)
    }
}

/// Dated ticks in input order, ready to be split into columns.
#[derive(Debug)]
pub struct SeriesSet<'a, T> {
    /// Start of the run; elapsed time is measured from here even after
    /// [`SeriesSet::window`].
    origin: Option<Timestamp>,
    ticks: Vec<(Timestamp, &'a T)>,
}

impl<T> Clone for SeriesSet<'_, T> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin,
            ticks: self.ticks.clone(),
        }
    }
}

impl<'a> SeriesSet<'a, Measurement> {
    /// Ticks of freshly parsed measurements.
    pub fn from_measurements(measurements: &'a [Measurement]) -> Self {
        Self::new(measurements)
    }
}

#[cfg(feature = "serde_json")]
impl<'a> SeriesSet<'a, LoadedEntry> {
    /// Dated entries of a loaded dump; undated entries are skipped.
    pub fn from_entries(entries: &'a [LoadedEntry]) -> Self {
        Self::new(entries)
    }
}

impl<'a, T: Tick> SeriesSet<'a, T> {
    /// Keep the dated items of `items`, in order.
    pub fn new(items: &'a [T]) -> Self {
        let ticks: Vec<(Timestamp, &'a T)> = items
            .iter()
            .filter_map(|item| Some((item.date()?, item)))
            .collect();
        Self {
            origin: ticks.first().map(|(date, _)| *date),
            ticks,
        }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.ticks.iter().map(|(date, _)| *date).collect()
    }

    /// Seconds since the first tick of the run.
    pub fn elapsed_seconds(&self) -> Vec<f64> {
        let Some(origin) = self.origin else {
            return Vec::new();
        };
        self.ticks
            .iter()
            .map(|(date, _)| date.seconds_since(&origin) as f64)
            .collect()
    }

    /// Values of one field, `None` where a tick lacks it.
    pub fn column(&self, key: &str) -> Vec<Option<f64>> {
        self.ticks.iter().map(|(_, tick)| tick.field(key)).collect()
    }

    /// Keep the ticks whose elapsed time lies in `[start_secs, end_secs]`.
    pub fn window(&self, start_secs: f64, end_secs: f64) -> Self {
        let Some(origin) = self.origin else {
            return self.clone();
        };
        let ticks = self
            .ticks
            .iter()
            .filter(|(date, _)| {
                let t = date.seconds_since(&origin) as f64;
                t >= start_secs && t <= end_secs
            })
            .copied()
            .collect();
        Self {
            origin: self.origin,
            ticks,
        }
    }
}
