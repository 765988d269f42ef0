use chrono::{DateTime, Duration, FixedOffset};

use super::types::SimConfig;

/// One sampled instant of the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Position in the day's sample sequence, starting at 0.
    pub index: usize,
    /// Local time of the sample.
    pub timestamp: DateTime<FixedOffset>,
}

/// A simulation clock that steps through one local day at a fixed cadence.
///
/// Yields `steps_per_day` samples in ascending time order, the first at local
/// midnight.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, NaiveDate, Timelike};
/// use pv_strings_sim::sim::clock::Clock;
/// use pv_strings_sim::sim::types::SimConfig;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let cfg = SimConfig::new(date, 4, FixedOffset::east_opt(0).unwrap()).unwrap();
/// let hours: Vec<u32> = Clock::new(&cfg).map(|s| s.timestamp.hour()).collect();
/// assert_eq!(hours, vec![0, 6, 12, 18]);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    start: DateTime<FixedOffset>,
    step_seconds: i64,
    /// Current step of the simulation
    current: usize,
    /// Total steps to run in the simulation
    total: usize,
}

impl Clock {
    /// Creates a clock covering the day described by `config`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            start: config.start(),
            step_seconds: config.step_seconds(),
            current: 0,
            total: config.steps_per_day,
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(sample)` - The sample at the current step before advancing
    /// * `None` - If the clock has reached its total steps
    pub fn tick(&mut self) -> Option<Sample> {
        if self.current < self.total {
            let index = self.current;
            self.current += 1;
            let offset = Duration::seconds(self.step_seconds * index as i64);
            Some(Sample {
                index,
                timestamp: self.start + offset,
            })
        } else {
            None
        }
    }

    /// Samples left before the day is exhausted.
    pub fn remaining(&self) -> usize {
        self.total - self.current
    }
}

impl Iterator for Clock {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Clock {}
