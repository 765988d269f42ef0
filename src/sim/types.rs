//! Core simulation types: day configuration and per-sample results.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::config::ConfigError;
use crate::panels::StringOutput;
use crate::solar::SolarPosition;

use super::event::SunEvent;

/// Day and cadence shared by the clock, engine and reports.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use pv_strings_sim::sim::types::SimConfig;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let cfg = SimConfig::new(date, 24, FixedOffset::east_opt(3600).unwrap()).unwrap();
/// assert_eq!(cfg.dt_hours, 1.0);
/// assert_eq!(cfg.step_seconds(), 3600);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Local calendar day being simulated.
    pub date: NaiveDate,
    /// Number of samples taken over the day.
    pub steps_per_day: usize,
    /// Local clock offset from UTC.
    pub utc_offset: FixedOffset,
    /// Duration of one sample interval in hours, `24.0 / steps_per_day`.
    pub dt_hours: f64,
    start: DateTime<FixedOffset>,
}

impl SimConfig {
    /// Creates a configuration sampling `date` from local midnight.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `steps_per_day` is zero or does not divide
    /// 86400 seconds evenly.
    pub fn new(
        date: NaiveDate,
        steps_per_day: usize,
        utc_offset: FixedOffset,
    ) -> Result<Self, ConfigError> {
        if steps_per_day == 0 || 86_400 % steps_per_day != 0 {
            return Err(ConfigError::new(
                "simulation.steps_per_day",
                "must be > 0 and divide a day into whole seconds",
            ));
        }
        let start = date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.and_local_timezone(utc_offset).single())
            .ok_or_else(|| {
                ConfigError::new("simulation.date", format!("{date} has no local midnight"))
            })?;

        Ok(Self {
            date,
            steps_per_day,
            utc_offset,
            dt_hours: 24.0 / steps_per_day as f64,
            start,
        })
    }

    /// Local midnight at the start of the simulated day.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Length of one sample interval in whole seconds.
    pub fn step_seconds(&self) -> i64 {
        86_400 / self.steps_per_day as i64
    }
}

/// Results for one sampled instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationFrame {
    /// Sample index within the day.
    pub timestep: usize,
    /// Local time of the sample.
    pub timestamp: DateTime<FixedOffset>,
    /// Sun position reported by the provider.
    pub position: SolarPosition,
    /// Raw irradiance looked up for the sample's hour (W/m²).
    pub irradiance_w_m2: f64,
    /// One entry per configured string, in configuration order.
    pub strings: Vec<StringOutput>,
}

impl SimulationFrame {
    /// Sum of nominal-scaled power over all strings (W).
    pub fn total_nominal_power_w(&self) -> f64 {
        self.strings.iter().map(|s| s.nominal_power_w).sum()
    }

    /// Sum of irradiance-driven power over all strings (W).
    pub fn total_irradiance_power_w(&self) -> f64 {
        self.strings.iter().map(|s| s.irradiance_power_w).sum()
    }
}

impl fmt::Display for SimulationFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} {} | az={:>6.1}° alt={:>6.1}° | G={:>6.1} W/m² | nominal={:>7.1} W  irr={:>7.1} W",
            self.timestep,
            self.timestamp.format("%H:%M"),
            self.position.azimuth_deg(),
            self.position.altitude_deg(),
            self.irradiance_w_m2,
            self.total_nominal_power_w(),
            self.total_irradiance_power_w(),
        )
    }
}

/// Output of a complete day run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayRun {
    /// Frames in ascending time order.
    pub frames: Vec<SimulationFrame>,
    /// Sunrise/sunset events in the order they were detected.
    pub events: Vec<SunEvent>,
}
