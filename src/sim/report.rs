//! Post-hoc daily summaries computed from a finished run.

use std::fmt;

use crate::panels::PanelString;

use super::radiation::RadiationSeries;

use super::event::{SunEvent, SunEventKind};
use super::types::{DayRun, SimulationFrame};

/// What the sun did over the sampled day.
#[derive(Debug, Clone, PartialEq)]
pub enum SunSummary {
    /// Rose and set within the day.
    Regular { sunrise: SunEvent, sunset: SunEvent },
    /// Rose but was still up at the last sample.
    SunriseOnly { sunrise: SunEvent },
    /// Was up at the first sample and set during the day.
    SunsetOnly { sunset: SunEvent },
    /// Never below the horizon at any sample.
    PolarDay,
    /// Never above the horizon at any sample.
    PolarNight,
}

impl SunSummary {
    /// Derives the summary from the run's events and frames.
    ///
    /// With several crossings the first sunrise and last sunset are reported.
    pub fn from_run(run: &DayRun) -> Self {
        let sunrise = run
            .events
            .iter()
            .find(|e| e.kind == SunEventKind::Sunrise)
            .copied();
        let sunset = run
            .events
            .iter()
            .rev()
            .find(|e| e.kind == SunEventKind::Sunset)
            .copied();

        match (sunrise, sunset) {
            (Some(sunrise), Some(sunset)) => SunSummary::Regular { sunrise, sunset },
            (Some(sunrise), None) => SunSummary::SunriseOnly { sunrise },
            (None, Some(sunset)) => SunSummary::SunsetOnly { sunset },
            // Without a sunset the sun never dropped below 0, so any sample
            // above the horizon means it stayed up all day.
            (None, None) => {
                if run.frames.iter().any(|f| f.position.is_sun_up()) {
                    SunSummary::PolarDay
                } else {
                    SunSummary::PolarNight
                }
            }
        }
    }
}

impl fmt::Display for SunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SunSummary::Regular { sunrise, sunset } => {
                writeln!(f, "{sunrise}")?;
                write!(f, "{sunset}")
            }
            SunSummary::SunriseOnly { sunrise } => {
                writeln!(f, "{sunrise}")?;
                write!(f, "No sunset: the sun is still up at the end of the day")
            }
            SunSummary::SunsetOnly { sunset } => {
                writeln!(f, "No sunrise: the sun was already up at the start of the day")?;
                write!(f, "{sunset}")
            }
            SunSummary::PolarDay => {
                write!(f, "No sunrise or sunset: the sun never drops below the horizon (polar day)")
            }
            SunSummary::PolarNight => {
                write!(f, "No sunrise or sunset: the sun never rises above the horizon (polar night)")
            }
        }
    }
}

/// Daily totals for one string.
#[derive(Debug, Clone, PartialEq)]
pub struct StringReport {
    pub name: String,
    /// Energy from the nominal-scaled model (Wh).
    pub nominal_energy_wh: f64,
    /// Energy from the irradiance-driven model (Wh).
    pub irradiance_energy_wh: f64,
    /// Highest nominal-scaled power sampled (W).
    pub peak_nominal_power_w: f64,
    /// Highest irradiance-driven power sampled (W).
    pub peak_irradiance_power_w: f64,
}

/// Day-level report: per-string energy and the sunrise/sunset summary.
///
/// Energies treat each sample's power as constant over its interval.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub strings: Vec<StringReport>,
    pub sun: SunSummary,
    /// Number of samples with the sun above the horizon.
    pub daylight_samples: usize,
    /// Measured irradiation summed over the listed hours (Wh/m²).
    pub insolation_wh_m2: f64,
    /// Sample interval (hours). Sun events lag the true crossing by up to one
    /// interval.
    pub dt_hours: f64,
}

impl DayReport {
    /// Computes the report for `run`, whose frames list `strings` in order.
    pub fn from_run(
        run: &DayRun,
        strings: &[PanelString],
        radiation: &RadiationSeries,
        dt_hours: f64,
    ) -> Self {
        let strings = strings
            .iter()
            .enumerate()
            .map(|(i, s)| string_report(s.name(), i, &run.frames, dt_hours))
            .collect();

        Self {
            strings,
            sun: SunSummary::from_run(run),
            daylight_samples: run
                .frames
                .iter()
                .filter(|f| f.position.is_sun_up())
                .count(),
            insolation_wh_m2: radiation.daily_insolation_wh_m2(),
            dt_hours,
        }
    }

    /// Total nominal-scaled energy over all strings (Wh).
    pub fn total_nominal_energy_wh(&self) -> f64 {
        self.strings.iter().map(|s| s.nominal_energy_wh).sum()
    }

    /// Total irradiance-driven energy over all strings (Wh).
    pub fn total_irradiance_energy_wh(&self) -> f64 {
        self.strings.iter().map(|s| s.irradiance_energy_wh).sum()
    }
}

fn string_report(name: &str, index: usize, frames: &[SimulationFrame], dt_hours: f64) -> StringReport {
    let mut report = StringReport {
        name: name.to_string(),
        nominal_energy_wh: 0.0,
        irradiance_energy_wh: 0.0,
        peak_nominal_power_w: 0.0,
        peak_irradiance_power_w: 0.0,
    };
    for out in frames.iter().filter_map(|f| f.strings.get(index)) {
        report.nominal_energy_wh += out.nominal_power_w * dt_hours;
        report.irradiance_energy_wh += out.irradiance_power_w * dt_hours;
        report.peak_nominal_power_w = report.peak_nominal_power_w.max(out.nominal_power_w);
        report.peak_irradiance_power_w =
            report.peak_irradiance_power_w.max(out.irradiance_power_w);
    }
    report
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sun ---")?;
        writeln!(f, "{}", self.sun)?;
        writeln!(
            f,
            "Times are the first sample past the crossing; it happened within the preceding {:.0} min",
            self.dt_hours * 60.0
        )?;
        writeln!(f, "Daylight samples:      {}", self.daylight_samples)?;
        writeln!(f, "Measured insolation:   {:.1} Wh/m²", self.insolation_wh_m2)?;
        writeln!(f, "--- Energy Report ---")?;
        for s in &self.strings {
            writeln!(
                f,
                "{:<16} nominal {:>8.1} Wh (peak {:>7.1} W) | irradiance {:>8.1} Wh (peak {:>7.1} W)",
                s.name,
                s.nominal_energy_wh,
                s.peak_nominal_power_w,
                s.irradiance_energy_wh,
                s.peak_irradiance_power_w
            )?;
        }
        writeln!(f, "Total nominal energy:     {:.1} Wh", self.total_nominal_energy_wh())?;
        write!(f, "Total irradiance energy:  {:.1} Wh", self.total_irradiance_energy_wh())
    }
}
