//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use pv_strings_sim::config::ScenarioConfig;
use pv_strings_sim::panels::{PanelString, PanelStringConfig};
use pv_strings_sim::sim::engine::DaySimulator;
use pv_strings_sim::sim::radiation::RadiationSeries;
use pv_strings_sim::sim::types::SimConfig;
use pv_strings_sim::solar::{
    Location, PositionError, SolarPosition, SolarPositionProvider, SpencerPositionProvider,
};

/// Provider replaying a scripted altitude per hour of day.
///
/// Azimuth sweeps east to west with the hour. `fail_at_hour` makes the
/// provider report an error for that hour.
pub struct ScriptedProvider {
    pub altitudes: Vec<f64>,
    pub fail_at_hour: Option<u32>,
}

impl ScriptedProvider {
    pub fn new(altitudes: Vec<f64>) -> Self {
        Self {
            altitudes,
            fail_at_hour: None,
        }
    }

    pub fn failing_at(mut self, hour: u32) -> Self {
        self.fail_at_hour = Some(hour);
        self
    }
}

impl SolarPositionProvider for ScriptedProvider {
    fn solar_position(
        &self,
        timestamp: &DateTime<FixedOffset>,
        _location: &Location,
    ) -> Result<SolarPosition, PositionError> {
        let hour = timestamp.hour();
        if self.fail_at_hour == Some(hour) {
            return Err(PositionError::Unavailable(format!("no data for hour {hour}")));
        }
        let altitude = self
            .altitudes
            .get(hour as usize)
            .copied()
            .ok_or_else(|| PositionError::Unavailable("script exhausted".into()))?;
        SolarPosition::from_altitude(f64::from(hour) * 15.0, altitude)
    }
}

/// Midsummer-like altitude curve: up from 04:00 to 21:00, peaking at noon.
pub fn midsummer_altitudes() -> Vec<f64> {
    (0..24)
        .map(|h| {
            if (4..=21).contains(&h) {
                55.0 - 6.0 * (h as f64 - 12.5).abs()
            } else {
                -8.0
            }
        })
        .collect()
}

/// Midsummer day in Gothenburg, hourly, UTC+1.
pub fn hourly_config() -> SimConfig {
    let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    SimConfig::new(date, 24, FixedOffset::east_opt(3600).unwrap()).unwrap()
}

/// The two default roof strings.
pub fn default_strings() -> Vec<PanelString> {
    vec![
        PanelString::new(PanelStringConfig::south_east()).unwrap(),
        PanelString::new(PanelStringConfig::south_west()).unwrap(),
    ]
}

/// Simulator over a scripted provider with the given radiation.
pub fn scripted_simulator(
    provider: ScriptedProvider,
    radiation: RadiationSeries,
) -> DaySimulator<ScriptedProvider> {
    DaySimulator::new(
        provider,
        Location::default(),
        hourly_config(),
        default_strings(),
        radiation,
    )
}

/// Simulator for a built-in scenario using the Spencer provider.
pub fn scenario_simulator(scenario: &ScenarioConfig) -> DaySimulator<SpencerPositionProvider> {
    assert!(scenario.validate().is_empty());
    DaySimulator::new(
        SpencerPositionProvider,
        scenario.location.clone(),
        scenario.sim_config().unwrap(),
        scenario.panel_strings().unwrap(),
        scenario.radiation_series().unwrap(),
    )
}
