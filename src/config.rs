//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::panels::{PanelString, PanelStringConfig};
use crate::sim::radiation::RadiationSeries;
use crate::sim::types::SimConfig;
use crate::solar::Location;

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the Gothenburg midsummer scenario.
/// Load from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::gothenburg_june`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Observer location passed through to the position provider.
    #[serde(default)]
    pub location: Location,
    /// Day and sampling cadence.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Panel strings to evaluate at every sample.
    #[serde(default = "default_strings")]
    pub strings: Vec<PanelStringConfig>,
    /// Measured irradiance per hour of day; hours not listed read 0.
    #[serde(default)]
    pub radiation: Vec<RadiationSample>,
}

/// Simulated day and sampling cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Calendar day to simulate, `"YYYY-MM-DD"`.
    pub date: NaiveDate,
    /// Samples per day, starting at local midnight (must divide 86400).
    pub steps_per_day: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap_or_default(),
            steps_per_day: 24,
        }
    }
}

/// One `[[radiation]]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadiationSample {
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Irradiance for that hour (W/m²).
    pub w_m2: f64,
}

fn default_strings() -> Vec<PanelStringConfig> {
    vec![PanelStringConfig::south_east(), PanelStringConfig::south_west()]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.steps_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Nests the field path under `prefix`, e.g. `panel_count` under
    /// `strings[1]` becomes `strings[1].panel_count`.
    pub fn within(self, prefix: &str) -> Self {
        Self {
            field: format!("{prefix}.{}", self.field),
            message: self.message,
        }
    }
}

/// Hourly irradiance measured on a clear midsummer day in Gothenburg (W/m²).
const GOTHENBURG_JUNE_RADIATION: [(u32, f64); 7] = [
    (9, 1.0),
    (10, 51.0),
    (11, 111.0),
    (12, 141.0),
    (13, 134.0),
    (14, 92.0),
    (15, 28.0),
];

/// Tromsø, Norway: inside the Arctic circle.
fn tromso() -> Location {
    Location {
        latitude_deg: 69.6492,
        longitude_deg: 18.9553,
        utc_offset_hours: 1.0,
        elevation_m: 10.0,
        ..Location::default()
    }
}

impl ScenarioConfig {
    /// Gothenburg on midsummer day, two strings, measured irradiance.
    pub fn gothenburg_june() -> Self {
        Self {
            location: Location::default(),
            simulation: SimulationConfig::default(),
            strings: default_strings(),
            radiation: GOTHENBURG_JUNE_RADIATION
                .iter()
                .map(|&(hour, w_m2)| RadiationSample { hour, w_m2 })
                .collect(),
        }
    }

    /// Tromsø at the winter solstice: the sun never rises.
    pub fn tromso_polar_night() -> Self {
        Self {
            location: tromso(),
            simulation: SimulationConfig {
                date: NaiveDate::from_ymd_opt(2024, 12, 21).unwrap_or_default(),
                ..SimulationConfig::default()
            },
            strings: default_strings(),
            radiation: Vec::new(),
        }
    }

    /// Tromsø at the summer solstice: the sun never sets.
    pub fn tromso_polar_day() -> Self {
        Self {
            location: tromso(),
            simulation: SimulationConfig::default(),
            strings: default_strings(),
            radiation: Vec::new(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["gothenburg_june", "tromso_polar_night", "tromso_polar_day"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "gothenburg_june" => Ok(Self::gothenburg_june()),
            "tromso_polar_night" => Ok(Self::tromso_polar_night()),
            "tromso_polar_day" => Ok(Self::tromso_polar_day()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.location.validate();

        let steps = self.simulation.steps_per_day;
        if steps == 0 || 86_400 % steps != 0 {
            errors.push(ConfigError::new(
                "simulation.steps_per_day",
                "must be > 0 and divide a day into whole seconds",
            ));
        }

        if self.strings.is_empty() {
            errors.push(ConfigError::new("strings", "at least one string is required"));
        }
        for (i, s) in self.strings.iter().enumerate() {
            errors.extend(s.validate(&format!("strings[{i}]")));
            if self.strings[..i].iter().any(|other| other.name == s.name) {
                errors.push(ConfigError::new(
                    format!("strings[{i}].name"),
                    format!("duplicate string name \"{}\"", s.name),
                ));
            }
        }

        if let Err(e) = self.radiation_series() {
            errors.push(e);
        }

        errors
    }

    /// Builds the validated panel strings.
    ///
    /// # Errors
    ///
    /// Returns the first invalid string's `ConfigError`.
    pub fn panel_strings(&self) -> Result<Vec<PanelString>, ConfigError> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| {
                PanelString::new(s.clone()).map_err(|e| e.within(&format!("strings[{i}]")))
            })
            .collect()
    }

    /// Builds the radiation series from the `[[radiation]]` entries.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for hours above 23, repeated hours, or negative values.
    pub fn radiation_series(&self) -> Result<RadiationSeries, ConfigError> {
        RadiationSeries::from_pairs(self.radiation.iter().map(|r| (r.hour, r.w_m2)))
    }

    /// Day and cadence as a simulation config.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the step count or UTC offset is invalid.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        SimConfig::new(
            self.simulation.date,
            self.simulation.steps_per_day,
            self.location.utc_offset()?,
        )
    }
}
