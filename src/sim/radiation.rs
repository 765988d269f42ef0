use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::error::SimError;

/// Measured irradiance per hour of day (W/m²).
///
/// Hours without an entry read as zero. The value applies uniformly to every
/// sample falling inside that hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiationSeries {
    hourly: BTreeMap<u32, f64>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    hour: u32,
    w_m2: f64,
}

impl RadiationSeries {
    /// Empty series: zero irradiance all day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(hour, irradiance)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an hour is above 23 or repeated, or an
    /// irradiance is negative or not finite.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Result<Self, ConfigError> {
        let mut hourly = BTreeMap::new();
        for (hour, w_m2) in pairs {
            if hour > 23 {
                return Err(ConfigError::new(
                    format!("radiation[hour={hour}]"),
                    "hour must be in 0..=23",
                ));
            }
            if !(w_m2.is_finite() && w_m2 >= 0.0) {
                return Err(ConfigError::new(
                    format!("radiation[hour={hour}]"),
                    format!("irradiance must be >= 0, got {w_m2}"),
                ));
            }
            if hourly.insert(hour, w_m2).is_some() {
                return Err(ConfigError::new(
                    format!("radiation[hour={hour}]"),
                    "hour listed more than once",
                ));
            }
        }
        Ok(Self { hourly })
    }

    /// Reads a two-column CSV with a `hour,w_m2` header.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Radiation` for unreadable or malformed CSV and
    /// `SimError::Config` for out-of-range values.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, SimError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut pairs = Vec::new();
        for row in rdr.deserialize::<CsvRow>() {
            let row = row?;
            pairs.push((row.hour, row.w_m2));
        }
        Ok(Self::from_pairs(pairs)?)
    }

    /// Reads a radiation CSV from disk.
    ///
    /// # Errors
    ///
    /// See [`RadiationSeries::from_csv_reader`].
    pub fn from_csv_path(path: &Path) -> Result<Self, SimError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Irradiance for `hour`, or 0 when the hour has no entry.
    pub fn irradiance_at(&self, hour: u32) -> f64 {
        self.hourly.get(&hour).copied().unwrap_or(0.0)
    }

    /// Daily insolation assuming each listed value holds for its full hour (Wh/m²).
    pub fn daily_insolation_wh_m2(&self) -> f64 {
        self.hourly.values().sum()
    }
}
