//! Sun position values and the provider seam that produces them.
//!
//! The simulation never computes sun positions itself; it asks a
//! [`SolarPositionProvider`]. [`SpencerPositionProvider`] is a small built-in
//! approximation good to a fraction of a degree, which is plenty for hourly
//! sampling. A high-precision SPA implementation can be plugged in instead.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure reported by a position provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    /// An angle fell outside the range a provider must honour.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f64 },
    /// The provider could not compute a position (remote failure, bad epoch, ...).
    #[error("{0}")]
    Unavailable(String),
}

/// Observer location handed through to the position provider.
///
/// Only latitude, longitude and the UTC offset matter to the core; elevation,
/// pressure and temperature are carried for providers that model refraction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Location {
    /// Geographic latitude in degrees, positive north.
    pub latitude_deg: f64,
    /// Geographic longitude in degrees, positive east.
    pub longitude_deg: f64,
    /// Offset of local clock time from UTC in hours.
    pub utc_offset_hours: f64,
    /// Height above sea level (m).
    pub elevation_m: f64,
    /// Mean atmospheric pressure (hPa).
    pub pressure_hpa: f64,
    /// Mean air temperature (°C).
    pub temperature_c: f64,
}

impl Default for Location {
    /// Gothenburg, Sweden, on Central European (winter) time.
    fn default() -> Self {
        Self {
            latitude_deg: 57.70887,
            longitude_deg: 11.97456,
            utc_offset_hours: 1.0,
            elevation_m: 12.0,
            pressure_hpa: 1013.25,
            temperature_c: 15.0,
        }
    }
}

impl Location {
    /// Checks coordinate and offset ranges.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            errors.push(ConfigError::new(
                "location.latitude_deg",
                "must be in [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            errors.push(ConfigError::new(
                "location.longitude_deg",
                "must be in [-180, 180]",
            ));
        }
        if !(-12.0..=14.0).contains(&self.utc_offset_hours) {
            errors.push(ConfigError::new(
                "location.utc_offset_hours",
                "must be in [-12, 14]",
            ));
        }
        errors
    }

    /// Local clock offset as a chrono offset, rounded to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the offset is not a representable UTC offset.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let seconds = (self.utc_offset_hours * 3600.0).round();
        if !seconds.is_finite() {
            return Err(ConfigError::new("location.utc_offset_hours", "must be finite"));
        }
        FixedOffset::east_opt(seconds as i32).ok_or_else(|| {
            ConfigError::new(
                "location.utc_offset_hours",
                format!("{} h is not a valid UTC offset", self.utc_offset_hours),
            )
        })
    }
}

/// Sun position at one instant.
///
/// Altitude is derived from zenith on construction, so `altitude == 90 - zenith`
/// holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    azimuth_deg: f64,
    zenith_deg: f64,
    altitude_deg: f64,
}

impl SolarPosition {
    /// Builds a position from azimuth (degrees from true north, `[0, 360)`)
    /// and zenith angle (degrees, `[0, 180]`).
    ///
    /// # Errors
    ///
    /// Returns `PositionError::OutOfRange` for non-finite or out-of-range angles.
    pub fn from_zenith(azimuth_deg: f64, zenith_deg: f64) -> Result<Self, PositionError> {
        if !(azimuth_deg.is_finite() && (0.0..360.0).contains(&azimuth_deg)) {
            return Err(PositionError::OutOfRange {
                what: "azimuth",
                value: azimuth_deg,
            });
        }
        if !(zenith_deg.is_finite() && (0.0..=180.0).contains(&zenith_deg)) {
            return Err(PositionError::OutOfRange {
                what: "zenith",
                value: zenith_deg,
            });
        }
        Ok(Self {
            azimuth_deg,
            zenith_deg,
            altitude_deg: 90.0 - zenith_deg,
        })
    }

    /// Builds a position from azimuth and altitude (degrees above the horizon).
    ///
    /// # Errors
    ///
    /// Same as [`SolarPosition::from_zenith`] after converting `altitude` to zenith.
    pub fn from_altitude(azimuth_deg: f64, altitude_deg: f64) -> Result<Self, PositionError> {
        Self::from_zenith(azimuth_deg, 90.0 - altitude_deg)
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn zenith_deg(&self) -> f64 {
        self.zenith_deg
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude_deg
    }

    /// `true` when the sun is strictly above the horizon.
    pub fn is_sun_up(&self) -> bool {
        self.altitude_deg > 0.0
    }
}

/// Source of sun positions for given instants and locations.
///
/// Implementations must be side-effect free and return zenith in `[0, 180]`
/// and azimuth in `[0, 360)`, which [`SolarPosition`] enforces.
pub trait SolarPositionProvider {
    /// Returns the sun position seen from `location` at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns a `PositionError` when no position can be produced.
    fn solar_position(
        &self,
        timestamp: &DateTime<FixedOffset>,
        location: &Location,
    ) -> Result<SolarPosition, PositionError>;
}

impl<P: SolarPositionProvider + ?Sized> SolarPositionProvider for &P {
    fn solar_position(
        &self,
        timestamp: &DateTime<FixedOffset>,
        location: &Location,
    ) -> Result<SolarPosition, PositionError> {
        (**self).solar_position(timestamp, location)
    }
}

/// Approximate sun position from Spencer's (1971) Fourier series for solar
/// declination and the equation of time.
///
/// Ignores atmospheric refraction, so geometric sunrise lands a few minutes
/// after the apparent one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpencerPositionProvider;

const DEG: f64 = PI / 180.0;

impl SpencerPositionProvider {
    /// Declination (radians) and equation of time (minutes) for a fractional
    /// year angle `gamma` in radians.
    fn declination_and_eot(gamma: f64) -> (f64, f64) {
        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();
        let eot_min = 229.18
            * (0.000075 + 0.001868 * gamma.cos()
                - 0.032077 * gamma.sin()
                - 0.014615 * (2.0 * gamma).cos()
                - 0.040849 * (2.0 * gamma).sin());
        (declination, eot_min)
    }
}

impl SolarPositionProvider for SpencerPositionProvider {
    fn solar_position(
        &self,
        timestamp: &DateTime<FixedOffset>,
        location: &Location,
    ) -> Result<SolarPosition, PositionError> {
        let utc = timestamp.with_timezone(&Utc);
        let ut_hours = f64::from(utc.hour())
            + f64::from(utc.minute()) / 60.0
            + f64::from(utc.second()) / 3600.0;
        let days_in_year = if utc.date_naive().leap_year() { 366.0 } else { 365.0 };
        let gamma =
            2.0 * PI / days_in_year * (f64::from(utc.ordinal0()) + (ut_hours - 12.0) / 24.0);
        let (declination, eot_min) = Self::declination_and_eot(gamma);

        let true_solar_min = ut_hours * 60.0 + eot_min + 4.0 * location.longitude_deg;
        let hour_angle = (true_solar_min / 4.0 - 180.0) * DEG;
        let latitude = location.latitude_deg * DEG;

        let cos_zenith = (latitude.sin() * declination.sin()
            + latitude.cos() * declination.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0);
        let zenith_deg = cos_zenith.acos() / DEG;

        // Measured from south, positive westward, then rotated to north-based.
        let from_south = hour_angle.sin().atan2(
            hour_angle.cos() * latitude.sin() - declination.tan() * latitude.cos(),
        );
        let azimuth_deg = normalize_azimuth(from_south / DEG + 180.0);

        SolarPosition::from_zenith(azimuth_deg, zenith_deg)
    }
}

/// Wraps an azimuth into `[0, 360)`.
pub fn normalize_azimuth(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
