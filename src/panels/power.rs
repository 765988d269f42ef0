//! String-level power models.
//!
//! Both models are pure functions of a validated [`PanelString`] and the
//! orientation factor for the instant. Efficiencies and areas are trusted as
//! validated at construction.

use std::fmt;

use crate::solar::{SolarPosition, incidence_angle_deg, orientation_factor};

use super::string::PanelString;

/// Best-case output assuming standard-test-condition irradiance at the given
/// orientation factor (W).
///
/// `nominal_power_w * panel_count * factor * system_efficiency`
pub fn nominal_power_w(string: &PanelString, factor: f64) -> f64 {
    string.peak_power_w() * factor * string.system_efficiency()
}

/// Irradiance reaching the panel plane for a raw (orientation-independent)
/// irradiance and orientation factor (W/m²).
pub fn effective_irradiance(raw_irradiance_w_m2: f64, factor: f64) -> f64 {
    raw_irradiance_w_m2 * factor
}

/// Output derived from measured irradiance (W).
///
/// `raw * factor * panel_area * panel_count * panel_efficiency * system_efficiency`
pub fn irradiance_power_w(string: &PanelString, raw_irradiance_w_m2: f64, factor: f64) -> f64 {
    effective_irradiance(raw_irradiance_w_m2, factor)
        * string.total_area_m2()
        * string.panel_efficiency()
        * string.system_efficiency()
}

/// One string's results for one sampled instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StringOutput {
    /// Angle-of-incidence cosine, `[0, 1]`.
    pub orientation_factor: f64,
    /// Angle of incidence (degrees), 90 when no direct light reaches the plane.
    pub incidence_angle_deg: f64,
    /// Nominal-scaled power (W).
    pub nominal_power_w: f64,
    /// Irradiance-driven power (W).
    pub irradiance_power_w: f64,
}

impl PanelString {
    /// Orientation factor of this string's plane for a sun position.
    pub fn orientation_factor(&self, position: &SolarPosition) -> f64 {
        orientation_factor(
            position.azimuth_deg(),
            position.zenith_deg(),
            self.azimuth_deg(),
            self.slope_deg(),
        )
    }

    /// Evaluates orientation and both power models for one instant.
    pub fn output(&self, position: &SolarPosition, raw_irradiance_w_m2: f64) -> StringOutput {
        let factor = self.orientation_factor(position);
        StringOutput {
            orientation_factor: factor,
            incidence_angle_deg: incidence_angle_deg(factor),
            nominal_power_w: nominal_power_w(self, factor),
            irradiance_power_w: irradiance_power_w(self, raw_irradiance_w_m2, factor),
        }
    }
}

impl fmt::Display for StringOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cos={:.3} aoi={:>5.1}° nominal={:>7.1} W irr={:>7.1} W",
            self.orientation_factor,
            self.incidence_angle_deg,
            self.nominal_power_w,
            self.irradiance_power_w
        )
    }
}
