use serde::Deserialize;

use crate::config::ConfigError;

/// Raw panel-string parameters as read from a scenario file.
///
/// Nothing here is checked; turn it into a [`PanelString`] with
/// [`PanelString::new`], which rejects invalid values up front.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelStringConfig {
    /// Label used in reports and CSV column names.
    pub name: String,
    /// Number of panels wired into the string (must be > 0).
    pub panel_count: u32,
    /// Rated power per panel at standard test conditions (W).
    pub nominal_power_w: f64,
    /// Panel conversion efficiency, `(0, 1]`.
    pub panel_efficiency: f64,
    /// Remaining system efficiency (inverter, wiring), `(0, 1]`.
    pub system_efficiency: f64,
    /// Area of one panel (m²).
    pub panel_area_m2: f64,
    /// Tilt from horizontal, `[0, 90]` degrees.
    pub slope_deg: f64,
    /// Direction the panel faces, `[0, 360)` degrees from true north.
    pub azimuth_deg: f64,
}

impl PanelStringConfig {
    /// South-east facing string of twelve 300 W panels.
    pub fn south_east() -> Self {
        Self {
            name: "south_east".to_string(),
            panel_count: 12,
            nominal_power_w: 300.0,
            panel_efficiency: 0.18,
            system_efficiency: 0.92,
            panel_area_m2: 1.65,
            slope_deg: 35.0,
            azimuth_deg: 135.0,
        }
    }

    /// South-west facing string of eight 300 W panels on a flatter roof.
    pub fn south_west() -> Self {
        Self {
            name: "south_west".to_string(),
            panel_count: 8,
            nominal_power_w: 300.0,
            panel_efficiency: 0.18,
            system_efficiency: 0.92,
            panel_area_m2: 1.65,
            slope_deg: 20.0,
            azimuth_deg: 225.0,
        }
    }

    /// Checks every field, reporting errors under `prefix` (e.g. `"strings[1]"`;
    /// empty for bare field names).
    pub fn validate(&self, prefix: &str) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let field = |name: &str| {
            if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            }
        };

        if self.name.trim().is_empty() {
            errors.push(ConfigError::new(field("name"), "must not be empty"));
        }
        if self.panel_count == 0 {
            errors.push(ConfigError::new(field("panel_count"), "must be > 0"));
        }
        if !(self.nominal_power_w.is_finite() && self.nominal_power_w > 0.0) {
            errors.push(ConfigError::new(field("nominal_power_w"), "must be > 0"));
        }
        if !in_unit_fraction(self.panel_efficiency) {
            errors.push(ConfigError::new(field("panel_efficiency"), "must be in (0, 1]"));
        }
        if !in_unit_fraction(self.system_efficiency) {
            errors.push(ConfigError::new(field("system_efficiency"), "must be in (0, 1]"));
        }
        if !(self.panel_area_m2.is_finite() && self.panel_area_m2 > 0.0) {
            errors.push(ConfigError::new(field("panel_area_m2"), "must be > 0"));
        }
        if !(0.0..=90.0).contains(&self.slope_deg) {
            errors.push(ConfigError::new(field("slope_deg"), "must be in [0, 90]"));
        }
        if !(0.0..360.0).contains(&self.azimuth_deg) {
            errors.push(ConfigError::new(field("azimuth_deg"), "must be in [0, 360)"));
        }

        errors
    }
}

fn in_unit_fraction(x: f64) -> bool {
    x > 0.0 && x <= 1.0
}

/// A validated panel string. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelString {
    config: PanelStringConfig,
}

impl PanelString {
    /// Validates `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found by [`PanelStringConfig::validate`],
    /// with the field path relative to the string (e.g. `"panel_count"`).
    pub fn new(config: PanelStringConfig) -> Result<Self, ConfigError> {
        match config.validate("").into_iter().next() {
            Some(err) => Err(err),
            None => Ok(Self { config }),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn panel_count(&self) -> u32 {
        self.config.panel_count
    }

    pub fn nominal_power_w(&self) -> f64 {
        self.config.nominal_power_w
    }

    pub fn panel_efficiency(&self) -> f64 {
        self.config.panel_efficiency
    }

    pub fn system_efficiency(&self) -> f64 {
        self.config.system_efficiency
    }

    pub fn panel_area_m2(&self) -> f64 {
        self.config.panel_area_m2
    }

    pub fn slope_deg(&self) -> f64 {
        self.config.slope_deg
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.config.azimuth_deg
    }

    /// Rated output of the whole string (W).
    pub fn peak_power_w(&self) -> f64 {
        self.config.nominal_power_w * f64::from(self.config.panel_count)
    }

    /// Collector area of the whole string (m²).
    pub fn total_area_m2(&self) -> f64 {
        self.config.panel_area_m2 * f64::from(self.config.panel_count)
    }

    pub fn config(&self) -> &PanelStringConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strings_are_valid() {
        assert!(PanelString::new(PanelStringConfig::south_east()).is_ok());
        assert!(PanelString::new(PanelStringConfig::south_west()).is_ok());
    }

    #[test]
    fn derived_totals() {
        let s = PanelString::new(PanelStringConfig::south_east()).unwrap();
        assert_eq!(s.peak_power_w(), 3600.0);
        assert!((s.total_area_m2() - 19.8).abs() < 1e-9);
    }

    #[test]
    fn zero_panels_rejected() {
        let cfg = PanelStringConfig {
            panel_count: 0,
            ..PanelStringConfig::south_east()
        };
        let err = PanelString::new(cfg).unwrap_err();
        assert_eq!(err.field, "panel_count");
    }

    #[test]
    fn efficiency_must_be_a_fraction() {
        for bad in [0.0, -0.1, 1.01, f64::NAN] {
            let cfg = PanelStringConfig {
                panel_efficiency: bad,
                ..PanelStringConfig::south_west()
            };
            assert!(PanelString::new(cfg).is_err(), "efficiency {bad} accepted");
        }
        let full = PanelStringConfig {
            system_efficiency: 1.0,
            ..PanelStringConfig::south_west()
        };
        assert!(PanelString::new(full).is_ok());
    }

    #[test]
    fn geometry_ranges_enforced() {
        let cfg = PanelStringConfig {
            slope_deg: 91.0,
            azimuth_deg: 360.0,
            panel_area_m2: 0.0,
            ..PanelStringConfig::south_east()
        };
        let fields: Vec<String> = cfg.validate("s").into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["s.panel_area_m2", "s.slope_deg", "s.azimuth_deg"]);
    }

    #[test]
    fn blank_name_rejected() {
        let cfg = PanelStringConfig {
            name: "  ".to_string(),
            ..PanelStringConfig::south_east()
        };
        assert!(cfg.validate("s").iter().any(|e| e.field == "s.name"));
    }
}
