//! Photovoltaic panel strings and their power models.

/// Nominal-scaled and irradiance-driven power models.
pub mod power;
/// Validated, immutable panel-string configuration.
pub mod string;

// Re-export the main types for convenience
pub use power::{StringOutput, effective_irradiance, irradiance_power_w, nominal_power_w};
pub use string::{PanelString, PanelStringConfig};
