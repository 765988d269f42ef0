//! Day-long power simulation for fixed photovoltaic panel strings.
//!
//! Sun positions come from a [`solar::SolarPositionProvider`]; each sample is
//! turned into an orientation factor and two power estimates per string, and
//! an ordered detector reports sunrise and sunset.

pub mod config;
pub mod error;
/// CSV export of simulation results.
pub mod io;
/// Panel strings and power models.
pub mod panels;
/// Day simulator, sampling clock, sun events and reports.
pub mod sim;
/// Sun position seam and orientation model.
pub mod solar;
pub mod telemetry;

pub use error::SimError;
