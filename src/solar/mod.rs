//! Sun geometry: position provider seam and panel orientation model.

/// Angle-of-incidence model for tilted panel surfaces.
pub mod orientation;
/// Observer location, sun position values, and position providers.
pub mod position;

pub use orientation::{incidence_angle_deg, orientation_factor};
pub use position::{
    Location, PositionError, SolarPosition, SolarPositionProvider, SpencerPositionProvider,
};
