//! Error types surfaced by a simulation run.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::config::ConfigError;
use crate::solar::position::PositionError;

/// Failure of a day simulation or of the inputs feeding it.
#[derive(Debug, Error)]
pub enum SimError {
    /// The position provider could not produce a sun position for one sample.
    /// The run is aborted; no frame exists for `timestamp`.
    #[error("solar position unavailable at {timestamp}: {source}")]
    PositionProvider {
        timestamp: DateTime<FixedOffset>,
        #[source]
        source: PositionError,
    },
    /// Configuration rejected before any sample was taken.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Radiation series could not be read.
    #[error("cannot read radiation series: {0}")]
    Radiation(#[from] csv::Error),
    /// Frames could not be written out.
    #[error("failed to write CSV to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
