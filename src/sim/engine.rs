//! Day simulator that samples sun positions and evaluates every panel string.

use chrono::Timelike;
use tracing::{debug, error, info};

use crate::error::SimError;
use crate::panels::PanelString;
use crate::solar::{Location, SolarPositionProvider};

use super::clock::{Clock, Sample};
use super::event::{SunEvent, SunEventDetector};
use super::radiation::RadiationSeries;
use super::report::DayReport;
use super::types::{DayRun, SimConfig, SimulationFrame};

/// Simulation engine owning the location, strings, radiation and provider.
///
/// Generic over `P: SolarPositionProvider` for static dispatch. Every run
/// starts a fresh [`SunEventDetector`], so runs are independent and repeatable.
pub struct DaySimulator<P: SolarPositionProvider> {
    provider: P,
    location: Location,
    config: SimConfig,
    strings: Vec<PanelString>,
    radiation: RadiationSeries,
}

impl<P: SolarPositionProvider> DaySimulator<P> {
    /// Creates a new day simulator.
    ///
    /// # Arguments
    ///
    /// * `provider` - Source of sun positions
    /// * `location` - Observer location handed to the provider
    /// * `config` - Day and sampling cadence
    /// * `strings` - Validated panel strings, reported in this order
    /// * `radiation` - Measured irradiance per hour of day
    pub fn new(
        provider: P,
        location: Location,
        config: SimConfig,
        strings: Vec<PanelString>,
        radiation: RadiationSeries,
    ) -> Self {
        Self {
            provider,
            location,
            config,
            strings,
            radiation,
        }
    }

    /// Computes the frame for one sample.
    ///
    /// # Errors
    ///
    /// Returns `SimError::PositionProvider` naming the sample's instant if the
    /// provider fails.
    pub fn frame(&self, sample: Sample) -> Result<SimulationFrame, SimError> {
        let position = self
            .provider
            .solar_position(&sample.timestamp, &self.location)
            .map_err(|source| {
                error!(timestamp = %sample.timestamp, %source, "solar position unavailable");
                SimError::PositionProvider {
                    timestamp: sample.timestamp,
                    source,
                }
            })?;

        let irradiance_w_m2 = self.radiation.irradiance_at(sample.timestamp.hour());
        let strings = self
            .strings
            .iter()
            .map(|s| s.output(&position, irradiance_w_m2))
            .collect();

        Ok(SimulationFrame {
            timestep: sample.index,
            timestamp: sample.timestamp,
            position,
            irradiance_w_m2,
            strings,
        })
    }

    /// Runs the day, handing each frame and any sun event to `on_frame` before
    /// the next sample is taken.
    ///
    /// Frames already delivered stay with the caller when a later sample fails.
    ///
    /// # Errors
    ///
    /// Stops at the first provider failure and returns it.
    pub fn run_with(
        &self,
        mut on_frame: impl FnMut(SimulationFrame, Option<SunEvent>),
    ) -> Result<(), SimError> {
        let mut detector = SunEventDetector::new();
        for sample in Clock::new(&self.config) {
            let frame = self.frame(sample)?;
            let event = detector.observe(frame.timestamp, &frame.position);
            if let Some(ref e) = event {
                info!(kind = %e.kind, timestamp = %e.timestamp, azimuth_deg = e.azimuth_deg, "sun event");
            }
            debug!(
                timestep = frame.timestep,
                altitude_deg = frame.position.altitude_deg(),
                nominal_w = frame.total_nominal_power_w(),
                irradiance_w = frame.total_irradiance_power_w(),
                "frame"
            );
            on_frame(frame, event);
        }
        Ok(())
    }

    /// Executes all samples and returns the frames and sun events.
    ///
    /// # Errors
    ///
    /// Returns `SimError::PositionProvider` if any sample's position fails;
    /// no frame is produced for that sample.
    pub fn run(&self) -> Result<DayRun, SimError> {
        let mut run = DayRun {
            frames: Vec::with_capacity(self.config.steps_per_day),
            events: Vec::new(),
        };
        self.run_with(|frame, event| {
            run.frames.push(frame);
            run.events.extend(event);
        })?;
        info!(
            date = %self.config.date,
            frames = run.frames.len(),
            events = run.events.len(),
            "day simulated"
        );
        Ok(run)
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn strings(&self) -> &[PanelString] {
        &self.strings
    }

    /// Day report for a run of this simulator.
    pub fn report(&self, run: &DayRun) -> DayReport {
        DayReport::from_run(run, &self.strings, &self.radiation, self.config.dt_hours)
    }
}
