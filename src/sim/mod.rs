/// Sampling clock stepping through one local day.
pub mod clock;
pub mod engine;
/// Sunrise/sunset detection over an ordered sample stream.
pub mod event;
/// Hourly measured irradiance.
pub mod radiation;
/// Post-hoc daily energy and sun summaries.
pub mod report;
pub mod types;
