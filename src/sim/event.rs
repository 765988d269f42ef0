use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::solar::SolarPosition;

/// Which side of the horizon the sun was on at the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonState {
    BelowHorizon,
    AboveHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

impl fmt::Display for SunEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SunEventKind::Sunrise => f.write_str("Sunrise"),
            SunEventKind::Sunset => f.write_str("Sunset"),
        }
    }
}

/// A horizon crossing, stamped with the first sample on the new side.
///
/// The crossing happened somewhere in the preceding sample interval; the
/// timestamp carries up to one interval of error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub timestamp: DateTime<FixedOffset>,
    /// Sun azimuth at `timestamp` (degrees from true north).
    pub azimuth_deg: f64,
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (azimuth {:.1}°)",
            self.kind,
            self.timestamp.format("%H:%M"),
            self.azimuth_deg
        )
    }
}

/// Two-state machine turning an ordered stream of sun positions into
/// sunrise/sunset events.
///
/// The first sample only sets the state. Afterwards a sunrise fires when the
/// altitude goes from `<= 0` to `> 0`, and a sunset when it goes from `>= 0`
/// to `< 0`. A day with no crossing (polar day or night) yields no events; a
/// sequence with several crossings yields them all, in order.
#[derive(Debug, Clone, Default)]
pub struct SunEventDetector {
    state: Option<HorizonState>,
}

impl SunEventDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; `BelowHorizon` before the first sample.
    pub fn state(&self) -> HorizonState {
        self.state.unwrap_or(HorizonState::BelowHorizon)
    }

    /// Feeds the next sample. Samples must arrive in increasing time order.
    pub fn observe(
        &mut self,
        timestamp: DateTime<FixedOffset>,
        position: &SolarPosition,
    ) -> Option<SunEvent> {
        let altitude = position.altitude_deg();
        let (next, kind) = match self.state {
            None if altitude > 0.0 => (HorizonState::AboveHorizon, None),
            None => (HorizonState::BelowHorizon, None),
            Some(HorizonState::BelowHorizon) if altitude > 0.0 => {
                (HorizonState::AboveHorizon, Some(SunEventKind::Sunrise))
            }
            Some(HorizonState::AboveHorizon) if altitude < 0.0 => {
                (HorizonState::BelowHorizon, Some(SunEventKind::Sunset))
            }
            Some(state) => (state, None),
        };
        self.state = Some(next);

        kind.map(|kind| SunEvent {
            kind,
            timestamp,
            azimuth_deg: position.azimuth_deg(),
        })
    }

    /// Runs a fresh detector over a whole ordered sequence.
    pub fn detect<'a>(
        samples: impl IntoIterator<Item = (DateTime<FixedOffset>, &'a SolarPosition)>,
    ) -> Vec<SunEvent> {
        let mut detector = Self::new();
        samples
            .into_iter()
            .filter_map(|(timestamp, position)| detector.observe(timestamp, position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn hour(h: i64) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(3600).unwrap();
        offset.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap() + Duration::hours(h)
    }

    fn run(altitudes: &[f64]) -> Vec<SunEvent> {
        let positions: Vec<SolarPosition> = altitudes
            .iter()
            .enumerate()
            .map(|(i, &alt)| SolarPosition::from_altitude(i as f64 * 10.0, alt).unwrap())
            .collect();
        SunEventDetector::detect(
            positions
                .iter()
                .enumerate()
                .map(|(i, p)| (hour(i as i64), p)),
        )
    }

    #[test]
    fn one_sunrise_and_one_sunset() {
        let events = run(&[-5.0, -1.0, 2.0, 10.0, 30.0, 10.0, -2.0, -6.0]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, SunEventKind::Sunrise);
        assert_eq!(events[0].timestamp, hour(2));
        assert_eq!(events[0].azimuth_deg, 20.0);
        assert_eq!(events[1].kind, SunEventKind::Sunset);
        assert_eq!(events[1].timestamp, hour(6));
        assert_eq!(events[1].azimuth_deg, 60.0);
    }

    #[test]
    fn polar_night_has_no_events() {
        assert!(run(&[-20.0, -10.0, -3.0, -10.0, -20.0]).is_empty());
    }

    #[test]
    fn polar_day_has_no_events() {
        assert!(run(&[3.0, 10.0, 40.0, 10.0, 3.0]).is_empty());
    }

    #[test]
    fn first_sample_sets_state_without_event() {
        let mut d = SunEventDetector::new();
        assert_eq!(d.state(), HorizonState::BelowHorizon);
        let up = SolarPosition::from_altitude(90.0, 5.0).unwrap();
        assert_eq!(d.observe(hour(0), &up), None);
        assert_eq!(d.state(), HorizonState::AboveHorizon);
    }

    #[test]
    fn starting_above_then_setting() {
        let events = run(&[5.0, 1.0, -1.0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, SunEventKind::Sunset);
    }

    #[test]
    fn multiple_crossings_reported_in_order() {
        let events = run(&[-1.0, 1.0, -1.0, 1.0, -1.0]);
        let kinds: Vec<SunEventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SunEventKind::Sunrise,
                SunEventKind::Sunset,
                SunEventKind::Sunrise,
                SunEventKind::Sunset
            ]
        );
    }

    #[test]
    fn touching_the_horizon_is_not_a_crossing() {
        // Up, grazes 0, back up: no sunset.
        assert!(run(&[2.0, 0.0, 2.0]).is_empty());
        // Down, grazes 0, back down: no sunrise.
        assert!(run(&[-2.0, 0.0, -2.0]).is_empty());
        // Down, 0, then up: sunrise fires on the positive sample.
        let events = run(&[-2.0, 0.0, 2.0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, hour(2));
    }

    #[test]
    fn event_display() {
        let e = SunEvent {
            kind: SunEventKind::Sunrise,
            timestamp: hour(4),
            azimuth_deg: 42.26,
        };
        assert_eq!(e.to_string(), "Sunrise at 04:00 (azimuth 42.3°)");
    }
}
