use std::fmt::Display;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;

use crate::{GroundStation, body::Body, types::State};

/// Maximal run of consecutive samples at or above a station's minimum elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessWindow {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    ///Degrees
    pub max_elevation: f64,
    pub start_frame: usize,
    pub end_frame: usize,
}

impl AccessWindow {
    pub fn new(
        start_time: f64,
        end_time: f64,
        max_elevation: f64,
        start_frame: usize,
        end_frame: usize,
    ) -> AccessWindow {
        AccessWindow {
            start_time,
            end_time,
            duration: end_time - start_time,
            max_elevation,
            start_frame,
            end_frame,
        }
    }
    /// Acquisition of signal as a UTC instant, with `epoch` at t = 0.
    pub fn start_datetime(&self, epoch: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        offset_datetime(epoch, self.start_time)
    }
    /// Loss of signal as a UTC instant, with `epoch` at t = 0.
    pub fn end_datetime(&self, epoch: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        offset_datetime(epoch, self.end_time)
    }
}

impl Display for AccessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "aos: {:.1}s (frame {}), los: {:.1}s (frame {}), duration: {:.1}s, max_el: {:.2}",
            self.start_time,
            self.start_frame,
            self.end_time,
            self.end_frame,
            self.duration,
            self.max_elevation
        )
    }
}

/// `None` when the offset is not finite or leaves chrono's representable range.
pub(crate) fn offset_datetime(epoch: &DateTime<Utc>, seconds: f64) -> Option<DateTime<Utc>> {
    let millis = (seconds * 1000.).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    epoch.checked_add_signed(delta)
}

/// Windows and aggregate figures for one trajectory against one station.
/// All figures are zero when there are no windows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessStatistics {
    pub windows: Vec<AccessWindow>,
    pub passes_per_orbit: usize,
    pub total_access_time: f64,
    pub average_pass_duration: f64,
    pub longest_pass: f64,
    pub shortest_pass: f64,
}

impl AccessStatistics {
    pub fn from_windows(windows: Vec<AccessWindow>) -> AccessStatistics {
        if windows.is_empty() {
            return AccessStatistics::default();
        }
        let passes_per_orbit = windows.len();
        let total_access_time: f64 = windows.iter().map(|w| w.duration).sum();
        let longest_pass = windows.iter().map(|w| w.duration).fold(f64::MIN, f64::max);
        let shortest_pass = windows.iter().map(|w| w.duration).fold(f64::MAX, f64::min);
        AccessStatistics {
            average_pass_duration: total_access_time / passes_per_orbit as f64,
            windows,
            passes_per_orbit,
            total_access_time,
            longest_pass,
            shortest_pass,
        }
    }
}

/// Scans `trajectory` once and returns every access window for `station`.
///
/// Window edges fall on samples: the start is the first visible sample and the
/// end the last one. A window still open at the final sample is closed there.
pub fn calculate_access_windows(
    trajectory: &[State],
    station: &GroundStation,
    body: &Body,
) -> AccessStatistics {
    let mut windows = Vec::new();
    let mut open: Option<(usize, f64)> = None;

    for (i, state) in trajectory.iter().enumerate() {
        let elevation = station.elevation(&state.position, state.time, body);
        let visible = elevation >= station.min_elevation;
        match (open, visible) {
            (None, true) => open = Some((i, elevation)),
            (Some((start, max_elevation)), true) => {
                open = Some((start, max_elevation.max(elevation)));
            }
            (Some((start, max_elevation)), false) => {
                windows.push(AccessWindow::new(
                    trajectory[start].time,
                    trajectory[i - 1].time,
                    max_elevation,
                    start,
                    i - 1,
                ));
                open = None;
            }
            (None, false) => {}
        }
    }
    if let Some((start, max_elevation)) = open {
        let last = trajectory.len() - 1;
        windows.push(AccessWindow::new(
            trajectory[start].time,
            trajectory[last].time,
            max_elevation,
            start,
            last,
        ));
    }

    debug!(
        "{} access windows over {} samples for station {}",
        windows.len(),
        trajectory.len(),
        station.code
    );
    AccessStatistics::from_windows(windows)
}
