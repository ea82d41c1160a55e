use std::fmt::Display;

use chrono::{DateTime, Utc};
use log::info;

use crate::{
    GroundStation, OrbitError, Result,
    body::Body,
    eclipse::check_eclipse,
    elements::OrbitalElements,
    ground_track::get_subsatellite_point,
    pass_list::{AccessStatistics, calculate_access_windows, offset_datetime},
    presets::{DisplayColor, OrbitPreset},
    propagator::{OrbitPropagator, Trajectory},
    solar::{SolarPanelAnalysis, analyze},
    types::{GeoCoordinate, SatAngle, State, Vector3},
};

const LEO_CEILING: f64 = 2000.;
const MEO_CEILING: f64 = 35000.;
const PRESET_STEPS_PER_ORBIT: f64 = 360.;
const TLE_COLOR: DisplayColor = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitFamily {
    #[default]
    Leo,
    Meo,
    Heo,
    Geo,
}

impl Display for OrbitFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            OrbitFamily::Leo => "LEO",
            OrbitFamily::Meo => "MEO",
            OrbitFamily::Heo => "HEO",
            OrbitFamily::Geo => "GEO",
        };
        f.write_str(text)
    }
}

/// Figures read off a materialized trajectory. Altitudes in km, speeds in km/s.
/// `mean_altitude` is the midpoint of the apsis altitudes, not a time average.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitStatistics {
    pub periapsis_altitude: f64,
    pub apoapsis_altitude: f64,
    pub periapsis_speed: f64,
    pub apoapsis_speed: f64,
    pub mean_altitude: f64,
    pub family: OrbitFamily,
}

impl OrbitStatistics {
    pub fn from_trajectory(trajectory: &[State], body: &Body) -> OrbitStatistics {
        let lowest = trajectory
            .iter()
            .min_by(|a, b| a.radius().total_cmp(&b.radius()));
        let highest = trajectory
            .iter()
            .max_by(|a, b| a.radius().total_cmp(&b.radius()));
        let (Some(lowest), Some(highest)) = (lowest, highest) else {
            return OrbitStatistics::default();
        };
        let periapsis_altitude = lowest.altitude(body.radius);
        let apoapsis_altitude = highest.altitude(body.radius);
        let mean_altitude = (periapsis_altitude + apoapsis_altitude) / 2.;
        let family = if mean_altitude < LEO_CEILING {
            OrbitFamily::Leo
        } else if mean_altitude < MEO_CEILING {
            OrbitFamily::Meo
        } else if apoapsis_altitude > MEO_CEILING && periapsis_altitude < MEO_CEILING {
            OrbitFamily::Heo
        } else {
            OrbitFamily::Geo
        };
        OrbitStatistics {
            periapsis_altitude,
            apoapsis_altitude,
            periapsis_speed: lowest.speed(),
            apoapsis_speed: highest.speed(),
            mean_altitude,
            family,
        }
    }
}

/// A propagated object: labelling, time anchor and the full trajectory.
#[derive(Debug, Clone)]
pub struct Satellite {
    name: String,
    description: String,
    color: DisplayColor,
    epoch: DateTime<Utc>,
    orbital_period: f64,
    body: Body,
    trajectory: Trajectory,
    stats: OrbitStatistics,
}

impl Satellite {
    /// Propagates one nominal period of `preset` at `period / 360`.
    pub fn from_preset(
        preset: &OrbitPreset,
        propagator: &OrbitPropagator,
        epoch: DateTime<Utc>,
    ) -> Satellite {
        let trajectory = propagator.propagate(
            &preset.initial_state,
            preset.period,
            preset.period / PRESET_STEPS_PER_ORBIT,
        );
        Self::build(
            preset.name.clone(),
            preset.description.clone(),
            preset.color,
            epoch,
            preset.period,
            *propagator.body(),
            trajectory,
        )
    }

    /// Three-line TLE (name, line 1, line 2). SGP4 supplies the state at the
    /// TLE epoch, which then seeds the numerical propagator.
    pub fn new_from_tle(
        tle: &str,
        propagator: &OrbitPropagator,
        duration: f64,
        timestep: f64,
    ) -> Result<Satellite> {
        let mut lines = tle.lines().map(str::trim).filter(|line| !line.is_empty());
        let (Some(name), Some(first_line), Some(second_line)) =
            (lines.next(), lines.next(), lines.next())
        else {
            return Err(OrbitError::InvalidTle(
                "expected a name line followed by two element lines".to_string(),
            ));
        };
        let elem = sgp4::Elements::from_tle(
            Some(name.to_string()),
            first_line.as_bytes(),
            second_line.as_bytes(),
        )
        .map_err(|e| OrbitError::InvalidTle(format!("{:?}", e)))?;
        let constants = sgp4::Constants::from_elements(&elem)
            .map_err(|e| OrbitError::InvalidTle(format!("{:?}", e)))?;
        let prediction = constants
            .propagate(0.)
            .map_err(|e| OrbitError::PropagationFailed(format!("{:?}", e)))?;

        let initial_state = State::new(
            Vector3::new(
                prediction.position[0],
                prediction.position[1],
                prediction.position[2],
            ),
            Vector3::new(
                prediction.velocity[0],
                prediction.velocity[1],
                prediction.velocity[2],
            ),
            0.,
        );
        let period = 1. / elem.mean_motion * 86400.;
        let trajectory = propagator.propagate(&initial_state, duration, timestep);
        Ok(Self::build(
            name.to_string(),
            format!("TLE epoch {}", elem.datetime),
            TLE_COLOR,
            elem.datetime.and_utc(),
            period,
            *propagator.body(),
            trajectory,
        ))
    }

    fn build(
        name: String,
        description: String,
        color: DisplayColor,
        epoch: DateTime<Utc>,
        orbital_period: f64,
        body: Body,
        trajectory: Trajectory,
    ) -> Satellite {
        let stats = OrbitStatistics::from_trajectory(&trajectory, &body);
        info!(
            "{}: {} states over {:.0}s, {} orbit, perigee {:.1} km, apogee {:.1} km",
            name,
            trajectory.len(),
            trajectory.duration(),
            stats.family,
            stats.periapsis_altitude,
            stats.apoapsis_altitude
        );
        Satellite {
            name,
            description,
            color,
            epoch,
            orbital_period,
            body,
            trajectory,
            stats,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
    pub fn get_description(&self) -> &str {
        &self.description
    }
    pub fn get_color(&self) -> DisplayColor {
        self.color
    }
    pub fn get_epoch(&self) -> DateTime<Utc> {
        self.epoch
    }
    pub fn get_orbital_period(&self) -> f64 {
        self.orbital_period
    }
    pub fn body(&self) -> &Body {
        &self.body
    }
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
    pub fn stats(&self) -> &OrbitStatistics {
        &self.stats
    }
    pub fn frame_count(&self) -> usize {
        self.trajectory.len()
    }

    pub fn state(&self, frame: usize) -> Option<&State> {
        self.trajectory.get(frame)
    }
    pub fn get_speed(&self, frame: usize) -> Option<f64> {
        self.state(frame).map(State::speed)
    }
    pub fn get_elements(&self, frame: usize) -> Option<OrbitalElements> {
        self.state(frame)
            .map(|state| OrbitalElements::from_state(state, self.body.mu))
    }
    pub fn get_sub_point(&self, frame: usize) -> Option<GeoCoordinate> {
        self.state(frame)
            .map(|state| get_subsatellite_point(state, &self.body))
    }
    pub fn get_look_angle(&self, station: &GroundStation, frame: usize) -> Option<SatAngle> {
        self.state(frame)
            .map(|state| station.look_angle(&state.position, state.time, &self.body))
    }
    /// Eclipse check and panel analysis at `frame` for a sun along `sun_direction`.
    pub fn solar_analysis(&self, frame: usize, sun_direction: &Vector3) -> Option<SolarPanelAnalysis> {
        self.state(frame).map(|state| {
            let eclipse = check_eclipse(&state.position, sun_direction, &self.body);
            analyze(&state.position, &state.velocity, sun_direction, &eclipse)
        })
    }

    pub fn access_statistics(&self, station: &GroundStation) -> AccessStatistics {
        calculate_access_windows(&self.trajectory, station, &self.body)
    }

    /// `None` when `seconds` puts the instant outside chrono's range.
    pub fn seconds_to_datetime(&self, seconds: f64) -> Option<DateTime<Utc>> {
        offset_datetime(&self.epoch, seconds)
    }
    pub fn seconds_since_epoch(&self, other: &DateTime<Utc>) -> f64 {
        (*other - self.epoch).num_milliseconds() as f64 / 1000.
    }
}
