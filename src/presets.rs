use std::str::FromStr;

use crate::{
    OrbitError,
    body::Body,
    types::{State, Vector3},
};

const GEO_SIDEREAL_DAY: f64 = 86164.;

/// RGBA colour, passed through untouched for display layers.
pub type DisplayColor = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPresetKind {
    Iss,
    Geo,
    Molniya,
    Gps,
    SunSync,
    Polar,
}

impl OrbitPresetKind {
    pub const ALL: [OrbitPresetKind; 6] = [
        OrbitPresetKind::Iss,
        OrbitPresetKind::Geo,
        OrbitPresetKind::Molniya,
        OrbitPresetKind::Gps,
        OrbitPresetKind::SunSync,
        OrbitPresetKind::Polar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrbitPresetKind::Iss => "ISS",
            OrbitPresetKind::Geo => "GEO",
            OrbitPresetKind::Molniya => "Molniya",
            OrbitPresetKind::Gps => "GPS",
            OrbitPresetKind::SunSync => "Sun-Sync",
            OrbitPresetKind::Polar => "Polar",
        }
    }
}

impl FromStr for OrbitPresetKind {
    type Err = OrbitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrbitError::UnknownPreset(s.to_string()))
    }
}

/// A named starting orbit plus the labelling data display layers need.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPreset {
    pub kind: OrbitPresetKind,
    pub name: String,
    pub description: String,
    pub initial_state: State,
    ///Nominal period in seconds
    pub period: f64,
    pub color: DisplayColor,
}

impl OrbitPreset {
    pub fn new(kind: OrbitPresetKind, body: &Body) -> OrbitPreset {
        let (altitude, inclination, eccentricity, arg_periapsis) = match kind {
            OrbitPresetKind::Iss => (400., 51.6, 0., 0.),
            OrbitPresetKind::Geo => (35786., 0., 0., 0.),
            OrbitPresetKind::Molniya => (500., 63.4, 0.737, 270.),
            OrbitPresetKind::Gps => (20200., 55., 0., 0.),
            OrbitPresetKind::SunSync => (600., 98., 0., 0.),
            OrbitPresetKind::Polar => (600., 90., 0., 0.),
        };
        let period = match kind {
            OrbitPresetKind::Geo => GEO_SIDEREAL_DAY,
            OrbitPresetKind::Molniya => body.period((2. * body.radius + 500. + 39900.) / 2.),
            _ => body.period(body.radius + altitude),
        };
        let (description, color) = match kind {
            OrbitPresetKind::Iss => (
                "Low Earth Orbit, 400 km altitude, 51.6° inclination",
                [253, 249, 0, 255],
            ),
            OrbitPresetKind::Geo => (
                "Geostationary Orbit, 35,786 km altitude, 0° inclination",
                [255, 161, 0, 255],
            ),
            OrbitPresetKind::Molniya => (
                "Highly elliptical, 500-39,900 km, 63.4° inclination",
                [230, 41, 55, 255],
            ),
            OrbitPresetKind::Gps => (
                "Medium Earth Orbit, 20,200 km altitude, 55° inclination",
                [0, 228, 48, 255],
            ),
            OrbitPresetKind::SunSync => (
                "Sun-Synchronous, 600 km altitude, 98° inclination",
                [102, 191, 255, 255],
            ),
            OrbitPresetKind::Polar => (
                "Polar Orbit, 600 km altitude, 90° inclination",
                [200, 122, 255, 255],
            ),
        };
        OrbitPreset {
            kind,
            name: kind.name().to_string(),
            description: description.to_string(),
            initial_state: state_from_orbital_params(
                altitude,
                inclination,
                eccentricity,
                arg_periapsis,
                body,
            ),
            period,
            color,
        }
    }

    pub fn all(body: &Body) -> Vec<OrbitPreset> {
        OrbitPresetKind::ALL
            .iter()
            .map(|&kind| OrbitPreset::new(kind, body))
            .collect()
    }
}

/// State at periapsis for an orbit with its node on +x.
///
/// `altitude` is the periapsis altitude in km; angles are degrees. The
/// periapsis is rotated in-plane by the argument of periapsis and the plane is
/// then tilted about +x by the inclination.
pub fn state_from_orbital_params(
    altitude: f64,
    inclination_deg: f64,
    eccentricity: f64,
    arg_periapsis_deg: f64,
    body: &Body,
) -> State {
    let inc = inclination_deg.to_radians();
    let omega = arg_periapsis_deg.to_radians();
    let rp = body.radius + altitude;
    let a = rp / (1. - eccentricity);
    let speed = (body.mu * (2. / rp - 1. / a)).sqrt();

    let in_plane = |x: f64, y: f64| {
        let (sin_w, cos_w) = omega.sin_cos();
        let rotated = (x * cos_w - y * sin_w, x * sin_w + y * cos_w);
        let (sin_i, cos_i) = inc.sin_cos();
        Vector3::new(rotated.0, rotated.1 * cos_i, rotated.1 * sin_i)
    };
    State::new(in_plane(rp, 0.), in_plane(0., speed), 0.)
}
