use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    OrbitError,
    body::Body,
    ground_track::lat_lon_to_eci,
    helpers::{modulus, safe_asin},
    types::{GeoCoordinate, SatAngle, Vector3, unit_or_zero},
};

pub const DEFAULT_MIN_ELEVATION: f64 = 5.;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStation {
    pub name: String,
    pub code: String,
    pub location: GeoCoordinate,
    ///Degrees above the local horizon
    #[serde(default = "default_min_elevation")]
    pub min_elevation: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_min_elevation() -> f64 {
    DEFAULT_MIN_ELEVATION
}

fn default_visible() -> bool {
    true
}

impl GroundStation {
    ///Point is lat (deg) / long (deg) / alt (km)
    pub fn new(point: [f64; 3], name: &str, code: &str) -> GroundStation {
        GroundStation {
            name: name.to_string(),
            code: code.to_string(),
            location: GeoCoordinate::new(point[0], point[1], point[2]),
            min_elevation: DEFAULT_MIN_ELEVATION,
            visible: true,
        }
    }
    pub fn with_min_elevation(mut self, min_elevation: f64) -> GroundStation {
        self.min_elevation = min_elevation;
        self
    }

    fn eci(&self, time: f64, body: &Body) -> Vector3 {
        lat_lon_to_eci(&self.location, time, body)
    }

    /// Elevation (deg) of `sat_position` above this station's horizon.
    pub fn elevation(&self, sat_position: &Vector3, time: f64, body: &Body) -> f64 {
        let station = self.eci(time, body);
        let to_sat = unit_or_zero(&(sat_position - station));
        safe_asin(to_sat.dot(&unit_or_zero(&station))).to_degrees()
    }

    /// Azimuth (deg, clockwise from north, [0, 360)) of `sat_position`.
    pub fn azimuth(&self, sat_position: &Vector3, time: f64, body: &Body) -> f64 {
        let station = self.eci(time, body);
        let to_sat = sat_position - station;
        let vertical = unit_or_zero(&station);
        let east = unit_or_zero(&Vector3::z().cross(&vertical));
        let north = unit_or_zero(&vertical.cross(&east));
        let horizontal = unit_or_zero(&(to_sat - vertical * to_sat.dot(&vertical)));
        let azimuth = horizontal.dot(&east).atan2(horizontal.dot(&north)).to_degrees();
        modulus(azimuth, 360.)
    }

    ///Straight-line distance in km
    pub fn range(&self, sat_position: &Vector3, time: f64, body: &Body) -> f64 {
        (sat_position - self.eci(time, body)).magnitude()
    }

    pub fn is_visible(&self, sat_position: &Vector3, time: f64, body: &Body) -> bool {
        self.elevation(sat_position, time, body) >= self.min_elevation
    }

    pub fn look_angle(&self, sat_position: &Vector3, time: f64, body: &Body) -> SatAngle {
        SatAngle {
            elevation: self.elevation(sat_position, time, body),
            azimuth: self.azimuth(sat_position, time, body),
            range: self.range(sat_position, time, body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationPresetKind {
    NasaJpl,
    EsaMadrid,
    JaxaUsuda,
    NasaWallops,
    EsaKourou,
}

impl StationPresetKind {
    pub const ALL: [StationPresetKind; 5] = [
        StationPresetKind::NasaJpl,
        StationPresetKind::EsaMadrid,
        StationPresetKind::JaxaUsuda,
        StationPresetKind::NasaWallops,
        StationPresetKind::EsaKourou,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StationPresetKind::NasaJpl => "NASA JPL",
            StationPresetKind::EsaMadrid => "ESA Madrid",
            StationPresetKind::JaxaUsuda => "JAXA Usuda",
            StationPresetKind::NasaWallops => "NASA Wallops",
            StationPresetKind::EsaKourou => "ESA Kourou",
        }
    }

    pub fn station(&self) -> GroundStation {
        match self {
            //Goldstone, Deep Space Network
            StationPresetKind::NasaJpl => GroundStation::new([35.4, -116.9, 0.], self.name(), "JPL"),
            //Cebreros
            StationPresetKind::EsaMadrid => GroundStation::new([40.4, -4.4, 0.], self.name(), "MAD"),
            StationPresetKind::JaxaUsuda => GroundStation::new([36.1, 138.4, 0.], self.name(), "USD"),
            StationPresetKind::NasaWallops => {
                GroundStation::new([37.9, -75.5, 0.], self.name(), "WLP")
            }
            StationPresetKind::EsaKourou => GroundStation::new([5.2, -52.8, 0.], self.name(), "KOU"),
        }
    }

    pub fn all_stations() -> Vec<GroundStation> {
        Self::ALL.iter().map(|kind| kind.station()).collect()
    }
}

impl FromStr for StationPresetKind {
    type Err = OrbitError;
    ///Accepts the station code or its display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.name().eq_ignore_ascii_case(s) || kind.station().code.eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| OrbitError::UnknownPreset(s.to_string()))
    }
}
