use serde::{Deserialize, Serialize};

use crate::helpers::normalize_longitude;

const NORMALIZE_EPSILON: f64 = 1e-12;

/// Cartesian 3-vector, km or km/s depending on context.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit vector in the same direction, or the zero vector when too short to normalize.
pub fn unit_or_zero(v: &Vector3) -> Vector3 {
    v.try_normalize(NORMALIZE_EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Inertial position (km), velocity (km/s) and time (s since propagation start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub position: Vector3,
    pub velocity: Vector3,
    pub time: f64,
}

impl State {
    pub fn new(position: Vector3, velocity: Vector3, time: f64) -> State {
        State {
            position,
            velocity,
            time,
        }
    }
    /// Specific orbital energy v²/2 - mu/r.
    pub fn orbital_energy(&self, mu: f64) -> f64 {
        self.velocity.magnitude_squared() / 2. - mu / self.radius()
    }
    pub fn angular_momentum(&self) -> Vector3 {
        self.position.cross(&self.velocity)
    }
    pub fn radius(&self) -> f64 {
        self.position.magnitude()
    }
    pub fn altitude(&self, body_radius: f64) -> f64 {
        self.radius() - body_radius
    }
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Look angles from a ground station, degrees and km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatAngle {
    pub elevation: f64,
    pub azimuth: f64,
    pub range: f64,
}

/// Geocentric latitude/longitude in degrees, altitude in km above the body radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawGeoCoordinate")]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> GeoCoordinate {
        GeoCoordinate {
            latitude: latitude.clamp(-90., 90.),
            longitude: normalize_longitude(longitude),
            altitude,
        }
    }
}

#[derive(Deserialize)]
struct RawGeoCoordinate {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl From<RawGeoCoordinate> for GeoCoordinate {
    fn from(raw: RawGeoCoordinate) -> Self {
        GeoCoordinate::new(raw.latitude, raw.longitude, raw.altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cross_product() {
        let x = Vector3::new(1., 0., 0.);
        let y = Vector3::new(0., 1., 0.);
        assert_eq!(x.cross(&y), Vector3::z());
        assert_eq!(y.cross(&x), -Vector3::z());
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(unit_or_zero(&Vector3::zeros()), Vector3::zeros());
        assert_eq!(unit_or_zero(&Vector3::new(1e-14, 0., 0.)), Vector3::zeros());
        let unit = unit_or_zero(&Vector3::new(3., 4., 0.));
        assert_abs_diff_eq!(unit.magnitude(), 1., epsilon = 1e-15);
        assert_abs_diff_eq!(unit.x, 0.6, epsilon = 1e-15);
    }

    #[test]
    fn test_state_energy() {
        let mu = 398600.4418;
        let r = 7000.;
        let state = State::new(
            Vector3::new(r, 0., 0.),
            Vector3::new(0., (mu / r).sqrt(), 0.),
            0.,
        );
        // circular orbit: energy = -mu / 2r
        assert_abs_diff_eq!(state.orbital_energy(mu), -mu / (2. * r), epsilon = 1e-9);
        assert_abs_diff_eq!(state.altitude(6378.137), 621.863, epsilon = 1e-9);
        assert_abs_diff_eq!(state.angular_momentum().z, r * (mu / r).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_geo_coordinate_normalizes() {
        let coord = GeoCoordinate::new(95., 270., 1.);
        assert_eq!(coord.latitude, 90.);
        assert_abs_diff_eq!(coord.longitude, -90., epsilon = 1e-12);
    }

    #[test]
    fn test_geo_coordinate_from_config_normalizes() {
        let coord: GeoCoordinate =
            serde_json::from_str(r#"{"latitude":-100.0,"longitude":270.0,"altitude":0.5}"#)
                .unwrap();
        assert_eq!(coord.latitude, -90.);
        assert_abs_diff_eq!(coord.longitude, -90., epsilon = 1e-12);
        assert_eq!(coord.altitude, 0.5);
    }
}
