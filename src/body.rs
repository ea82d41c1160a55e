use serde::{Deserialize, Serialize};

pub const MU_EARTH: f64 = 398600.4418; //km^3/s^2
pub const EARTH_RADIUS: f64 = 6378.137; //km
pub const EARTH_J2: f64 = 1.08263e-3;
pub const EARTH_ROTATION_RATE: f64 = 7.2921159e-5; //rad/s
pub const SUN_ANGULAR_RADIUS_DEG: f64 = 0.267;

/// Physical constants of the central body, handed to every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mu: f64,
    pub radius: f64,
    pub j2: f64,
    pub rotation_rate: f64,
    ///Radians, as seen from the body
    pub sun_angular_radius: f64,
}

impl Body {
    pub fn earth() -> Body {
        Body {
            mu: MU_EARTH,
            radius: EARTH_RADIUS,
            j2: EARTH_J2,
            rotation_rate: EARTH_ROTATION_RATE,
            sun_angular_radius: SUN_ANGULAR_RADIUS_DEG.to_radians(),
        }
    }
    /// Period of a bound orbit with semi-major axis `a`.
    pub fn period(&self, a: f64) -> f64 {
        2. * std::f64::consts::PI * (a.powi(3) / self.mu).sqrt()
    }
    pub fn circular_speed(&self, r: f64) -> f64 {
        (self.mu / r).sqrt()
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::earth()
    }
}
