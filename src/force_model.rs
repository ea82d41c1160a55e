use serde::{Deserialize, Serialize};

use crate::{body::Body, types::Vector3};

/// Which gravitational terms contribute to the acceleration.
///
/// Point-mass gravity is always applied. Only `j2_perturbation` changes the
/// dynamics today; the remaining toggles are accepted but have no effect yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceModel {
    pub j2_perturbation: bool,
    pub j3_perturbation: bool,
    pub j4_perturbation: bool,
    pub atmospheric_drag: bool,
    pub solar_radiation: bool,
    pub third_body_moon: bool,
    pub third_body_sun: bool,
}

impl ForceModel {
    pub fn point_mass() -> ForceModel {
        ForceModel::default()
    }
    pub fn with_j2() -> ForceModel {
        ForceModel {
            j2_perturbation: true,
            ..ForceModel::default()
        }
    }
    /// True when any toggle without an implementation is switched on.
    pub fn has_reserved_terms(&self) -> bool {
        self.j3_perturbation
            || self.j4_perturbation
            || self.atmospheric_drag
            || self.solar_radiation
            || self.third_body_moon
            || self.third_body_sun
    }

    /// Total acceleration (km/s²) at `position`.
    pub fn acceleration(&self, position: &Vector3, body: &Body) -> Vector3 {
        let mut total = point_mass_gravity(position, body.mu);
        if self.j2_perturbation {
            total += j2_perturbation(position, body);
        }
        total
    }
}

pub fn point_mass_gravity(position: &Vector3, mu: f64) -> Vector3 {
    let r = position.magnitude();
    *position * (-mu / (r * r * r))
}

pub fn j2_perturbation(position: &Vector3, body: &Body) -> Vector3 {
    let r2 = position.magnitude_squared();
    let r = r2.sqrt();
    let z2_r2 = position.z * position.z / r2;
    let factor = 1.5 * body.j2 * body.mu * body.radius * body.radius / (r2 * r2 * r);
    Vector3::new(
        position.x * factor * (5. * z2_r2 - 1.),
        position.y * factor * (5. * z2_r2 - 1.),
        position.z * factor * (5. * z2_r2 - 3.),
    )
}
