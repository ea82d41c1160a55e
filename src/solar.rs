use std::fmt::Display;

use crate::{eclipse::EclipseStatus, helpers::safe_asin, types::{Vector3, unit_or_zero}};

pub const SOLAR_EFFICIENCY_PENUMBRA: f64 = 0.5;
pub const SOLAR_EFFICIENCY_HIGH_BETA: f64 = 0.7;
pub const HIGH_BETA_THRESHOLD_DEG: f64 = 75.;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPanelAnalysis {
    ///Radians between the sun direction and the orbital plane
    pub beta_angle: f64,
    ///Radians, same geometry as `beta_angle`
    pub sun_elevation: f64,
    ///0 to 1, assuming sun-tracking panels
    pub efficiency: f64,
    pub sun_vector: Vector3,
    pub in_sunlight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerStatus {
    BatteryMode,
    Optimal,
    Good,
    Limited,
}

impl Display for PowerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            PowerStatus::BatteryMode => "Battery Mode",
            PowerStatus::Optimal => "Optimal Generation",
            PowerStatus::Good => "Good Generation",
            PowerStatus::Limited => "Limited Generation",
        };
        f.write_str(text)
    }
}

impl Default for SolarPanelAnalysis {
    fn default() -> Self {
        SolarPanelAnalysis {
            beta_angle: 0.,
            sun_elevation: 0.,
            efficiency: 0.,
            sun_vector: Vector3::zeros(),
            in_sunlight: false,
        }
    }
}

impl SolarPanelAnalysis {
    pub fn beta_angle_deg(&self) -> f64 {
        self.beta_angle.to_degrees()
    }
    pub fn sun_elevation_deg(&self) -> f64 {
        self.sun_elevation.to_degrees()
    }
    pub fn power_status(&self) -> PowerStatus {
        if !self.in_sunlight {
            PowerStatus::BatteryMode
        } else if self.efficiency > 0.8 {
            PowerStatus::Optimal
        } else if self.efficiency > 0.5 {
            PowerStatus::Good
        } else {
            PowerStatus::Limited
        }
    }
}

/// Panel geometry and power efficiency for one position/velocity pair.
///
/// Penumbra halves the output; otherwise a beta angle beyond 75 degrees applies
/// the high-beta derating instead.
pub fn analyze(
    position: &Vector3,
    velocity: &Vector3,
    sun_direction: &Vector3,
    eclipse: &EclipseStatus,
) -> SolarPanelAnalysis {
    let sun = unit_or_zero(sun_direction);
    if eclipse.in_umbra {
        return SolarPanelAnalysis {
            sun_vector: sun,
            in_sunlight: false,
            ..Default::default()
        };
    }

    let orbital_normal = unit_or_zero(&position.cross(velocity));
    let beta_angle = safe_asin(sun.dot(&orbital_normal));
    let base = beta_angle.cos().abs();
    let efficiency = if eclipse.in_penumbra {
        base * SOLAR_EFFICIENCY_PENUMBRA
    } else if beta_angle.to_degrees().abs() > HIGH_BETA_THRESHOLD_DEG {
        base * SOLAR_EFFICIENCY_HIGH_BETA
    } else {
        base
    };

    SolarPanelAnalysis {
        beta_angle,
        sun_elevation: beta_angle,
        efficiency: efficiency.clamp(0., 1.),
        sun_vector: sun,
        in_sunlight: true,
    }
}
