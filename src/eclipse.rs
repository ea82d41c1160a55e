use crate::{
    body::Body,
    helpers::{safe_acos, safe_asin},
    types::{Vector3, unit_or_zero},
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EclipseStatus {
    pub in_umbra: bool,
    ///Also set whenever `in_umbra` is
    pub in_penumbra: bool,
    ///Radians between the satellite and sun directions, seen from the body centre
    pub sun_angle: f64,
}

impl EclipseStatus {
    pub fn sun_angle_deg(&self) -> f64 {
        self.sun_angle.to_degrees()
    }
    pub fn is_sunlit(&self) -> bool {
        !self.in_penumbra
    }
}

/// Shadow test against a body of `body.radius`, with the sun treated as a disc
/// of `body.sun_angular_radius`.
pub fn check_eclipse(sat_position: &Vector3, sun_direction: &Vector3, body: &Body) -> EclipseStatus {
    let sun = unit_or_zero(sun_direction);
    let sat = unit_or_zero(sat_position);
    let cos_angle = sat.dot(&sun);
    let mut status = EclipseStatus {
        sun_angle: safe_acos(cos_angle),
        ..Default::default()
    };
    if cos_angle > 0. {
        return status;
    }

    let body_angular_radius = safe_asin(body.radius / sat_position.magnitude());
    let angle_from_anti_sun = safe_acos(-cos_angle);
    if angle_from_anti_sun < body_angular_radius - body.sun_angular_radius {
        status.in_umbra = true;
        status.in_penumbra = true;
    } else if angle_from_anti_sun < body_angular_radius + body.sun_angular_radius {
        status.in_penumbra = true;
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sunlit_side() {
        let earth = Body::earth();
        let status = check_eclipse(&Vector3::new(7000., 0., 0.), &Vector3::new(1., 0., 0.), &earth);
        assert!(!status.in_umbra && !status.in_penumbra);
        assert!(status.is_sunlit());
        assert_abs_diff_eq!(status.sun_angle_deg(), 0., epsilon = 1e-6);
    }

    #[test]
    fn test_directly_behind_body() {
        let earth = Body::earth();
        let sun = Vector3::new(1., 0., 0.);
        for r in [earth.radius + 1., 7000., 42164.] {
            let status = check_eclipse(&Vector3::new(-r, 0., 0.), &sun, &earth);
            assert!(status.in_umbra, "r = {}", r);
            assert!(status.in_penumbra);
        }
    }

    #[test]
    fn test_unnormalized_sun_direction() {
        let earth = Body::earth();
        let status = check_eclipse(&Vector3::new(-7000., 0., 0.), &Vector3::new(1.5e8, 0., 0.), &earth);
        assert!(status.in_umbra);
    }

    #[test]
    fn test_leaves_shadow_with_distance() {
        let earth = Body::earth();
        let sun = Vector3::new(1., 0., 0.);
        // fixed 10 deg off the anti-sun line, moving outward
        let off_axis = 10f64.to_radians();
        let mut was_outside = false;
        for step in 0..200 {
            let r = earth.radius + 100. + step as f64 * 500.;
            let position = Vector3::new(-r * off_axis.cos(), r * off_axis.sin(), 0.);
            let status = check_eclipse(&position, &sun, &earth);
            let outside_cone = off_axis > (earth.radius / r).asin() + earth.sun_angular_radius;
            if outside_cone {
                assert!(!status.in_penumbra, "r = {}", r);
                was_outside = true;
            } else {
                assert!(status.in_penumbra);
            }
        }
        assert!(was_outside);
    }

    #[test]
    fn test_penumbra_band() {
        let earth = Body::earth();
        let sun = Vector3::new(1., 0., 0.);
        let r = 7000.;
        let edge = (earth.radius / r).asin();
        // between the umbra and penumbra cones
        let angle = edge + earth.sun_angular_radius / 2.;
        let position = Vector3::new(-r * angle.cos(), r * angle.sin(), 0.);
        let status = check_eclipse(&position, &sun, &earth);
        assert!(!status.in_umbra);
        assert!(status.in_penumbra);
        assert!(!status.is_sunlit());
    }
}
