use std::f64::consts::PI;
use std::fmt::Display;

use crate::{
    helpers::safe_acos,
    types::{State, Vector3, unit_or_zero},
};

const SINGULAR_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitType {
    Circular,
    Elliptical,
    Parabolic,
    Hyperbolic,
}

impl Display for OrbitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrbitType::Circular => "Circular",
            OrbitType::Elliptical => "Elliptical",
            OrbitType::Parabolic => "Parabolic",
            OrbitType::Hyperbolic => "Hyperbolic",
        };
        f.write_str(name)
    }
}

/// Classical elements of one state. Angles are radians, distances km, period s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
    pub periapsis: f64,
    ///Infinite for unbound orbits
    pub apoapsis: f64,
    ///Infinite for unbound orbits
    pub period: f64,
}

impl OrbitalElements {
    /// Keplerian elements of `state` about a body with gravitational parameter `mu`.
    ///
    /// Equatorial orbits report a RAAN of 0, and circular orbits an argument of
    /// periapsis of 0 with the true anomaly measured from the ascending node
    /// (or from +x when also equatorial).
    pub fn from_state(state: &State, mu: f64) -> OrbitalElements {
        let r = state.position;
        let v = state.velocity;
        let r_mag = r.magnitude();
        let v_mag = v.magnitude();

        let h = r.cross(&v);
        let h_mag = h.magnitude();
        let n = Vector3::z().cross(&h);
        let n_mag = n.magnitude();

        let e_vec = v.cross(&h) / mu - unit_or_zero(&r);
        let eccentricity = e_vec.magnitude();

        let energy = v_mag * v_mag / 2. - mu / r_mag;
        let semi_major_axis = -mu / (2. * energy);

        let inclination = if h_mag > 0. {
            safe_acos(h.z / h_mag)
        } else {
            0.
        };

        let equatorial = n_mag <= SINGULAR_EPSILON;
        let circular = eccentricity <= SINGULAR_EPSILON;

        let raan = if equatorial {
            0.
        } else {
            let angle = safe_acos(n.x / n_mag);
            if n.y < 0. { 2. * PI - angle } else { angle }
        };

        let argument_of_periapsis = if equatorial || circular {
            0.
        } else {
            let angle = safe_acos(n.dot(&e_vec) / (n_mag * eccentricity));
            if e_vec.z < 0. { 2. * PI - angle } else { angle }
        };

        let true_anomaly = if !circular {
            let angle = safe_acos(e_vec.dot(&r) / (eccentricity * r_mag));
            if r.dot(&v) < 0. { 2. * PI - angle } else { angle }
        } else if !equatorial {
            // argument of latitude
            let angle = safe_acos(n.dot(&r) / (n_mag * r_mag));
            if r.z < 0. { 2. * PI - angle } else { angle }
        } else {
            // true longitude
            let angle = r.y.atan2(r.x);
            if angle < 0. { angle + 2. * PI } else { angle }
        };

        let bound = semi_major_axis > 0. && eccentricity < 1.;
        let periapsis = semi_major_axis * (1. - eccentricity);
        let (apoapsis, period) = if bound {
            (
                semi_major_axis * (1. + eccentricity),
                2. * PI * (semi_major_axis.powi(3) / mu).sqrt(),
            )
        } else {
            (f64::INFINITY, f64::INFINITY)
        };

        OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            argument_of_periapsis,
            true_anomaly,
            periapsis,
            apoapsis,
            period,
        }
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination.to_degrees()
    }
    pub fn raan_deg(&self) -> f64 {
        self.raan.to_degrees()
    }
    pub fn argument_of_periapsis_deg(&self) -> f64 {
        self.argument_of_periapsis.to_degrees()
    }
    pub fn true_anomaly_deg(&self) -> f64 {
        self.true_anomaly.to_degrees()
    }

    pub fn orbit_type(&self) -> OrbitType {
        let e = self.eccentricity;
        if e < 0.01 {
            OrbitType::Circular
        } else if e < 1. {
            OrbitType::Elliptical
        } else if (e - 1.).abs() < 0.01 {
            OrbitType::Parabolic
        } else {
            OrbitType::Hyperbolic
        }
    }
}

impl Display for OrbitalElements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Orbit type: {}", self.orbit_type())?;
        writeln!(f, "Semi-major axis: {:.2} km", self.semi_major_axis)?;
        writeln!(f, "Eccentricity: {:.4}", self.eccentricity)?;
        writeln!(f, "Inclination: {:.2} deg", self.inclination_deg())?;
        writeln!(f, "RAAN: {:.2} deg", self.raan_deg())?;
        writeln!(f, "Arg of periapsis: {:.2} deg", self.argument_of_periapsis_deg())?;
        writeln!(f, "True anomaly: {:.2} deg", self.true_anomaly_deg())?;
        writeln!(f, "Periapsis: {:.2} km", self.periapsis)?;
        writeln!(f, "Apoapsis: {:.2} km", self.apoapsis)?;
        write!(f, "Period: {:.2} min", self.period / 60.)
    }
}
