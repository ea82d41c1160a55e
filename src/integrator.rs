use serde::{Deserialize, Serialize};

use crate::{body::Body, force_model::ForceModel, types::State};

/// Fixed-step integration scheme used by the propagator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// First order, kept as the naive baseline.
    Euler,
    #[default]
    Rk4,
}

impl Integrator {
    pub fn name(&self) -> &'static str {
        match self {
            Integrator::Euler => "Euler",
            Integrator::Rk4 => "RK4",
        }
    }
    pub fn order(&self) -> u8 {
        match self {
            Integrator::Euler => 1,
            Integrator::Rk4 => 4,
        }
    }

    /// Advances `state` by `h` seconds. Pathological `h` or a state near the
    /// body centre diverges rather than failing.
    pub fn step(&self, state: &State, h: f64, body: &Body, forces: &ForceModel) -> State {
        match self {
            Integrator::Euler => euler_step(state, h, body, forces),
            Integrator::Rk4 => rk4_step(state, h, body, forces),
        }
    }
}

fn euler_step(state: &State, h: f64, body: &Body, forces: &ForceModel) -> State {
    let acceleration = forces.acceleration(&state.position, body);
    State::new(
        state.position + state.velocity * h,
        state.velocity + acceleration * h,
        state.time + h,
    )
}

fn rk4_step(state: &State, h: f64, body: &Body, forces: &ForceModel) -> State {
    let half = h / 2.;

    let k1_v = state.velocity;
    let k1_a = forces.acceleration(&state.position, body);

    let k2_v = state.velocity + k1_a * half;
    let k2_a = forces.acceleration(&(state.position + k1_v * half), body);

    let k3_v = state.velocity + k2_a * half;
    let k3_a = forces.acceleration(&(state.position + k2_v * half), body);

    let k4_v = state.velocity + k3_a * h;
    let k4_a = forces.acceleration(&(state.position + k3_v * h), body);

    let position = state.position + (k1_v + k2_v * 2. + k3_v * 2. + k4_v) * (h / 6.);
    let velocity = state.velocity + (k1_a + k2_a * 2. + k3_a * 2. + k4_a) * (h / 6.);
    State::new(position, velocity, state.time + h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;
    use approx::assert_abs_diff_eq;

    fn circular_state(body: &Body, r: f64) -> State {
        State::new(
            Vector3::new(r, 0., 0.),
            Vector3::new(0., body.circular_speed(r), 0.),
            0.,
        )
    }

    #[test]
    fn test_euler_step_is_explicit() {
        let earth = Body::earth();
        let state = circular_state(&earth, 7000.);
        let next = Integrator::Euler.step(&state, 10., &earth, &ForceModel::default());
        // position only moves along the initial velocity
        assert_eq!(next.position.x, 7000.);
        assert_abs_diff_eq!(next.position.y, state.velocity.y * 10., epsilon = 1e-12);
        assert_abs_diff_eq!(next.velocity.x, -earth.mu / 7000f64.powi(2) * 10., epsilon = 1e-15);
        assert_eq!(next.time, 10.);
    }

    #[test]
    fn test_rk4_beats_euler_single_step() {
        let earth = Body::earth();
        let state = circular_state(&earth, 7000.);
        let forces = ForceModel::default();
        let energy = state.orbital_energy(earth.mu);
        let rk4 = Integrator::Rk4.step(&state, 60., &earth, &forces);
        let euler = Integrator::Euler.step(&state, 60., &earth, &forces);
        let rk4_drift = (rk4.orbital_energy(earth.mu) - energy).abs();
        let euler_drift = (euler.orbital_energy(earth.mu) - energy).abs();
        assert!(rk4_drift < euler_drift);
        assert_abs_diff_eq!(rk4.radius(), 7000., epsilon = 1e-3);
    }

    #[test]
    fn test_integrator_metadata() {
        assert_eq!(Integrator::default(), Integrator::Rk4);
        assert_eq!(Integrator::Rk4.name(), "RK4");
        assert_eq!(Integrator::Euler.order(), 1);
    }
}
