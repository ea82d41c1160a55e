use std::ops::Deref;

use log::{debug, warn};

use crate::{body::Body, force_model::ForceModel, integrator::Integrator, types::State};

const STEP_ROUNDING: f64 = 1e-9;

/// Fully materialized sequence of states at a constant timestep.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    states: Vec<State>,
}

impl Trajectory {
    pub fn states(&self) -> &[State] {
        &self.states
    }
    /// Spacing between samples, 0 for trajectories with fewer than two states.
    pub fn timestep(&self) -> f64 {
        match self.states.as_slice() {
            [first, second, ..] => second.time - first.time,
            _ => 0.,
        }
    }
    pub fn duration(&self) -> f64 {
        match (self.states.first(), self.states.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.,
        }
    }
    pub fn into_states(self) -> Vec<State> {
        self.states
    }
}

impl Deref for Trajectory {
    type Target = [State];
    fn deref(&self) -> &[State] {
        &self.states
    }
}

impl From<Vec<State>> for Trajectory {
    fn from(states: Vec<State>) -> Self {
        Trajectory { states }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;
    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Drives an [`Integrator`] over a duration for one central body.
#[derive(Debug, Clone)]
pub struct OrbitPropagator {
    integrator: Integrator,
    body: Body,
    force_model: ForceModel,
}

impl OrbitPropagator {
    pub fn new(body: Body) -> OrbitPropagator {
        OrbitPropagator {
            integrator: Integrator::default(),
            body,
            force_model: ForceModel::default(),
        }
    }

    /// Integrates `floor(duration / timestep)` steps. The initial state is always
    /// element 0; a non-positive timestep or a duration shorter than one step
    /// yields just the initial state.
    ///
    /// The quotient is nudged by `STEP_ROUNDING` before flooring so that
    /// `(period, period / n)` gives exactly `n` steps. The same count decides
    /// whether the request is degenerate.
    pub fn propagate(&self, initial_state: &State, duration: f64, timestep: f64) -> Trajectory {
        let step_count = steps_for(duration, timestep);
        if step_count == 0 {
            warn!(
                "degenerate propagation request (duration {} s, timestep {} s), returning initial state only",
                duration, timestep
            );
            return Trajectory::from(vec![*initial_state]);
        }
        if self.force_model.has_reserved_terms() {
            warn!("force model enables terms that are not modelled yet, ignoring them");
        }
        debug!(
            "propagating {} steps of {} s with {}",
            step_count,
            timestep,
            self.integrator.name()
        );
        let mut states = Vec::with_capacity(step_count + 1);
        let mut current = *initial_state;
        states.push(current);
        for _ in 0..step_count {
            current = self.step(&current, timestep);
            states.push(current);
        }
        Trajectory::from(states)
    }

    pub fn step(&self, current: &State, timestep: f64) -> State {
        self.integrator
            .step(current, timestep, &self.body, &self.force_model)
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        self.integrator = integrator;
    }
    pub fn integrator(&self) -> Integrator {
        self.integrator
    }
    pub fn set_force_model(&mut self, model: ForceModel) {
        self.force_model = model;
    }
    pub fn force_model(&self) -> &ForceModel {
        &self.force_model
    }
    pub fn force_model_mut(&mut self) -> &mut ForceModel {
        &mut self.force_model
    }
    pub fn body(&self) -> &Body {
        &self.body
    }
}

fn steps_for(duration: f64, timestep: f64) -> usize {
    if !(timestep > 0. && timestep.is_finite() && duration.is_finite()) {
        return 0;
    }
    let steps = (duration / timestep + STEP_ROUNDING).floor();
    if steps >= 1. { steps as usize } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn circular_state(body: &Body, r: f64) -> State {
        State::new(
            Vector3::new(r, 0., 0.),
            Vector3::new(0., body.circular_speed(r), 0.),
            0.,
        )
    }

    fn closure_error(integrator: Integrator) -> f64 {
        let earth = Body::earth();
        let mut propagator = OrbitPropagator::new(earth);
        propagator.set_integrator(integrator);
        let initial = circular_state(&earth, 7000.);
        let period = earth.period(7000.);
        let trajectory = propagator.propagate(&initial, period, period / 360.);
        let last = trajectory.last().unwrap();
        (last.position - initial.position).magnitude()
    }

    #[test]
    fn test_trajectory_layout() {
        let earth = Body::earth();
        let initial = circular_state(&earth, 7000.);
        let trajectory = OrbitPropagator::new(earth).propagate(&initial, 100., 10.);
        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory[0], initial);
        for pair in trajectory.windows(2) {
            assert_abs_diff_eq!(pair[1].time - pair[0].time, 10., epsilon = 1e-9);
        }
        assert_abs_diff_eq!(trajectory.timestep(), 10.);
        assert_abs_diff_eq!(trajectory.duration(), 100., epsilon = 1e-9);
    }

    #[test]
    fn test_step_count_floors() {
        let earth = Body::earth();
        let initial = circular_state(&earth, 7000.);
        let trajectory = OrbitPropagator::new(earth).propagate(&initial, 95., 10.);
        assert_eq!(trajectory.len(), 10);
    }

    #[test]
    fn test_rounding_applies_to_single_step() {
        let earth = Body::earth();
        let initial = circular_state(&earth, 7000.);
        let propagator = OrbitPropagator::new(earth);
        let h = 10.;
        assert_eq!(propagator.propagate(&initial, h * (1. - 1e-10), h).len(), 2);
        assert_eq!(propagator.propagate(&initial, 2. * h * (1. - 1e-10), h).len(), 3);
        assert_eq!(propagator.propagate(&initial, h * 0.999, h).len(), 1);
        let period = earth.period(7000.);
        assert_eq!(propagator.propagate(&initial, period, period / 360.).len(), 361);
    }

    #[test]
    fn test_degenerate_requests() {
        let earth = Body::earth();
        let initial = circular_state(&earth, 7000.);
        let propagator = OrbitPropagator::new(earth);
        for (duration, timestep) in [
            (100., 0.),
            (100., -5.),
            (5., 10.),
            (100., f64::NAN),
            (f64::INFINITY, 10.),
            (-20., 10.),
        ] {
            let trajectory = propagator.propagate(&initial, duration, timestep);
            assert_eq!(trajectory.states(), &[initial]);
        }
    }

    #[test]
    fn test_rk4_energy_conservation() {
        let earth = Body::earth();
        let propagator = OrbitPropagator::new(earth);
        // elliptical: periapsis 7000 km, e = 0.1
        let a = 7000. / 0.9;
        let v = (earth.mu * (2. / 7000. - 1. / a)).sqrt();
        let initial = State::new(Vector3::new(7000., 0., 0.), Vector3::new(0., v, 0.), 0.);
        let period = earth.period(a);
        let trajectory = propagator.propagate(&initial, period, period / 360.);
        let e0 = trajectory.first().unwrap().orbital_energy(earth.mu);
        let e1 = trajectory.last().unwrap().orbital_energy(earth.mu);
        assert!(((e1 - e0) / e0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_closure() {
        let rk4 = closure_error(Integrator::Rk4);
        let euler = closure_error(Integrator::Euler);
        assert!(rk4 < 1.0, "rk4 closure error {} km", rk4);
        assert!(euler > 10. * rk4);
    }

    #[test]
    fn test_set_integrator_keeps_force_model() {
        let mut propagator = OrbitPropagator::new(Body::earth());
        propagator.set_force_model(ForceModel::with_j2());
        propagator.set_integrator(Integrator::Euler);
        assert!(propagator.force_model().j2_perturbation);
        assert_eq!(propagator.integrator(), Integrator::Euler);
    }

    #[test]
    fn test_j2_changes_inclined_orbit() {
        let earth = Body::earth();
        let speed = earth.circular_speed(7000.);
        let inc = 51.6f64.to_radians();
        let initial = State::new(
            Vector3::new(7000., 0., 0.),
            Vector3::new(0., speed * inc.cos(), speed * inc.sin()),
            0.,
        );
        let mut propagator = OrbitPropagator::new(earth);
        let plain = propagator.propagate(&initial, 5400., 10.);
        propagator.force_model_mut().j2_perturbation = true;
        let perturbed = propagator.propagate(&initial, 5400., 10.);
        let drift = (plain.last().unwrap().position - perturbed.last().unwrap().position).magnitude();
        assert!(drift > 1.);
        assert_relative_eq!(plain.last().unwrap().time, perturbed.last().unwrap().time);
    }
}
