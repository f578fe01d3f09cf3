//! Equations of motion for the planar double pendulum.
//!
//! Two point masses on massless rigid rods, under uniform gravity, with a
//! linear damping term subtracted from each angular acceleration:
//!
//! ```text
//!        pivot
//!          ●
//!           \  l1, θ1
//!            \
//!             ● m1
//!             |  l2, θ2
//!             |
//!             ● m2
//! ```
//!
//! ## Degenerate configurations
//!
//! Both accelerations share the factor `2·m1 + m2 − m2·cos(2θ1 − 2θ2)`.
//! With positive masses it never reaches zero, but non-physical parameters
//! (for example `m1 = 0` with `θ1 = θ2`) make it vanish. The model does not
//! guard against this: the resulting NaN or infinity flows into the state
//! and the simulation keeps running with it.

use crate::integrator::DerivativeModel;
use crate::types::{Derivative, PendulumParams, PendulumState};

/// Double pendulum derivative oracle over a parameter snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DoublePendulum<'a> {
    pub params: &'a PendulumParams,
}

impl<'a> DoublePendulum<'a> {
    pub fn new(params: &'a PendulumParams) -> Self {
        Self { params }
    }

    /// Angular accelerations before damping, `(domega1, domega2)`.
    ///
    /// The expression layout is kept term-for-term: in a chaotic system a
    /// rearranged but algebraically equal formula diverges after a few
    /// seconds of simulated time.
    fn undamped_accelerations(&self, state: &PendulumState) -> (f64, f64) {
        let PendulumParams {
            m1, m2, l1, l2, g, ..
        } = *self.params;
        let PendulumState {
            theta1: t1,
            omega1: w1,
            theta2: t2,
            omega2: w2,
        } = *state;

        let gravity_own = -g * (2.0 * m1 + m2) * t1.sin();
        let gravity_coupled = -m2 * g * (t1 - 2.0 * t2).sin();
        let coupling = -2.0 * (t1 - t2).sin() * m2;
        let centripetal = w2 * w2 * l2 + w1 * w1 * l1 * (t1 - t2).cos();
        let den1 = l1 * (2.0 * m1 + m2 - m2 * (2.0 * t1 - 2.0 * t2).cos());

        let domega1 = (gravity_own + gravity_coupled + coupling * centripetal) / den1;

        let swing = 2.0 * (t1 - t2).sin();
        let centripetal_upper = w1 * w1 * l1 * (m1 + m2);
        let gravity_upper = g * (m1 + m2) * t1.cos();
        let centripetal_lower = w2 * w2 * l2 * m2 * (t1 - t2).cos();
        let den2 = l2 * (2.0 * m1 + m2 - m2 * (2.0 * t1 - 2.0 * t2).cos());

        let domega2 = (swing * (centripetal_upper + gravity_upper + centripetal_lower)) / den2;

        (domega1, domega2)
    }
}

impl DerivativeModel for DoublePendulum<'_> {
    fn derivative(&self, state: &PendulumState) -> Derivative {
        let (domega1, domega2) = self.undamped_accelerations(state);
        let d = self.params.d;

        Derivative {
            dtheta1: state.omega1,
            domega1: domega1 - d * state.omega1,
            dtheta2: state.omega2,
            domega2: domega2 - d * state.omega2,
        }
    }
}

// =============================================================================
// Energy
// =============================================================================

/// Kinetic energy of both bobs.
///
/// `T = ½(m1+m2)·l1²·ω1² + ½·m2·l2²·ω2² + m2·l1·l2·ω1·ω2·cos(θ1−θ2)`
pub fn kinetic_energy(state: &PendulumState, params: &PendulumParams) -> f64 {
    let PendulumParams { m1, m2, l1, l2, .. } = *params;
    let w1 = state.omega1;
    let w2 = state.omega2;

    0.5 * (m1 + m2) * l1 * l1 * w1 * w1
        + 0.5 * m2 * l2 * l2 * w2 * w2
        + m2 * l1 * l2 * w1 * w2 * (state.theta1 - state.theta2).cos()
}

/// Gravitational potential energy with the zero level at the pivot.
///
/// `V = −(m1+m2)·g·l1·cos θ1 − m2·g·l2·cos θ2`
pub fn potential_energy(state: &PendulumState, params: &PendulumParams) -> f64 {
    let PendulumParams { m1, m2, l1, l2, g, .. } = *params;
    -(m1 + m2) * g * l1 * state.theta1.cos() - m2 * g * l2 * state.theta2.cos()
}

/// Total mechanical energy (kinetic + potential).
pub fn total_energy(state: &PendulumState, params: &PendulumParams) -> f64 {
    kinetic_energy(state, params) + potential_energy(state, params)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference_params() -> PendulumParams {
        PendulumParams::new(10.0, 10.0, 200.0, 200.0, 9.81, 0.0)
    }

    #[test]
    fn test_hanging_at_rest_is_equilibrium() {
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let k = model.derivative(&PendulumState::at_rest(0.0, 0.0));
        assert_eq!(k, Derivative::ZERO);
    }

    #[test]
    fn test_angle_rates_are_velocities() {
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let state = PendulumState::new(0.3, 1.25, -0.7, -0.5);
        let k = model.derivative(&state);
        assert_eq!(k.dtheta1, 1.25);
        assert_eq!(k.dtheta2, -0.5);
    }

    #[test]
    fn test_horizontal_release_accelerations() {
        // θ1 = θ2 = π/2: the lower link has no relative swing, the upper
        // link falls with -g(2m1+m2)/(2 l1 m1) when m1 = m2.
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let k = model.derivative(&PendulumState::initial());

        let expected = -(9.81 * 30.0 + 10.0 * 9.81 * (-std::f64::consts::FRAC_PI_2).sin())
            / (200.0 * 20.0);
        assert_abs_diff_eq!(k.domega1, expected, epsilon = 1e-12);
        assert_eq!(k.domega2, 0.0);
    }

    #[test]
    fn test_damping_opposes_velocity() {
        let params = reference_params();
        let damped = PendulumParams { d: 0.5, ..params };
        let state = PendulumState::new(0.4, 2.0, 0.1, -3.0);

        let free = DoublePendulum::new(&params).derivative(&state);
        let with_damping = DoublePendulum::new(&damped).derivative(&state);

        assert_abs_diff_eq!(with_damping.domega1, free.domega1 - 0.5 * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(with_damping.domega2, free.domega2 + 0.5 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_does_not_touch_inputs() {
        let params = reference_params();
        let snapshot = params;
        let state = PendulumState::new(1.0, 0.2, 2.0, -0.3);
        let before = state;
        let _ = DoublePendulum::new(&params).derivative(&state);
        assert_eq!(state, before);
        assert_eq!(params, snapshot);
    }

    #[test]
    fn test_vanishing_denominator_yields_nan() {
        // m1 = 0 and θ1 = θ2 make 2m1 + m2 - m2 cos(0) zero; the numerator is
        // zero too, so the result is 0/0. It is reported as-is.
        let params = PendulumParams {
            m1: 0.0,
            ..reference_params()
        };
        let k = DoublePendulum::new(&params).derivative(&PendulumState::at_rest(0.3, 0.3));
        assert!(k.domega1.is_nan());
        assert!(k.domega2.is_nan());
        assert_eq!(k.dtheta1, 0.0);
    }

    #[test]
    fn test_energy_at_rest_hanging() {
        let params = reference_params();
        let state = PendulumState::at_rest(0.0, 0.0);
        assert_eq!(kinetic_energy(&state, &params), 0.0);
        // -(20 * 9.81 * 200) - (10 * 9.81 * 200)
        assert_abs_diff_eq!(total_energy(&state, &params), -58_860.0, epsilon = 1e-9);
    }

    #[test]
    fn test_kinetic_energy_rigid_rotation() {
        // Both links aligned and spinning together: T = ½ I ω² with
        // I = m1 l1² + m2 (l1 + l2)².
        let params = PendulumParams::new(2.0, 3.0, 1.0, 2.0, 9.81, 0.0);
        let state = PendulumState::new(0.5, 1.5, 0.5, 1.5);
        let inertia = 2.0 * 1.0 + 3.0 * 9.0;
        assert_abs_diff_eq!(
            kinetic_energy(&state, &params),
            0.5 * inertia * 1.5 * 1.5,
            epsilon = 1e-12
        );
    }
}
