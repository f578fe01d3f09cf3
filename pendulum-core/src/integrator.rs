//! Numerical integrators for advancing the pendulum in time.
//!
//! The primary integrator is classical fourth-order Runge-Kutta. The double
//! pendulum vector field is stiff near the aligned configurations and
//! chaotic everywhere else; RK4 keeps the per-step error at O(dt⁵) without
//! needing an error estimate or step-size control.
//!
//! ## Algorithm
//!
//! Given state s and derivative oracle f(s):
//!
//! ```text
//! 1. k1 = f(s)
//! 2. k2 = f(s + k1*dt/2)
//! 3. k3 = f(s + k2*dt/2)
//! 4. k4 = f(s + k3*dt)
//! 5. s' = s + (k1 + 2*k2 + 2*k3 + k4)*dt/6
//! ```

use crate::types::{Derivative, PendulumState};

/// Trait for computing the time derivative of the pendulum state.
///
/// Implementations provide the physics model; integrators only ever call
/// this, so they can be tested against simpler systems.
pub trait DerivativeModel {
    fn derivative(&self, state: &PendulumState) -> Derivative;
}

/// Classical fourth-order Runge-Kutta integrator.
pub struct Rk4;

impl Rk4 {
    /// Advance the state by one time step.
    ///
    /// # Arguments
    /// * `state` - Current pendulum state
    /// * `model` - Derivative oracle
    /// * `dt` - Time step in simulated seconds, assumed positive and small
    ///
    /// # Returns
    /// New state after the time step. Identical inputs always produce
    /// bit-identical outputs.
    pub fn step<M: DerivativeModel>(state: &PendulumState, model: &M, dt: f64) -> PendulumState {
        let half = dt * 0.5;

        let k1 = model.derivative(state);
        let k2 = model.derivative(&(*state + k1 * half));
        let k3 = model.derivative(&(*state + k2 * half));
        let k4 = model.derivative(&(*state + k3 * dt));

        PendulumState {
            theta1: state.theta1
                + (k1.dtheta1 + 2.0 * k2.dtheta1 + 2.0 * k3.dtheta1 + k4.dtheta1) * dt / 6.0,
            omega1: state.omega1
                + (k1.domega1 + 2.0 * k2.domega1 + 2.0 * k3.domega1 + k4.domega1) * dt / 6.0,
            theta2: state.theta2
                + (k1.dtheta2 + 2.0 * k2.dtheta2 + 2.0 * k3.dtheta2 + k4.dtheta2) * dt / 6.0,
            omega2: state.omega2
                + (k1.domega2 + 2.0 * k2.domega2 + 2.0 * k3.domega2 + k4.domega2) * dt / 6.0,
        }
    }

    /// Advance the state by multiple substeps.
    ///
    /// Total time advanced is `substeps * dt`.
    pub fn step_n<M: DerivativeModel>(
        state: &PendulumState,
        model: &M,
        dt: f64,
        substeps: usize,
    ) -> PendulumState {
        let mut current = *state;
        for _ in 0..substeps {
            current = Self::step(&current, model, dt);
        }
        current
    }
}

/// Simple Euler integrator (for comparison/testing only).
///
/// **Warning**: first-order and energy-injecting on oscillators; never used
/// by the simulation loop.
pub struct Euler;

impl Euler {
    /// Advance the state by one time step using forward Euler.
    pub fn step<M: DerivativeModel>(state: &PendulumState, model: &M, dt: f64) -> PendulumState {
        *state + model.derivative(state) * dt
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{total_energy, DoublePendulum};
    use crate::types::PendulumParams;
    use approx::assert_abs_diff_eq;

    /// Two decoupled harmonic oscillators: θ'' = -θ.
    struct Harmonic;

    impl DerivativeModel for Harmonic {
        fn derivative(&self, s: &PendulumState) -> Derivative {
            Derivative {
                dtheta1: s.omega1,
                domega1: -s.theta1,
                dtheta2: s.omega2,
                domega2: -s.theta2,
            }
        }
    }

    /// Constant angular acceleration on both links.
    struct ConstantAcceleration(f64);

    impl DerivativeModel for ConstantAcceleration {
        fn derivative(&self, s: &PendulumState) -> Derivative {
            Derivative {
                dtheta1: s.omega1,
                domega1: self.0,
                dtheta2: s.omega2,
                domega2: self.0,
            }
        }
    }

    fn reference_params() -> PendulumParams {
        PendulumParams::new(10.0, 10.0, 200.0, 200.0, 9.81, 0.0)
    }

    fn energy_scale(params: &PendulumParams) -> f64 {
        (params.m1 + params.m2) * params.g * (params.l1 + params.l2)
    }

    #[test]
    fn test_constant_acceleration_is_exact() {
        // RK4 integrates polynomials up to degree 4 exactly
        let initial = PendulumState::new(0.0, 1.0, 0.0, -1.0);
        let s = Rk4::step(&initial, &ConstantAcceleration(2.0), 0.5);
        // θ = θ0 + ω0 t + ½ a t²
        assert_abs_diff_eq!(s.theta1, 0.5 + 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(s.omega1, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(s.theta2, -0.5 + 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(s.omega2, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_harmonic_quarter_period() {
        let initial = PendulumState::at_rest(1.0, -0.5);
        let steps = 1000;
        let dt = std::f64::consts::FRAC_PI_2 / steps as f64;

        let s = Rk4::step_n(&initial, &Harmonic, dt, steps);

        // After a quarter period the oscillator crosses zero at full speed
        assert_abs_diff_eq!(s.theta1, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(s.omega1, -1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(s.theta2, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(s.omega2, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_step_is_deterministic() {
        let params = PendulumParams {
            d: 0.05,
            ..reference_params()
        };
        let model = DoublePendulum::new(&params);
        let state = PendulumState::new(2.1, -0.4, -1.3, 0.9);

        let first = Rk4::step(&state, &model, 0.01);
        for _ in 0..10 {
            let again = Rk4::step(&state, &model, 0.01);
            assert_eq!(again.theta1.to_bits(), first.theta1.to_bits());
            assert_eq!(again.omega1.to_bits(), first.omega1.to_bits());
            assert_eq!(again.theta2.to_bits(), first.theta2.to_bits());
            assert_eq!(again.omega2.to_bits(), first.omega2.to_bits());
        }
    }

    #[test]
    fn test_step_n_matches_repeated_step() {
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let initial = PendulumState::initial();

        let mut manual = initial;
        for _ in 0..25 {
            manual = Rk4::step(&manual, &model, 0.01);
        }
        assert_eq!(Rk4::step_n(&initial, &model, 0.01, 25), manual);
    }

    #[test]
    fn test_undamped_energy_conserved() {
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let initial = PendulumState::initial();
        let e0 = total_energy(&initial, &params);
        let tolerance = 1e-6 * energy_scale(&params);

        let mut s = initial;
        for _ in 0..2000 {
            s = Rk4::step(&s, &model, 0.01);
            assert!(
                (total_energy(&s, &params) - e0).abs() < tolerance,
                "energy drifted to {} from {}",
                total_energy(&s, &params),
                e0
            );
        }
    }

    #[test]
    fn test_energy_error_grows_with_dt() {
        // Same simulated horizon, coarse vs fine steps
        let params = PendulumParams::new(10.0, 10.0, 1.0, 1.0, 9.81, 0.0);
        let model = DoublePendulum::new(&params);
        let initial = PendulumState::at_rest(1.2, 0.4);
        let e0 = total_energy(&initial, &params);

        let drift = |dt: f64, steps: usize| {
            let s = Rk4::step_n(&initial, &model, dt, steps);
            (total_energy(&s, &params) - e0).abs()
        };

        let fine = drift(0.001, 2000);
        let coarse = drift(0.05, 40);
        assert!(
            coarse > fine,
            "coarse drift {} should exceed fine drift {}",
            coarse,
            fine
        );
        assert!(fine < 1e-6 * energy_scale(&params));
    }

    #[test]
    fn test_damped_energy_non_increasing() {
        let params = PendulumParams {
            d: 0.2,
            ..reference_params()
        };
        let model = DoublePendulum::new(&params);
        let tolerance = 1e-9 * energy_scale(&params);

        let mut s = PendulumState::initial();
        let mut previous = total_energy(&s, &params);
        for _ in 0..3000 {
            s = Rk4::step(&s, &model, 0.01);
            let e = total_energy(&s, &params);
            assert!(
                e <= previous + tolerance,
                "energy rose from {} to {}",
                previous,
                e
            );
            previous = e;
        }
        assert!(previous < total_energy(&PendulumState::initial(), &params));
    }

    #[test]
    fn test_small_angle_single_step() {
        let params = reference_params();
        let model = DoublePendulum::new(&params);
        let initial = PendulumState::at_rest(0.01, 0.01);

        let s = Rk4::step(&initial, &model, 0.01);

        // Both links start falling back toward the vertical
        assert!(s.theta1 < initial.theta1);
        assert!(s.theta2 < initial.theta2);
        assert!(s.omega1 < 0.0);
        assert!(s.omega2 < 0.0);
        // With θ1 = θ2 the lower link feels no relative torque at first, so
        // it lags the upper one by orders of magnitude within a single step.
        assert!(s.omega2.abs() < 1e-3 * s.omega1.abs());
        assert!((initial.theta2 - s.theta2) < (initial.theta1 - s.theta1));
    }

    #[test]
    fn test_rk4_beats_euler_on_energy() {
        let params = PendulumParams::new(10.0, 10.0, 1.0, 1.0, 9.81, 0.0);
        let model = DoublePendulum::new(&params);
        let initial = PendulumState::at_rest(0.8, 0.2);
        let e0 = total_energy(&initial, &params);

        let mut rk4 = initial;
        let mut euler = initial;
        for _ in 0..500 {
            rk4 = Rk4::step(&rk4, &model, 0.01);
            euler = Euler::step(&euler, &model, 0.01);
        }

        let rk4_drift = (total_energy(&rk4, &params) - e0).abs();
        let euler_drift = (total_energy(&euler, &params) - e0).abs();
        assert!(
            rk4_drift < euler_drift,
            "RK4 drift ({}) should be < Euler drift ({})",
            rk4_drift,
            euler_drift
        );
    }

    #[test]
    fn test_non_finite_state_propagates() {
        let params = PendulumParams {
            m1: 0.0,
            ..reference_params()
        };
        let model = DoublePendulum::new(&params);
        let s = Rk4::step(&PendulumState::at_rest(0.3, 0.3), &model, 0.01);
        assert!(!s.is_finite());
        // Further steps neither panic nor recover
        let later = Rk4::step_n(&s, &model, 0.01, 10);
        assert!(!later.is_finite());
    }
}
