//! Keyboard bindings translated into simulation events.
//!
//! | Key     | Action              |
//! |---------|---------------------|
//! | `R`     | reset               |
//! | `T`     | toggle trail        |
//! | `[` `]` | damping -/+ 0.01    |
//! | `-` `=` | gravity -/+ 0.5     |
//! | `1` `2` | upper mass -/+ 1    |
//! | `3` `4` | lower mass -/+ 1    |
//! | `5` `6` | upper length -/+ 10 |
//! | `7` `8` | lower length -/+ 10 |

use pendulum_core::simulation::SimulationEvent;
use pendulum_core::types::PendulumParams;

const DAMPING_STEP: f64 = 0.01;
const GRAVITY_STEP: f64 = 0.5;
const MASS_STEP: f64 = 1.0;
const LENGTH_STEP: f64 = 10.0;

/// Abstract control actions, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reset,
    ToggleTrail,
    DampingDown,
    DampingUp,
    GravityDown,
    GravityUp,
    Mass1Down,
    Mass1Up,
    Mass2Down,
    Mass2Up,
    Length1Down,
    Length1Up,
    Length2Down,
    Length2Up,
}

/// Step `value` down, stopping at one step above zero.
fn step_down(value: f64, step: f64) -> f64 {
    (value - step).max(step)
}

/// Map an action to the event it sends, given the current parameters.
///
/// Damping never goes below zero. Gravity, masses and lengths stop at one
/// step above zero so the keys alone cannot produce a non-positive value.
pub fn event_for(action: Action, params: &PendulumParams) -> SimulationEvent {
    let p = *params;
    let next = match action {
        Action::Reset => return SimulationEvent::Reset,
        Action::ToggleTrail => return SimulationEvent::ToggleTrail,
        Action::DampingDown => PendulumParams {
            d: (p.d - DAMPING_STEP).max(0.0),
            ..p
        },
        Action::DampingUp => PendulumParams {
            d: p.d + DAMPING_STEP,
            ..p
        },
        Action::GravityDown => PendulumParams {
            g: step_down(p.g, GRAVITY_STEP),
            ..p
        },
        Action::GravityUp => PendulumParams {
            g: p.g + GRAVITY_STEP,
            ..p
        },
        Action::Mass1Down => PendulumParams {
            m1: step_down(p.m1, MASS_STEP),
            ..p
        },
        Action::Mass1Up => PendulumParams {
            m1: p.m1 + MASS_STEP,
            ..p
        },
        Action::Mass2Down => PendulumParams {
            m2: step_down(p.m2, MASS_STEP),
            ..p
        },
        Action::Mass2Up => PendulumParams {
            m2: p.m2 + MASS_STEP,
            ..p
        },
        Action::Length1Down => PendulumParams {
            l1: step_down(p.l1, LENGTH_STEP),
            ..p
        },
        Action::Length1Up => PendulumParams {
            l1: p.l1 + LENGTH_STEP,
            ..p
        },
        Action::Length2Down => PendulumParams {
            l2: step_down(p.l2, LENGTH_STEP),
            ..p
        },
        Action::Length2Up => PendulumParams {
            l2: p.l2 + LENGTH_STEP,
            ..p
        },
    };
    SimulationEvent::SetParams(next)
}
