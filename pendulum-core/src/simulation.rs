//! Simulation context and per-frame loop.
//!
//! [`Simulation`] owns everything that changes while the pendulum runs: the
//! state, the parameter snapshot, the trail and the trail toggle. A host
//! drives it once per display frame with [`Simulation::frame`] and feeds
//! external input through [`Simulation::apply`].
//!
//! ## Tick
//!
//! ```text
//! events ──► params / reset / trail toggle
//!               │
//!               ▼
//! step():   substeps × RK4(dt = tick_duration / substeps)
//!               │
//!               ▼
//! render(): project ─► trail push/clear ─► draw_frame(surface)
//! ```
//!
//! There is no pause state. A state that has gone non-finite keeps being
//! stepped and drawn; only a reset brings it back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::dynamics::{self, DoublePendulum};
use crate::integrator::Rk4;
use crate::render::{draw_frame, DrawSurface, Projection, Style};
use crate::trail::Trail;
use crate::types::{constants, PendulumParams, PendulumState, Point2};

/// Sub-stepping of one rendered tick.
///
/// The defaults (10 × 0.01 s) have no accuracy derivation behind them;
/// retune against the energy drift of an undamped run if needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stepping {
    /// Integrator steps per tick
    pub substeps: usize,
    /// Simulated seconds per tick
    pub tick_duration: f64,
}

impl Stepping {
    /// Integrator time step
    pub fn dt(&self) -> f64 {
        self.tick_duration / self.substeps as f64
    }

    /// False when a tick would not move the state forward (no sub-steps,
    /// or a tick length that is not a positive finite number).
    pub fn is_usable(&self) -> bool {
        self.substeps > 0 && self.tick_duration.is_finite() && self.tick_duration > 0.0
    }
}

impl Default for Stepping {
    fn default() -> Self {
        Self {
            substeps: constants::SUBSTEPS,
            tick_duration: constants::TICK_DURATION,
        }
    }
}

/// External input delivered to the simulation between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationEvent {
    /// Replace the parameter snapshot
    SetParams(PendulumParams),
    /// Enable or disable the trail; disabling empties it
    SetShowTrail(bool),
    ToggleTrail,
    /// Restore the initial condition and empty the trail
    Reset,
}

/// The owned simulation context.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: PendulumState,
    params: PendulumParams,
    stepping: Stepping,
    trail: Trail,
    /// Scratch copy of the trail handed to the surface each frame
    trail_points: Vec<Point2>,
    show_trail: bool,
    style: Style,
    elapsed: f64,
    ticks: u64,
    reported_non_finite: bool,
}

impl Simulation {
    pub fn new(params: PendulumParams) -> Self {
        Self {
            state: PendulumState::initial(),
            params,
            stepping: Stepping::default(),
            trail: Trail::default(),
            trail_points: Vec::with_capacity(constants::TRAIL_CAPACITY),
            show_trail: true,
            style: Style::default(),
            elapsed: 0.0,
            ticks: 0,
            reported_non_finite: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let display = &config.display;
        let style = Style {
            pivot_x: display.pivot_x,
            pivot_y: display.pivot_y,
            ..Style::default()
        };

        Self {
            stepping: config.stepping,
            show_trail: display.show_trail,
            style,
            ..Self::new(config.params)
        }
    }

    /// Override the starting state (the reset state stays fixed).
    pub fn with_state(mut self, state: PendulumState) -> Self {
        self.state = state;
        self
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance the physics by one tick worth of sub-steps.
    pub fn step(&mut self) {
        let model = DoublePendulum::new(&self.params);
        self.state = Rk4::step_n(
            &self.state,
            &model,
            self.stepping.dt(),
            self.stepping.substeps,
        );
        self.elapsed += self.stepping.tick_duration;
        self.ticks += 1;

        if !self.reported_non_finite && !self.state.is_finite() {
            warn!(
                tick = self.ticks,
                state = ?self.state,
                params = ?self.params,
                "pendulum state became non-finite"
            );
            self.reported_non_finite = true;
        }
    }

    /// Project the current state, update the trail and draw.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let (width, height) = surface.size();
        let pivot = self.style.pivot(width, height);
        let projection = Projection::from_state(&self.state, &self.params, pivot);

        if self.show_trail {
            self.trail.push(projection.bob2);
            self.trail.copy_to(&mut self.trail_points);
        } else {
            self.trail.clear();
            self.trail_points.clear();
        }

        let trail = self.show_trail.then_some(self.trail_points.as_slice());
        draw_frame(surface, &projection, trail, &self.params, &self.style);
    }

    /// One full tick: physics, then drawing.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn apply(&mut self, event: SimulationEvent) {
        match event {
            SimulationEvent::SetParams(params) => self.set_params(params),
            SimulationEvent::SetShowTrail(show) => self.set_show_trail(show),
            SimulationEvent::ToggleTrail => self.set_show_trail(!self.show_trail),
            SimulationEvent::Reset => self.reset(),
        }
    }

    /// Restore the initial condition and empty the trail. Parameters are kept.
    pub fn reset(&mut self) {
        self.state = PendulumState::initial();
        self.trail.clear();
        self.elapsed = 0.0;
        self.reported_non_finite = false;
        debug!("simulation reset");
    }

    /// Replace the parameter snapshot; takes effect on the next step.
    pub fn set_params(&mut self, params: PendulumParams) {
        let suspicious = params.out_of_range();
        if !suspicious.is_empty() {
            warn!(fields = ?suspicious, "parameters outside expected range");
        }
        debug!(?params, "parameters updated");
        self.params = params;
    }

    pub fn set_show_trail(&mut self, show: bool) {
        self.show_trail = show;
        if !show {
            self.trail.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    pub fn params(&self) -> &PendulumParams {
        &self.params
    }

    pub fn stepping(&self) -> &Stepping {
        &self.stepping
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn show_trail(&self) -> bool {
        self.show_trail
    }

    /// Simulated seconds since start or the last reset
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ticks since start (not cleared by reset)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total mechanical energy of the current state
    pub fn energy(&self) -> f64 {
        dynamics::total_energy(&self.state, &self.params)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(PendulumParams::default())
    }
}

// =============================================================================
// Shared handle
// =============================================================================

/// Thread-safe handle for hosts that deliver input on another thread.
///
/// Every access goes through one mutex, so a reader never sees a
/// half-updated state or a trail mid-eviction.
#[derive(Debug, Clone, Default)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    /// Lock the context. A panic on another thread does not stop the
    /// simulation; the last written state is used as-is.
    pub fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply(&self, event: SimulationEvent) {
        self.lock().apply(event);
    }

    pub fn frame<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        self.lock().frame(surface);
    }

    /// Copy of the current state
    pub fn state(&self) -> PendulumState {
        *self.lock().state()
    }
}

// =============================================================================
// Tests
// =============================================================================
