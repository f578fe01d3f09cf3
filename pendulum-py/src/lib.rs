//! Python bindings for the pendulum-core simulator.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from pendulum_sim import Simulation, Params
//!
//! sim = Simulation(Params(10.0, 10.0, 150.0, 150.0, 9.81, 0.0))
//! sim.show_trail = True
//!
//! for _ in range(600):
//!     for cmd in sim.frame(900.0, 600.0):
//!         draw(cmd)          # host-side renderer
//!
//! print(sim.state(), sim.energy())
//! ```

use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pendulum_core::config::{ConfigError, PresetLoader};
use pendulum_core::render::{Color, CommandList, DrawCommand, DrawSurface};
use pendulum_core::simulation::{Simulation as CoreSimulation, SimulationEvent};
use pendulum_core::types::{PendulumParams, PendulumState};

fn config_error_to_py(err: ConfigError) -> PyErr {
    match err {
        ConfigError::NotFound(name) => {
            PyFileNotFoundError::new_err(format!("preset not found: {}", name))
        }
        ConfigError::Io(e) => PyIOError::new_err(e.to_string()),
        ConfigError::Parse(e) => PyValueError::new_err(e.to_string()),
    }
}

fn color_tuple(c: Color) -> (f32, f32, f32, f32) {
    (c.r, c.g, c.b, c.a)
}

/// Physical parameters of the pendulum.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Params {
    #[pyo3(get, set)]
    pub m1: f64,
    #[pyo3(get, set)]
    pub m2: f64,
    #[pyo3(get, set)]
    pub l1: f64,
    #[pyo3(get, set)]
    pub l2: f64,
    #[pyo3(get, set)]
    pub g: f64,
    #[pyo3(get, set)]
    pub d: f64,
}

#[pymethods]
impl Params {
    #[new]
    #[pyo3(signature = (m1=10.0, m2=10.0, l1=150.0, l2=150.0, g=9.81, d=0.0))]
    fn new(m1: f64, m2: f64, l1: f64, l2: f64, g: f64, d: f64) -> Self {
        Self { m1, m2, l1, l2, g, d }
    }

    fn __repr__(&self) -> String {
        format!(
            "Params(m1={}, m2={}, l1={}, l2={}, g={}, d={})",
            self.m1, self.m2, self.l1, self.l2, self.g, self.d
        )
    }
}

impl From<PendulumParams> for Params {
    fn from(p: PendulumParams) -> Self {
        Self {
            m1: p.m1,
            m2: p.m2,
            l1: p.l1,
            l2: p.l2,
            g: p.g,
            d: p.d,
        }
    }
}

impl From<Params> for PendulumParams {
    fn from(p: Params) -> Self {
        PendulumParams::new(p.m1, p.m2, p.l1, p.l2, p.g, p.d)
    }
}

/// Main simulation class.
///
/// Wraps the core simulation context plus a recording surface so a Python
/// host can pull each frame's draw calls.
#[pyclass]
pub struct Simulation {
    inner: CoreSimulation,
    surface: CommandList,
}

#[pymethods]
impl Simulation {
    /// Create a new simulation, optionally with custom parameters.
    #[new]
    #[pyo3(signature = (params=None))]
    fn new(params: Option<Params>) -> Self {
        let params = params.map(PendulumParams::from).unwrap_or_default();
        Self {
            inner: CoreSimulation::new(params),
            surface: CommandList::new(0.0, 0.0),
        }
    }

    /// Create a simulation from `<base_path>/<name>.yaml`.
    #[staticmethod]
    fn from_preset(base_path: &str, name: &str) -> PyResult<Self> {
        let config = PresetLoader::new(base_path)
            .load(name)
            .map_err(config_error_to_py)?;
        Ok(Self {
            inner: CoreSimulation::from_config(&config),
            surface: CommandList::new(0.0, 0.0),
        })
    }

    /// Simulated seconds since start or the last reset.
    #[getter]
    fn elapsed(&self) -> f64 {
        self.inner.elapsed()
    }

    /// Number of ticks run so far.
    #[getter]
    fn ticks(&self) -> u64 {
        self.inner.ticks()
    }

    #[getter]
    fn show_trail(&self) -> bool {
        self.inner.show_trail()
    }

    /// Enabling keeps nothing from before; disabling empties the trail.
    #[setter]
    fn set_show_trail(&mut self, show: bool) {
        self.inner.apply(SimulationEvent::SetShowTrail(show));
    }

    /// Current parameters (a copy).
    fn params(&self) -> Params {
        (*self.inner.params()).into()
    }

    /// Replace the parameters; applied on the next tick.
    fn set_params(&mut self, params: Params) {
        self.inner.apply(SimulationEvent::SetParams(params.into()));
    }

    /// Change only the given parameters.
    #[pyo3(signature = (m1=None, m2=None, l1=None, l2=None, g=None, d=None))]
    fn update_params(
        &mut self,
        m1: Option<f64>,
        m2: Option<f64>,
        l1: Option<f64>,
        l2: Option<f64>,
        g: Option<f64>,
        d: Option<f64>,
    ) {
        let current = *self.inner.params();
        let params = PendulumParams {
            m1: m1.unwrap_or(current.m1),
            m2: m2.unwrap_or(current.m2),
            l1: l1.unwrap_or(current.l1),
            l2: l2.unwrap_or(current.l2),
            g: g.unwrap_or(current.g),
            d: d.unwrap_or(current.d),
        };
        self.inner.apply(SimulationEvent::SetParams(params));
    }

    /// State as (theta1, omega1, theta2, omega2).
    fn state(&self) -> (f64, f64, f64, f64) {
        let s = self.inner.state();
        (s.theta1, s.omega1, s.theta2, s.omega2)
    }

    /// Total mechanical energy.
    fn energy(&self) -> f64 {
        self.inner.energy()
    }

    /// Trail points, oldest first.
    fn trail(&self) -> Vec<(f64, f64)> {
        self.inner.trail().iter().map(|p| (p.x, p.y)).collect()
    }

    /// Restore both arms horizontal at rest and clear the trail.
    fn reset(&mut self) {
        self.inner.apply(SimulationEvent::Reset);
    }

    /// Advance the physics by one tick without drawing.
    fn tick(&mut self) {
        self.inner.step();
    }

    /// Run multiple ticks at once (more efficient).
    fn tick_n(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.inner.step();
        }
    }

    /// Run one full tick on a `width` x `height` surface.
    ///
    /// Returns the frame as a list of dicts with a `kind` key of
    /// "clear", "polyline" or "circle".
    fn frame(&mut self, width: f64, height: f64) -> PyResult<Vec<PyObject>> {
        self.surface.resize(width, height);
        self.inner.frame(&mut self.surface);
        let commands = self.surface.drain();

        Python::with_gil(|py| {
            commands
                .into_iter()
                .map(|command| -> PyResult<PyObject> {
                    let dict = PyDict::new(py);
                    dict.set_item("kind", command.kind())?;
                    match command {
                        DrawCommand::Clear(color) => {
                            dict.set_item("color", color_tuple(color))?;
                        }
                        DrawCommand::Polyline {
                            points,
                            color,
                            width,
                        } => {
                            let points: Vec<(f64, f64)> =
                                points.iter().map(|p| (p.x, p.y)).collect();
                            dict.set_item("points", points)?;
                            dict.set_item("color", color_tuple(color))?;
                            dict.set_item("width", width)?;
                        }
                        DrawCommand::Circle {
                            center,
                            radius,
                            color,
                        } => {
                            dict.set_item("center", (center.x, center.y))?;
                            dict.set_item("radius", radius)?;
                            dict.set_item("color", color_tuple(color))?;
                        }
                    }
                    Ok(dict.into())
                })
                .collect()
        })
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            let PendulumState {
                theta1,
                omega1,
                theta2,
                omega2,
            } = *self.inner.state();
            let dict = PyDict::new(py);
            dict.set_item("elapsed", self.inner.elapsed())?;
            dict.set_item("theta1", theta1)?;
            dict.set_item("omega1", omega1)?;
            dict.set_item("theta2", theta2)?;
            dict.set_item("omega2", omega2)?;
            dict.set_item("energy", self.inner.energy())?;
            dict.set_item("trail_len", self.inner.trail().len())?;
            Ok(dict.into())
        })
    }
}

/// Python module definition.
#[pymodule]
fn pendulum_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Params>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
