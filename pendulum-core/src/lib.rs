//! # Pendulum Core
//!
//! A real-time simulator for the planar double pendulum.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (state, derivative, parameters, points)
//! - `dynamics`: Equations of motion and energy
//! - `integrator`: Numerical integration (RK4)
//! - `trail`: Bounded trajectory of the second bob
//! - `render`: Projection and the drawing-surface abstraction
//! - `simulation`: Owned simulation context and per-frame loop
//! - `config`: YAML preset loader

pub mod config;
pub mod dynamics;
pub mod integrator;
pub mod render;
pub mod simulation;
pub mod trail;
pub mod types;

pub use config::{ConfigError, PresetLoader, SimulationConfig};
pub use render::{Color, CommandList, DrawCommand, DrawSurface, Style};
pub use simulation::{SharedSimulation, Simulation, SimulationEvent, Stepping};
pub use types::{PendulumParams, PendulumState, Point2};
