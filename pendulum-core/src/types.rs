//! Core types for the pendulum simulation.
//!
//! Units follow the drawing surface rather than SI:
//! - Angles: radians, measured from the downward vertical
//! - Angular velocity: radians per simulated second
//! - Lengths: drawing-surface units (pixels)
//! - Masses: arbitrary units, also used as the rendered bob radius

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

// =============================================================================
// Point2 - drawing-surface coordinate
// =============================================================================

/// A point on the drawing surface.
///
/// Coordinate system:
/// - X: horizontal, positive to the right
/// - Y: vertical, positive downward (screen convention)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f64 {
        (*self - *other).length()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Pendulum State
// =============================================================================

/// Instantaneous configuration of the double pendulum.
///
/// `theta2` is the absolute angle of the second link, not its angle
/// relative to the first. Angles are never wrapped; the equations of
/// motion only see them through sin/cos.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    pub theta1: f64,
    pub omega1: f64,
    pub theta2: f64,
    pub omega2: f64,
}

impl PendulumState {
    pub const fn new(theta1: f64, omega1: f64, theta2: f64, omega2: f64) -> Self {
        Self {
            theta1,
            omega1,
            theta2,
            omega2,
        }
    }

    /// Both arms horizontal, at rest. This is the state restored by a reset.
    pub const fn initial() -> Self {
        Self::at_rest(
            std::f64::consts::FRAC_PI_2,
            std::f64::consts::FRAC_PI_2,
        )
    }

    /// Pendulum held at the given angles with zero velocity
    pub const fn at_rest(theta1: f64, theta2: f64) -> Self {
        Self::new(theta1, 0.0, theta2, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.omega1.is_finite()
            && self.theta2.is_finite()
            && self.omega2.is_finite()
    }
}

impl Default for PendulumState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Time derivative of a [`PendulumState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivative {
    pub dtheta1: f64,
    pub domega1: f64,
    pub dtheta2: f64,
    pub domega2: f64,
}

impl Derivative {
    pub const ZERO: Derivative = Derivative {
        dtheta1: 0.0,
        domega1: 0.0,
        dtheta2: 0.0,
        domega2: 0.0,
    };
}

impl Add for Derivative {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            dtheta1: self.dtheta1 + other.dtheta1,
            domega1: self.domega1 + other.domega1,
            dtheta2: self.dtheta2 + other.dtheta2,
            domega2: self.domega2 + other.domega2,
        }
    }
}

impl Mul<f64> for Derivative {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            dtheta1: self.dtheta1 * scalar,
            domega1: self.domega1 * scalar,
            dtheta2: self.dtheta2 * scalar,
            domega2: self.domega2 * scalar,
        }
    }
}

/// Advancing a state along a scaled derivative (`s + k * h`).
impl Add<Derivative> for PendulumState {
    type Output = Self;
    fn add(self, delta: Derivative) -> Self {
        Self {
            theta1: self.theta1 + delta.dtheta1,
            omega1: self.omega1 + delta.domega1,
            theta2: self.theta2 + delta.dtheta2,
            omega2: self.omega2 + delta.domega2,
        }
    }
}

// =============================================================================
// Physical Parameters
// =============================================================================

/// Physical constants of the pendulum, read on every derivative evaluation.
///
/// Expected ranges: everything strictly positive except `d`, which may be
/// zero (undamped). Values outside these ranges are accepted as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumParams {
    /// Mass of the first bob (also its drawn radius)
    pub m1: f64,
    /// Mass of the second bob (also its drawn radius)
    pub m2: f64,
    /// Length of the first link
    pub l1: f64,
    /// Length of the second link
    pub l2: f64,
    /// Gravitational acceleration
    pub g: f64,
    /// Linear damping applied to both angular velocities
    pub d: f64,
}

impl PendulumParams {
    pub const fn new(m1: f64, m2: f64, l1: f64, l2: f64, g: f64, d: f64) -> Self {
        Self {
            m1,
            m2,
            l1,
            l2,
            g,
            d,
        }
    }

    /// Names of fields outside their expected range.
    ///
    /// Used for diagnostics only; the simulation runs with whatever it is given.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let positive = [
            ("m1", self.m1),
            ("m2", self.m2),
            ("l1", self.l1),
            ("l2", self.l2),
            ("g", self.g),
        ];
        let mut names: Vec<&'static str> = positive
            .iter()
            .filter(|(_, v)| !(*v > 0.0))
            .map(|(name, _)| *name)
            .collect();
        if !(self.d >= 0.0) {
            names.push("d");
        }
        names
    }
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self::new(
            constants::DEFAULT_MASS,
            constants::DEFAULT_MASS,
            constants::DEFAULT_LENGTH,
            constants::DEFAULT_LENGTH,
            constants::GRAVITY,
            0.0,
        )
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Defaults used by the simulation loop and the presets.
pub mod constants {
    /// Gravitational acceleration in surface units per second squared
    pub const GRAVITY: f64 = 9.81;

    pub const DEFAULT_MASS: f64 = 10.0;

    pub const DEFAULT_LENGTH: f64 = 150.0;

    /// Integrator sub-steps per rendered tick
    pub const SUBSTEPS: usize = 10;

    /// Simulated seconds advanced per rendered tick
    pub const TICK_DURATION: f64 = 0.1;

    /// Maximum number of points kept in the trail
    pub const TRAIL_CAPACITY: usize = 500;

    /// Pivot position as a fraction of the surface width
    pub const PIVOT_X_FRACTION: f64 = 0.5;

    /// Pivot position as a fraction of the surface height
    pub const PIVOT_Y_FRACTION: f64 = 1.0 / 3.0;
}

// =============================================================================
// Tests
// =============================================================================
