//! Projection of the pendulum onto a 2D drawing surface.
//!
//! The core never talks to a graphics backend directly. Anything that can
//! clear itself, stroke a polyline and fill a circle implements
//! [`DrawSurface`]; the desktop viewer wraps macroquad, the Python bindings
//! and the tests use the recording [`CommandList`].
//!
//! ## Projection
//!
//! ```text
//! x1 = pivot_x + l1·sin θ1      y1 = pivot_y + l1·cos θ1
//! x2 = x1 + l2·sin θ2           y2 = y1 + l2·cos θ2
//! ```
//!
//! Surface Y grows downward, so θ = 0 hangs straight down from the pivot.

use crate::types::{constants, PendulumParams, PendulumState, Point2};

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Capability set the renderer draws through.
pub trait DrawSurface {
    /// Current `(width, height)` in surface units
    fn size(&self) -> (f64, f64);

    fn resize(&mut self, width: f64, height: f64);

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Stroke connected segments through `points` in order.
    fn stroke_polyline(&mut self, points: &[Point2], color: Color, width: f64);

    fn fill_circle(&mut self, center: Point2, radius: f64, color: Color);
}

/// Colors, stroke widths and pivot placement for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background: Color,
    pub trail_color: Color,
    pub trail_width: f64,
    pub arm_color: Color,
    pub arm_width: f64,
    pub bob_color: Color,
    /// Pivot X as a fraction of the surface width
    pub pivot_x: f64,
    /// Pivot Y as a fraction of the surface height
    pub pivot_y: f64,
}

impl Style {
    pub fn pivot(&self, width: f64, height: f64) -> Point2 {
        Point2::new(width * self.pivot_x, height * self.pivot_y)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0x0f, 0x17, 0x2a),
            trail_color: Color::from_rgb8(56, 189, 248).with_alpha(0.5),
            trail_width: 2.0,
            arm_color: Color::from_rgb8(0xe2, 0xe8, 0xf0),
            arm_width: 4.0,
            bob_color: Color::from_rgb8(0x38, 0xbd, 0xf8),
            pivot_x: constants::PIVOT_X_FRACTION,
            pivot_y: constants::PIVOT_Y_FRACTION,
        }
    }
}

/// Surface positions of the pivot and both bobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub pivot: Point2,
    pub bob1: Point2,
    pub bob2: Point2,
}

impl Projection {
    pub fn from_state(state: &PendulumState, params: &PendulumParams, pivot: Point2) -> Self {
        let bob1 = Point2::new(
            pivot.x + params.l1 * state.theta1.sin(),
            pivot.y + params.l1 * state.theta1.cos(),
        );
        let bob2 = Point2::new(
            bob1.x + params.l2 * state.theta2.sin(),
            bob1.y + params.l2 * state.theta2.cos(),
        );
        Self { pivot, bob1, bob2 }
    }

    /// The rigid arms as one polyline: pivot, first bob, second bob.
    pub fn arms(&self) -> [Point2; 3] {
        [self.pivot, self.bob1, self.bob2]
    }
}

/// Draw one frame: background, optional trail, arms, bobs.
///
/// The trail points are drawn as given, oldest first; updating them is the
/// caller's job.
pub fn draw_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    projection: &Projection,
    trail: Option<&[Point2]>,
    params: &PendulumParams,
    style: &Style,
) {
    surface.clear(style.background);

    if let Some(points) = trail {
        if points.len() >= 2 {
            surface.stroke_polyline(points, style.trail_color, style.trail_width);
        }
    }

    surface.stroke_polyline(&projection.arms(), style.arm_color, style.arm_width);
    surface.fill_circle(projection.bob1, params.m1, style.bob_color);
    surface.fill_circle(projection.bob2, params.m2, style.bob_color);
}

// =============================================================================
// Recording surface
// =============================================================================

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Polyline {
        points: Vec<Point2>,
        color: Color,
        width: f64,
    },
    Circle {
        center: Point2,
        radius: f64,
        color: Color,
    },
}

impl DrawCommand {
    /// Short name of the drawing call, as exported to Python hosts.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear(_) => "clear",
            DrawCommand::Polyline { .. } => "polyline",
            DrawCommand::Circle { .. } => "circle",
        }
    }
}

/// Surface that records commands instead of rasterizing them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for CommandList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, color: Color) {
        // Everything before a clear is invisible anyway
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_polyline(&mut self, points: &[Point2], color: Color, width: f64) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
