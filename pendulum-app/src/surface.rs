//! macroquad implementation of the core drawing surface.

use macroquad::prelude::{clear_background, draw_circle, draw_line, Color as MqColor};
use pendulum_core::render::{Color, DrawSurface};
use pendulum_core::types::Point2;

/// Draws straight into the current macroquad frame.
pub struct MacroquadSurface {
    width: f64,
    height: f64,
}

impl MacroquadSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

fn to_mq(color: Color) -> MqColor {
    MqColor::new(color.r, color.g, color.b, color.a)
}

impl DrawSurface for MacroquadSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, color: Color) {
        clear_background(to_mq(color));
    }

    fn stroke_polyline(&mut self, points: &[Point2], color: Color, width: f64) {
        let color = to_mq(color);
        for pair in points.windows(2) {
            draw_line(
                pair[0].x as f32,
                pair[0].y as f32,
                pair[1].x as f32,
                pair[1].y as f32,
                width as f32,
                color,
            );
        }
    }

    fn fill_circle(&mut self, center: Point2, radius: f64, color: Color) {
        draw_circle(center.x as f32, center.y as f32, radius as f32, to_mq(color));
    }
}
