//! Bounded trajectory of the second bob.
//!
//! Points are kept oldest-first. Pushing past capacity evicts from the
//! front, so the trail always holds the most recent `capacity` positions.

use std::collections::VecDeque;

use crate::types::{constants, Point2};

/// Fixed-capacity FIFO of projected bob positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Point2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest one if the trail is full.
    pub fn push(&mut self, point: Point2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Point2> {
        self.points.iter()
    }

    /// Copy the points into `dest`, oldest first (reuses its allocation).
    pub fn copy_to(&self, dest: &mut Vec<Point2>) {
        dest.clear();
        dest.extend(self.points.iter().copied());
    }

    pub fn newest(&self) -> Option<Point2> {
        self.points.back().copied()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(constants::TRAIL_CAPACITY)
    }
}

// =============================================================================
// Tests
// =============================================================================
