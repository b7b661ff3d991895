//! Scrolling background labels.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Points per label set.
pub const POINTS_PER_SET: usize = 10;
/// A point at or left of this x wraps around.
pub const WRAP_THRESHOLD_X: f32 = -150.0;
/// Where a wrapped point re-enters.
pub const WRAP_TO_X: f32 = 2000.0;

const LAYOUT_SEED: u64 = 0;
const MAX_START_X: i32 = 1900;
const MAX_START_Y: i32 = 800;

/// A single labelled point.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationPoint {
    /// Baseline-left position of the label.
    pub position: Vec2,
    /// Text drawn at the position.
    pub text: &'static str,
}

/// The "Background" and "Time" label sets.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationField {
    points: Vec<DecorationPoint>,
}

impl Default for DecorationField {
    fn default() -> Self {
        Self::new()
    }
}

impl DecorationField {
    /// Lays out both sets from a fixed seed, so every run looks the same.
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(LAYOUT_SEED);
        let mut points = Vec::with_capacity(POINTS_PER_SET * 2);
        for text in ["Background", "Time"] {
            for _ in 0..POINTS_PER_SET {
                let x = rng.random_range(0..=MAX_START_X) as f32;
                let y = rng.random_range(0..=MAX_START_Y) as f32;
                points.push(DecorationPoint {
                    position: Vec2::new(x, y),
                    text,
                });
            }
        }
        Self { points }
    }

    /// Builds a field from explicit points.
    pub fn from_points(points: Vec<DecorationPoint>) -> Self {
        Self { points }
    }

    /// Moves every point `dx` pixels left, wrapping points that left the screen.
    pub fn drift(&mut self, dx: f32) {
        for point in &mut self.points {
            point.position.x -= dx;
            if point.position.x <= WRAP_THRESHOLD_X {
                point.position.x = WRAP_TO_X;
            }
        }
    }

    /// All points, the "Background" set first.
    pub fn points(&self) -> &[DecorationPoint] {
        &self.points
    }
}
