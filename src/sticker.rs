//! Stickers placed over a composite.

use crate::interaction::Point;

use rand::Rng;
use std::ops::RangeInclusive;

/// Sizes never go below this many pixels.
pub const MIN_SIZE: f64 = 20.0;
pub const DEFAULT_SIZE: f64 = 64.0;
/// Size change of one wheel tick.
pub const RESIZE_STEP: f64 = 5.0;
/// Range new stickers are dropped in, keeping them clear of the edges.
pub const SPAWN_RANGE: RangeInclusive<f64> = 0.1..=0.9;

/// A glyph positioned on the composite.
///
/// `x` and `y` are fractions of the whole canvas, so a sticker keeps its
/// relative place when the canvas size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    glyph: String,
    x: f64,
    y: f64,
    size: f64,
}

impl Sticker {
    pub fn new(glyph: impl Into<String>, x: f64, y: f64) -> Self {
        let mut sticker = Self {
            glyph: glyph.into(),
            x: 0.0,
            y: 0.0,
            size: DEFAULT_SIZE,
        };
        sticker.set_position(x, y);
        sticker
    }

    /// Creates a sticker at a random spot inside [`SPAWN_RANGE`].
    pub fn spawn<R: Rng + ?Sized>(glyph: impl Into<String>, rng: &mut R) -> Self {
        let x = rng.gen_range(SPAWN_RANGE);
        let y = rng.gen_range(SPAWN_RANGE);
        Self::new(glyph, x, y)
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Moves the center, clamped to the canvas. Non-finite coordinates keep
    /// their current value.
    pub fn set_position(&mut self, x: f64, y: f64) {
        if x.is_finite() {
            self.x = x.clamp(0.0, 1.0);
        }
        if y.is_finite() {
            self.y = y.clamp(0.0, 1.0);
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size.max(MIN_SIZE);
    }

    /// Grows by `steps` wheel ticks, or shrinks when `steps` is negative.
    pub fn grow(&mut self, steps: i32) {
        self.set_size(self.size + steps as f64 * RESIZE_STEP);
    }

    /// Pixel center on a canvas of the given size.
    pub fn center(&self, canvas: (i32, i32)) -> Point {
        Point::new(self.x * canvas.0 as f64, self.y * canvas.1 as f64)
    }

    /// Whether `pt` falls in the square of side `size` around the center.
    pub fn contains(&self, canvas: (i32, i32), pt: Point) -> bool {
        let c = self.center(canvas);
        let half = self.size / 2.0;
        (pt.x - c.x).abs() < half && (pt.y - c.y).abs() < half
    }
}
