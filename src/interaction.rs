//! Pointer interaction with stickers.
//!
//! Paint order is forward iteration over the sticker list, so hit-testing
//! walks it in reverse: the topmost sticker under the pointer wins.

use crate::sticker::Sticker;

use regex::Regex;
use serde::Deserialize;
use std::ops::Sub;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Handle to a sticker of the current session.
///
/// Stickers are never removed one by one, so the insertion index stays valid
/// until the scene is reset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StickerId(pub(crate) usize);

impl StickerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How a dragged sticker follows the pointer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragMode {
    /// Keeps the point that was grabbed under the pointer.
    #[default]
    PreserveGrip,
    /// Moves the sticker center onto the pointer, jumping by the grip offset
    /// on the first move.
    Snap,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave,
    /// Wheel delta; only its sign matters.
    Wheel(f64),
}

impl FromStr for PointerEvent {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^(down|move|up|leave|wheel)(?:@(-?[\d.]+)(?:,(-?[\d.]+))?)?$")
            .map_err(|_| "invalid event pattern")?;
        let captures = re
            .captures(s.trim())
            .ok_or("event not in form down@X,Y, move@X,Y, up, leave or wheel@DELTA")?;
        let num = |i: usize| {
            captures
                .get(i)
                .map(|m| m.as_str().parse::<f64>().map_err(|_| "invalid number"))
                .transpose()
        };
        let (a, b) = (num(2)?, num(3)?);
        match (&captures[1], a, b) {
            ("down", Some(x), Some(y)) => Ok(Self::Down(Point::new(x, y))),
            ("move", Some(x), Some(y)) => Ok(Self::Move(Point::new(x, y))),
            ("up", None, None) => Ok(Self::Up),
            ("leave", None, None) => Ok(Self::Leave),
            ("wheel", Some(delta), None) => Ok(Self::Wheel(delta)),
            ("down" | "move", _, _) => Err("pointer position must be X,Y"),
            ("wheel", _, _) => Err("wheel takes a single delta"),
            _ => Err("up and leave take no arguments"),
        }
    }
}

/// Pointer state of a scene.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging { sticker: StickerId, grip: Point },
}

impl Interaction {
    pub fn dragged(&self) -> Option<StickerId> {
        match self {
            Self::Idle => None,
            Self::Dragging { sticker, .. } => Some(*sticker),
        }
    }

    /// Grips the topmost sticker under `pt`, if any. Does nothing while
    /// another sticker is already held.
    pub fn press(
        &mut self,
        stickers: &[Sticker],
        canvas: (i32, i32),
        pt: Point,
    ) -> Option<StickerId> {
        if let Self::Dragging { .. } = self {
            return None;
        }
        let index = hit_test(stickers, canvas, pt)?;
        let grip = pt - stickers[index].center(canvas);
        let sticker = StickerId(index);
        *self = Self::Dragging { sticker, grip };
        Some(sticker)
    }

    /// Moves the held sticker to follow `pt`. Returns whether anything moved.
    pub fn drag(
        &self,
        stickers: &mut [Sticker],
        canvas: (i32, i32),
        pt: Point,
        mode: DragMode,
    ) -> bool {
        let Self::Dragging { sticker, grip } = *self else {
            return false;
        };
        if !pt.x.is_finite() || !pt.y.is_finite() {
            return false;
        }
        let Some(s) = stickers.get_mut(sticker.0) else {
            return false;
        };
        let center = match mode {
            DragMode::PreserveGrip => pt - grip,
            DragMode::Snap => pt,
        };
        let (w, h) = (canvas.0.max(1) as f64, canvas.1.max(1) as f64);
        s.set_position(center.x / w, center.y / h);
        true
    }

    /// Lets go of the held sticker. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        let held = self.dragged().is_some();
        *self = Self::Idle;
        held
    }
}

/// Index of the topmost sticker containing `pt`.
pub fn hit_test(stickers: &[Sticker], canvas: (i32, i32), pt: Point) -> Option<usize> {
    stickers.iter().rposition(|s| s.contains(canvas, pt))
}
