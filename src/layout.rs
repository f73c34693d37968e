//! Grid layouts and the pixel geometry of a composite.
//!
//! Photo cells are laid out row-major and framed by `padding` on every edge
//! and between every pair of cells. Both photos and stickers are positioned
//! through [`Geometry`], so the two always agree on where a cell is.

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Named grid configuration chosen before the shoot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    Grid1x4,
    Grid2x3,
    Grid2x2,
    #[default]
    Default,
}

/// Column and row counts of a layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub photo_count: usize,
}

impl Layout {
    pub const ALL: [Layout; 4] = [
        Layout::Grid1x4,
        Layout::Grid2x3,
        Layout::Grid2x2,
        Layout::Default,
    ];

    /// Parses a layout identifier. Both `grid-2x3` and `2x3` are accepted;
    /// anything unrecognised is the default layout.
    pub fn parse(s: impl AsRef<str>) -> Self {
        let s = s.as_ref().trim();
        let s = s.strip_prefix("grid-").unwrap_or(s);
        match s {
            "1x4" => Self::Grid1x4,
            "2x3" => Self::Grid2x3,
            "2x2" => Self::Grid2x2,
            _ => Self::Default,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid1x4 => "grid-1x4",
            Self::Grid2x3 => "grid-2x3",
            Self::Grid2x2 => "grid-2x2",
            Self::Default => "default",
        }
    }

    pub fn grid(&self) -> Grid {
        let (columns, rows) = match self {
            Self::Grid1x4 => (1, 4),
            Self::Grid2x3 => (2, 3),
            Self::Grid2x2 | Self::Default => (2, 2),
        };
        Grid {
            columns,
            rows,
            photo_count: columns * rows,
        }
    }

    pub fn photo_count(&self) -> usize {
        self.grid().photo_count
    }
}

impl FromStr for Layout {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Resolves a layout identifier to its grid, falling back to 2×2.
pub fn resolve(name: impl AsRef<str>) -> Grid {
    Layout::parse(name).grid()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
        }
    }
}

/// Pixel geometry of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub columns: usize,
    pub rows: usize,
    pub cell: CellSize,
    pub padding: i32,
}

impl Geometry {
    pub fn new(grid: Grid, cell: CellSize, padding: i32) -> Self {
        Self {
            columns: grid.columns.max(1),
            rows: grid.rows.max(1),
            cell,
            padding,
        }
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        let (cols, rows) = (self.columns as i32, self.rows as i32);
        (
            cols * self.cell.width + (cols + 1) * self.padding,
            rows * self.cell.height + (rows + 1) * self.padding,
        )
    }

    /// Top-left pixel of cell `index`, counted row-major.
    pub fn cell_origin(&self, index: usize) -> (i32, i32) {
        let col = (index % self.columns) as i32;
        let row = (index / self.columns) as i32;
        (
            col * self.cell.width + (col + 1) * self.padding,
            row * self.cell.height + (row + 1) * self.padding,
        )
    }
}
