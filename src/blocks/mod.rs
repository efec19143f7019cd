//! Block grid: one brightness/alpha/fraction cell per resampled pixel.
//!
//! Each pixel of the sampler output becomes exactly one [`Cell`]. Pixels
//! with any transparency collapse to fully transparent cells; everything
//! else is fully opaque with a perceptual-luma brightness. The grid is
//! row-major with a uniform column count, validated at construction.

use crate::image::RgbaBuffer;
use serde::{Deserialize, Serialize};

/// One sample of the block grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Grid column, matching the resampled pixel grid.
    pub x: usize,
    /// Grid row.
    pub y: usize,
    /// Perceptual luminance in `[0, 255]`; zero for transparent cells.
    pub brightness: f32,
    /// Hard-binarized alpha: 0 or 255.
    pub alpha: u8,
    /// `brightness / 255`, the silhouette height driver.
    pub fraction: f32,
    /// Parent-grid `(row, col)` of the cell immediately to the right of a
    /// sheet cut. Set only on the last column of a sheet window; resolved
    /// lazily against the parent grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_connection: Option<(usize, usize)>,
}

impl Cell {
    /// Map an RGBA pixel at grid position (x, y) to a cell.
    ///
    /// Any source alpha below 255 is treated as fully transparent.
    /// Brightness is assigned before the fraction is derived, so the
    /// first cell is as well-defined as every other one.
    pub fn from_rgba(x: usize, y: usize, px: [u8; 4]) -> Self {
        let [r, g, b, a] = px;
        if a < 255 {
            return Self {
                x,
                y,
                brightness: 0.0,
                alpha: 0,
                fraction: 0.0,
                end_connection: None,
            };
        }
        let brightness = r as f32 * 0.2126 + g as f32 * 0.7152 + b as f32 * 0.0722;
        Self {
            x,
            y,
            brightness,
            alpha: 255,
            fraction: brightness / 255.0,
            end_connection: None,
        }
    }
}

/// Structural failures when assembling a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A row's column count differs from the first row's.
    MalformedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// No cells at all (e.g. a degenerate crop upstream).
    Empty,
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::MalformedGrid {
                row,
                expected,
                found,
            } => write!(
                f,
                "malformed grid: row {row} has {found} columns, expected {expected}"
            ),
            GridError::Empty => write!(f, "empty grid"),
        }
    }
}

impl std::error::Error for GridError {}

/// Rectangular grid of cells in row-major order.
///
/// The first row's column count defines the width for all rows; the
/// constructors refuse anything else, so downstream path generation never
/// sees a ragged grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl BlockGrid {
    /// Assemble a grid from per-row cell vectors, validating that every
    /// row matches the first row's column count.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::MalformedGrid {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        let row_count = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col), if inside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        (row < self.rows && col < self.cols).then(|| &self.cells[row * self.cols + col])
    }

    /// Borrow one full row.
    #[inline]
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }
}

/// Build the block grid from a sampled RGBA buffer, one cell per pixel.
pub fn build_grid(buffer: &RgbaBuffer) -> Result<BlockGrid, GridError> {
    if buffer.is_empty() {
        return Err(GridError::Empty);
    }
    let mut rows = Vec::with_capacity(buffer.h);
    for y in 0..buffer.h {
        let mut row = Vec::with_capacity(buffer.w);
        for x in 0..buffer.w {
            row.push(Cell::from_rgba(x, y, buffer.get(x, y)));
        }
        rows.push(row);
    }
    BlockGrid::from_rows(rows)
}
