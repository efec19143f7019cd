//! Skyline paths: one closed jagged silhouette per grid row.
//!
//! Overview
//! - Each row of the block grid becomes a single closed polygon that
//!   starts on the row baseline, places one vertex per column at a height
//!   driven by that cell's brightness fraction, and closes back along the
//!   baseline.
//! - Bright cells sit close to the baseline (small "darkness" height);
//!   dark cells rise toward the 0.9 × block-size cap. The silhouette never
//!   comes closer to the baseline than the 0.1 × block-size floor, so
//!   even a fully bright cell keeps a visible valley.
//! - The last column drops to the baseline to close the silhouette
//!   cleanly, unless the cell carries an end connection into an adjacent
//!   sheet, in which case the height is computed normally so the shape
//!   continues across the page cut.
//! - A per-vertex jitter uniform in `[0, min_height)` gives the
//!   hand-drawn texture. The RNG is caller-supplied, so tests can seed it
//!   or zero the amplitude for exact comparisons.

use crate::blocks::{BlockGrid, Cell};
use crate::sheets::Sheet;
use log::warn;
use rand::Rng;
use serde::Serialize;

/// Geometry knobs for silhouette generation.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SkylineOptions {
    /// Block edge length in output units (pixels or millimetres).
    pub block_size: f32,
    /// Peak cap as a fraction of the block size.
    pub max_height_frac: f32,
    /// Valley floor as a fraction of the block size.
    pub min_height_frac: f32,
    /// Jitter amplitude as a fraction of the block size. Defaults to the
    /// valley floor; set to zero for deterministic output.
    pub jitter_frac: f32,
}

impl SkylineOptions {
    pub fn new(block_size: f32) -> Self {
        Self {
            block_size,
            max_height_frac: 0.9,
            min_height_frac: 0.1,
            jitter_frac: 0.1,
        }
    }

    pub fn with_height_fracs(mut self, max_frac: f32, min_frac: f32) -> Self {
        self.max_height_frac = max_frac;
        self.min_height_frac = min_frac;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter_frac = 0.0;
        self
    }
}

/// Closed silhouette polygon for one grid row.
///
/// Vertex layout: `[0, y_bottom]`, one vertex per column at
/// `[col * block_size, y]`, then `[last_x, y_bottom]` and
/// `[0, y_bottom]` closing along the baseline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkylinePath {
    /// Row index within the grid or sheet this path was built from.
    pub row: usize,
    pub vertices: Vec<[f32; 2]>,
}

impl SkylinePath {
    /// The row baseline this path sits on.
    #[inline]
    pub fn y_bottom(&self) -> f32 {
        self.vertices[0][1]
    }
}

/// Build one path per grid row.
pub fn grid_paths(grid: &BlockGrid, opts: &SkylineOptions, rng: &mut impl Rng) -> Vec<SkylinePath> {
    grid.iter_rows()
        .enumerate()
        .map(|(r, row)| {
            let cells: Vec<Option<Cell>> = row.iter().copied().map(Some).collect();
            build_row_path(r, &cells, opts, rng)
        })
        .collect()
}

/// Build one path per sheet row, resolving end connections against the
/// parent grid. A connection whose index no longer resolves is treated
/// as absent.
pub fn sheet_paths(
    sheet: &Sheet,
    parent: &BlockGrid,
    opts: &SkylineOptions,
    rng: &mut impl Rng,
) -> Vec<SkylinePath> {
    (0..sheet.rows())
        .map(|r| {
            let cells: Vec<Option<Cell>> = sheet
                .row(r)
                .iter()
                .map(|cell| {
                    cell.map(|mut cell| {
                        if let Some((pr, pc)) = cell.end_connection {
                            if parent.get(pr, pc).is_none() {
                                cell.end_connection = None;
                            }
                        }
                        cell
                    })
                })
                .collect();
            build_row_path(r, &cells, opts, rng)
        })
        .collect()
}

/// Build the closed path for a single row of cells.
pub fn build_row_path(
    row_index: usize,
    cells: &[Option<Cell>],
    opts: &SkylineOptions,
    rng: &mut impl Rng,
) -> SkylinePath {
    let y_bottom = opts.block_size * (row_index as f32 + 1.0);
    let max_h = opts.block_size * opts.max_height_frac;
    let min_h = opts.block_size * opts.min_height_frac;
    let jitter_max = opts.block_size * opts.jitter_frac;

    let mut vertices = Vec::with_capacity(cells.len() + 3);
    vertices.push([0.0, y_bottom]);

    let mut last_x = 0.0;
    for (c, cell) in cells.iter().enumerate() {
        let x = c as f32 * opts.block_size;
        last_x = x;
        let y = match cell {
            None => {
                warn!("missing cell at row {row_index} col {c}; using baseline");
                y_bottom
            }
            Some(cell) => {
                let mut y =
                    vertex_height(cell, y_bottom, max_h, min_h, c == cells.len() - 1);
                if jitter_max > 0.0 {
                    y -= rng.gen::<f32>() * jitter_max;
                }
                y
            }
        };
        vertices.push([x, y]);
    }

    vertices.push([last_x, y_bottom]);
    vertices.push([0.0, y_bottom]);

    SkylinePath {
        row: row_index,
        vertices,
    }
}

/// Pre-jitter vertex height for one cell.
fn vertex_height(cell: &Cell, y_bottom: f32, max_h: f32, min_h: f32, is_last: bool) -> f32 {
    // last column without a continuation drops fully to the baseline
    if is_last && cell.end_connection.is_none() {
        return y_bottom;
    }

    let peak = max_h * cell.fraction;
    let darkness = (max_h - peak).max(min_h);

    if cell.fraction > 0.0 {
        y_bottom - darkness
    } else if cell.alpha > 0 {
        y_bottom - min_h
    } else {
        y_bottom - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const BLOCK: f32 = 10.0;

    fn opts() -> SkylineOptions {
        SkylineOptions::new(BLOCK).without_jitter()
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn cell(fraction: f32, alpha: u8) -> Option<Cell> {
        Some(Cell {
            x: 0,
            y: 0,
            brightness: fraction * 255.0,
            alpha,
            fraction,
            end_connection: None,
        })
    }

    #[test]
    fn full_brightness_clamps_to_the_valley_floor() {
        let cells = vec![cell(1.0, 255); 4];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        // interior columns: darkness clamps to min_height
        let min_h = BLOCK * 0.1;
        assert_eq!(path.vertices[2][1], BLOCK - min_h);
        assert_eq!(path.vertices[3][1], BLOCK - min_h);
    }

    #[test]
    fn darkness_height_tracks_the_fraction() {
        let cells = vec![cell(0.5, 255), cell(0.5, 255), cell(0.5, 255)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        // peak = 9 * 0.5 = 4.5, darkness = 9 - 4.5 = 4.5
        assert!((path.vertices[1][1] - (BLOCK - 4.5)).abs() < 1e-5);
    }

    #[test]
    fn opaque_black_sits_on_the_low_plateau() {
        let cells = vec![cell(0.0, 255), cell(0.0, 255)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        assert_eq!(path.vertices[1][1], BLOCK - BLOCK * 0.1);
    }

    #[test]
    fn transparent_cell_is_near_baseline() {
        let cells = vec![cell(0.0, 0), cell(1.0, 255)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        assert_eq!(path.vertices[1][1], BLOCK - 1.0);
    }

    #[test]
    fn last_column_drops_to_baseline_without_connection() {
        let cells = vec![cell(1.0, 255), cell(1.0, 255)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        assert_eq!(path.vertices[2][1], BLOCK);
    }

    #[test]
    fn connection_suppresses_the_baseline_drop() {
        let mut last = cell(1.0, 255).unwrap();
        last.end_connection = Some((0, 2));
        let cells = vec![cell(1.0, 255), Some(last)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        assert_eq!(path.vertices[2][1], BLOCK - BLOCK * 0.1);
    }

    #[test]
    fn missing_cell_substitutes_the_baseline() {
        let cells = vec![cell(1.0, 255), None, cell(1.0, 255)];
        let path = build_row_path(0, &cells, &opts(), &mut rng());
        assert_eq!(path.vertices[2][1], BLOCK);
    }

    #[test]
    fn path_closes_along_the_baseline() {
        let cells = vec![cell(0.3, 255); 5];
        let path = build_row_path(2, &cells, &opts(), &mut rng());
        let y_bottom = BLOCK * 3.0;
        assert_eq!(path.vertices.len(), 5 + 3);
        assert_eq!(path.vertices[0], [0.0, y_bottom]);
        let n = path.vertices.len();
        assert_eq!(path.vertices[n - 2], [4.0 * BLOCK, y_bottom]);
        assert_eq!(path.vertices[n - 1], [0.0, y_bottom]);
    }

    #[test]
    fn jitter_stays_within_the_valley_floor() {
        let cells = vec![cell(0.5, 255); 20];
        let opts = SkylineOptions::new(BLOCK);
        let mut rng = rng();
        let path = build_row_path(0, &cells, &opts, &mut rng);
        let expected = BLOCK - 4.5;
        let min_h = BLOCK * 0.1;
        for v in &path.vertices[1..=19] {
            assert!(
                v[1] <= expected && v[1] > expected - min_h,
                "jittered vertex {} outside [{}, {})",
                v[1],
                expected - min_h,
                expected
            );
        }
    }

    #[test]
    fn seeded_rng_reproduces_the_same_path() {
        let cells = vec![cell(0.4, 255); 8];
        let opts = SkylineOptions::new(BLOCK);
        let a = build_row_path(0, &cells, &opts, &mut SmallRng::seed_from_u64(7));
        let b = build_row_path(0, &cells, &opts, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
