//! Sheet partitioning: page-sized tiles of the block grid.
//!
//! A sheet is a rectangular window of the grid sized so that
//! `rows_per_sheet × block_size` fits the physical page height (and the
//! same for columns/width). Sheets are enumerated in row-major reading
//! order, which is also the page order of the printed output. Cells are
//! copied by value; the only cross-sheet state is the `end_connection`
//! index pair on a sheet's rightmost column, which lets silhouettes
//! continue across the cut instead of dropping to the baseline.

use crate::blocks::{BlockGrid, Cell};
use serde::Serialize;

/// Physical page in millimetres. The default is the A5 portrait card
/// stock the product prints on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    pub width_mm: u32,
    pub height_mm: u32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width_mm: 148,
            height_mm: 210,
        }
    }
}

/// Derived tiling counts for a grid/page/block-size combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub rows_per_sheet: usize,
    pub cols_per_sheet: usize,
    pub sheets_across: usize,
    pub sheets_down: usize,
}

impl SheetLayout {
    pub fn sheet_count(&self) -> usize {
        self.sheets_across * self.sheets_down
    }
}

/// One page-sized window of the parent grid.
///
/// Window bounds are inclusive, 0-indexed, and clipped at the grid edges,
/// so trailing sheets may be smaller than a full page. Cells are stored
/// as `Option` to keep absent positions representable; the partitioner
/// itself fills every position.
#[derive(Clone, Debug, Serialize)]
pub struct Sheet {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
    rows: usize,
    cols: usize,
    #[serde(skip)]
    cells: Vec<Option<Cell>>,
}

impl Sheet {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at sheet-local (row, col), if present.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col].as_ref()
        } else {
            None
        }
    }

    /// Borrow one sheet-local row.
    #[inline]
    pub fn row(&self, row: usize) -> &[Option<Cell>] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }
}

/// Compute the tiling counts without materializing sheets.
pub fn sheet_layout(grid: &BlockGrid, block_size: u32, page: PageSpec) -> SheetLayout {
    assert!(block_size > 0, "block size must be positive");
    // a block larger than the page still gets one row/col per sheet
    let rows_per_sheet = ((page.height_mm / block_size) as usize).max(1);
    let cols_per_sheet = ((page.width_mm / block_size) as usize).max(1);
    SheetLayout {
        rows_per_sheet,
        cols_per_sheet,
        sheets_across: grid.cols().div_ceil(cols_per_sheet),
        sheets_down: grid.rows().div_ceil(rows_per_sheet),
    }
}

/// Tile the grid into page-sized sheets in row-major reading order.
///
/// Every sheet is fully populated from the parent grid. Cells on a
/// sheet's rightmost column point at the parent cell immediately to
/// their right when one exists, i.e. on every sheet that is not the
/// rightmost in its band.
pub fn partition(grid: &BlockGrid, block_size: u32, page: PageSpec) -> Vec<Sheet> {
    let layout = sheet_layout(grid, block_size, page);
    let mut sheets = Vec::with_capacity(layout.sheet_count());

    for sr in 0..layout.sheets_down {
        for sc in 0..layout.sheets_across {
            let start_row = sr * layout.rows_per_sheet;
            let end_row = (start_row + layout.rows_per_sheet - 1).min(grid.rows() - 1);
            let start_col = sc * layout.cols_per_sheet;
            let end_col = (start_col + layout.cols_per_sheet - 1).min(grid.cols() - 1);

            let rows = end_row - start_row + 1;
            let cols = end_col - start_col + 1;
            let mut cells = Vec::with_capacity(rows * cols);

            for r in start_row..=end_row {
                for c in start_col..=end_col {
                    let mut cell = *grid.get(r, c).expect("window clipped to grid bounds");
                    if c == end_col && c + 1 < grid.cols() {
                        cell.end_connection = Some((r, c + 1));
                    }
                    cells.push(Some(cell));
                }
            }

            sheets.push(Sheet {
                start_row,
                end_row,
                start_col,
                end_col,
                rows,
                cols,
                cells,
            });
        }
    }

    sheets
}
