//! Block canvas rasterizer: flat grey-square preview of the grid.
//!
//! Screen/debug output only; the print pipeline goes through the skyline
//! paths instead.

use crate::blocks::BlockGrid;
use crate::image::RgbaBuffer;

/// Fill one `block_size × block_size` square per cell with the cell's
/// grey level and binarized alpha.
pub fn rasterize(grid: &BlockGrid, block_size: u32) -> RgbaBuffer {
    let bs = block_size as usize;
    let mut out = RgbaBuffer::new(grid.cols() * bs, grid.rows() * bs);
    for row in grid.iter_rows() {
        for cell in row {
            let v = cell.brightness.round().clamp(0.0, 255.0) as u8;
            out.fill_rect(cell.x * bs, cell.y * bs, bs, bs, [v, v, v, cell.alpha]);
        }
    }
    out
}
