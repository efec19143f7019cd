//! Owned RGBA8 image in row-major layout (stride == 4 × width).
//!
//! This is the only raster abstraction the pipeline depends on: pixel
//! get/set, rectangle fill and sub-region copy. No rendering surface is
//! assumed.

/// Flat RGBA byte buffer, four bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Bytes between consecutive rows (equals `4 * w`)
    pub stride: usize,
    /// Backing storage in row-major RGBA order
    pub data: Vec<u8>,
}

impl RgbaBuffer {
    /// Construct a zero-initialized (fully transparent black) buffer.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: 4 * w,
            data: vec![0u8; 4 * w * h],
        }
    }

    /// Wrap raw RGBA bytes; `data.len()` must equal `4 * w * h`.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == 4 * w * h).then_some(Self {
            w,
            h,
            stride: 4 * w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to the linear byte index of the pixel's R channel.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + 4 * x
    }

    #[inline]
    /// Read the RGBA pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.idx(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    /// Write the RGBA pixel at (x, y).
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = self.idx(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Borrow one row of RGBA bytes.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + 4 * self.w]
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer extents.
    pub fn fill_rect(&mut self, x: usize, y: usize, rw: usize, rh: usize, px: [u8; 4]) {
        let x1 = (x + rw).min(self.w);
        let y1 = (y + rh).min(self.h);
        for yy in y.min(self.h)..y1 {
            for xx in x..x1 {
                self.set(xx, yy, px);
            }
        }
    }

    /// Copy a rectangular sub-region into a new buffer, clipped to the
    /// source extents. Requests entirely outside the image yield an empty
    /// buffer.
    pub fn sub_region(&self, x: usize, y: usize, rw: usize, rh: usize) -> RgbaBuffer {
        let x0 = x.min(self.w);
        let y0 = y.min(self.h);
        let out_w = rw.min(self.w - x0);
        let out_h = rh.min(self.h - y0);
        let mut out = RgbaBuffer::new(out_w, out_h);
        for yy in 0..out_h {
            let src = self.idx(x0, y0 + yy);
            let dst = out.idx(0, yy);
            out.data[dst..dst + 4 * out_w].copy_from_slice(&self.data[src..src + 4 * out_w]);
        }
        out
    }
}
