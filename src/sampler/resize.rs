//! Aspect-preserving target sizing and bilinear resampling.

use crate::image::RgbaBuffer;

/// Compute output dimensions for a resize constrained by an optional
/// maximum width and height.
///
/// The width drives the scale. When `max_height` is supplied and the
/// *source* height exceeds it, the height becomes the constrained
/// dimension and the width follows the aspect ratio instead. Absent
/// constraints default to the source dimensions.
pub fn fit_dimensions(
    src_w: usize,
    src_h: usize,
    max_width: Option<usize>,
    max_height: Option<usize>,
) -> (usize, usize) {
    debug_assert!(src_w > 0 && src_h > 0, "fit_dimensions needs a non-empty source");

    let w_to_h = src_h as f32 / src_w as f32;
    let h_to_w = src_w as f32 / src_h as f32;

    let max_w = max_width.unwrap_or(src_w);
    let max_h = max_height.unwrap_or(src_h);

    let mut target_w = max_w as f32;
    let mut target_h = target_w * w_to_h;

    if src_h > max_h {
        target_h = max_h as f32;
        target_w = target_h * h_to_w;
    }

    (
        (target_w.round() as usize).max(1),
        (target_h.round() as usize).max(1),
    )
}

/// Bilinear resample to `out_w × out_h`. Pixel centres are mapped so that
/// a same-size resize reproduces the input exactly.
pub fn resize_bilinear(input: &RgbaBuffer, out_w: usize, out_h: usize) -> RgbaBuffer {
    let mut out = RgbaBuffer::new(out_w, out_h);
    if input.is_empty() || out.is_empty() {
        return out;
    }

    let scale_x = input.w as f32 / out_w as f32;
    let scale_y = input.h as f32 / out_h as f32;

    for y in 0..out_h {
        let sy = ((y as f32 + 0.5) * scale_y - 0.5).max(0.0);
        let y0 = (sy as usize).min(input.h - 1);
        let y1 = (y0 + 1).min(input.h - 1);
        let fy = sy - y0 as f32;

        for x in 0..out_w {
            let sx = ((x as f32 + 0.5) * scale_x - 0.5).max(0.0);
            let x0 = (sx as usize).min(input.w - 1);
            let x1 = (x0 + 1).min(input.w - 1);
            let fx = sx - x0 as f32;

            let p00 = input.get(x0, y0);
            let p10 = input.get(x1, y0);
            let p01 = input.get(x0, y1);
            let p11 = input.get(x1, y1);

            let mut px = [0u8; 4];
            for c in 0..4 {
                let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
                let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
                px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
            }
            out.set(x, y, px);
        }
    }
    out
}
