//! Square-kernel convolution over RGBA buffers.
//!
//! Out-of-bounds taps contribute zero and the kernel is never
//! renormalized at the borders, so edge pixels lose the energy of the
//! clipped taps.

use crate::image::RgbaBuffer;

/// Convolve all four channels with a `side × side` kernel given in
/// row-major order. `weights.len()` must be a perfect square.
///
/// With `opaque` set, the convolved alpha is doubled before clamping,
/// which saturates soft alpha edges back to fully opaque.
pub fn convolve_square(input: &RgbaBuffer, weights: &[f32], opaque: bool) -> RgbaBuffer {
    let side = (weights.len() as f32).sqrt().round() as usize;
    assert_eq!(side * side, weights.len(), "kernel must be square");
    let half = side / 2;
    let alpha_factor = if opaque { 2.0 } else { 1.0 };

    let (w, h) = (input.w, input.h);
    let mut out = RgbaBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for cy in 0..side {
                for cx in 0..side {
                    let sy = y as isize + cy as isize - half as isize;
                    let sx = x as isize + cx as isize - half as isize;
                    if sy < 0 || sy >= h as isize || sx < 0 || sx >= w as isize {
                        continue;
                    }
                    let wt = weights[cy * side + cx];
                    let px = input.get(sx as usize, sy as usize);
                    for (sum, &chan) in acc.iter_mut().zip(px.iter()) {
                        *sum += chan as f32 * wt;
                    }
                }
            }
            out.set(
                x,
                y,
                [
                    acc[0].clamp(0.0, 255.0) as u8,
                    acc[1].clamp(0.0, 255.0) as u8,
                    acc[2].clamp(0.0, 255.0) as u8,
                    (acc[3] * alpha_factor).clamp(0.0, 255.0) as u8,
                ],
            );
        }
    }
    out
}

/// Sharpen with a 3×3 cross kernel: centre weight `amount`, orthogonal
/// neighbours `-(amount - 1) / 4`, corners zero. The weights sum to one,
/// so flat regions are unchanged.
pub fn sharpen(input: &RgbaBuffer, amount: f32) -> RgbaBuffer {
    let side_val = -(amount - 1.0) / 4.0;
    let weights = [
        0.0, side_val, 0.0, //
        side_val, amount, side_val, //
        0.0, side_val, 0.0,
    ];
    convolve_square(input, &weights, true)
}

/// Uniform box blur with a `size × size` kernel.
pub fn box_blur(input: &RgbaBuffer, size: usize) -> RgbaBuffer {
    let n = size * size;
    let weights = vec![1.0 / n as f32; n];
    convolve_square(input, &weights, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: usize, h: usize) -> RgbaBuffer {
        let mut img = RgbaBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = ((x * 255) / (w - 1).max(1)) as u8;
                img.set(x, y, [v, v, v, 255]);
            }
        }
        img
    }

    #[test]
    fn identity_kernel_preserves_interior() {
        let img = gradient(5, 5);
        let weights = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let out = convolve_square(&img, &weights, true);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(out.get(x, y), img.get(x, y), "pixel ({x},{y}) changed");
            }
        }
    }

    #[test]
    fn sharpen_is_identity_on_flat_regions() {
        let mut img = RgbaBuffer::new(5, 5);
        img.fill_rect(0, 0, 5, 5, [120, 120, 120, 255]);
        let out = sharpen(&img, 4.0);
        // interior only: edge pixels lose the clipped negative taps
        assert_eq!(out.get(2, 2), [120, 120, 120, 255]);
    }

    #[test]
    fn sharpen_increases_local_contrast_at_a_step() {
        let mut img = RgbaBuffer::new(6, 3);
        for y in 0..3 {
            for x in 0..6 {
                let v = if x < 3 { 50 } else { 200 };
                img.set(x, y, [v, v, v, 255]);
            }
        }
        let out = sharpen(&img, 4.0);
        let dark_side = out.get(2, 1)[0];
        let bright_side = out.get(3, 1)[0];
        assert!(dark_side < 50, "dark edge should overshoot down, got {dark_side}");
        assert!(
            bright_side > 200,
            "bright edge should overshoot up, got {bright_side}"
        );
    }

    #[test]
    fn box_blur_smooths_an_impulse() {
        let mut img = RgbaBuffer::new(5, 5);
        img.fill_rect(0, 0, 5, 5, [0, 0, 0, 255]);
        img.set(2, 2, [255, 255, 255, 255]);
        let out = box_blur(&img, 3);
        let centre = out.get(2, 2)[0];
        let neighbour = out.get(1, 2)[0];
        assert_eq!(centre, neighbour, "box kernel spreads the impulse evenly");
        assert!(centre > 0 && centre < 255);
    }
}
