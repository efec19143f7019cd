//! Stateless RGBA pre-processing filters.
//!
//! These are the optional adjustments that can run ahead of the block
//! pipeline: greyscale, thresholds, contrast, posterize, ordered dither,
//! and the square convolutions (`sharpen`, `box_blur`). All are pure
//! `RgbaBuffer -> RgbaBuffer` maps; alpha passes through unchanged unless
//! noted.

pub mod convolve;

pub use self::convolve::{box_blur, convolve_square, sharpen};

use crate::image::RgbaBuffer;

/// Apply a per-pixel RGB map, leaving alpha untouched.
fn map_pixels(input: &RgbaBuffer, f: impl Fn(f32, f32, f32) -> (f32, f32, f32)) -> RgbaBuffer {
    let mut out = input.clone();
    for y in 0..input.h {
        for x in 0..input.w {
            let [r, g, b, a] = input.get(x, y);
            let (r2, g2, b2) = f(r as f32, g as f32, b as f32);
            out.set(
                x,
                y,
                [
                    r2.clamp(0.0, 255.0) as u8,
                    g2.clamp(0.0, 255.0) as u8,
                    b2.clamp(0.0, 255.0) as u8,
                    a,
                ],
            );
        }
    }
    out
}

/// Average-channel greyscale.
pub fn greyscale(input: &RgbaBuffer) -> RgbaBuffer {
    map_pixels(input, |r, g, b| {
        let grey = (r + g + b) / 3.0;
        (grey, grey, grey)
    })
}

/// Per-channel binary threshold at the midpoint.
pub fn rgb_threshold(input: &RgbaBuffer) -> RgbaBuffer {
    let step = |v: f32| if v > 127.0 { 255.0 } else { 0.0 };
    map_pixels(input, |r, g, b| (step(r), step(g), step(b)))
}

/// Black/white threshold on the channel average.
pub fn luma_threshold(input: &RgbaBuffer) -> RgbaBuffer {
    map_pixels(input, |r, g, b| {
        let v = if (r + g + b) / 3.0 > 127.0 { 255.0 } else { 0.0 };
        (v, v, v)
    })
}

/// Linear contrast adjustment around the midpoint.
///
/// `percent` is an integer percentage; positive values push channels away
/// from 128, negative values pull them in.
pub fn contrast(input: &RgbaBuffer, percent: i32) -> RgbaBuffer {
    let c = percent as f32 * 2.55;
    // .01 offset avoids a division by zero at +100%
    let factor = (255.0 + c) / (255.01 - c);
    map_pixels(input, |r, g, b| {
        (
            factor * (r - 128.0) + 128.0,
            factor * (g - 128.0) + 128.0,
            factor * (b - 128.0) + 128.0,
        )
    })
}

/// Quantize channels to `levels` bands via a lookup table built from the
/// red-channel range of the opaque pixels.
pub fn posterize(input: &RgbaBuffer, levels: u8) -> RgbaBuffer {
    let levels = levels.max(2) as usize;

    let mut min = 255u8;
    let mut max = 0u8;
    for y in 0..input.h {
        for x in 0..input.w {
            let [r, _, _, a] = input.get(x, y);
            if a != 0 {
                min = min.min(r);
                max = max.max(r);
            }
        }
    }

    let mut lut = [0u8; 256];
    let band_width = ((max.saturating_sub(min)) as usize / levels).max(1);
    let step = 255 / (levels - 1);
    let mut index = min as usize;
    for level in 0..levels {
        for _ in 0..band_width {
            if index > 255 {
                break;
            }
            lut[index] = (level * step).min(255) as u8;
            index += 1;
        }
    }
    for slot in lut.iter_mut().skip(index.min(256)) {
        *slot = 255;
    }

    let mut out = input.clone();
    for y in 0..input.h {
        for x in 0..input.w {
            let [r, g, b, a] = input.get(x, y);
            out.set(x, y, [lut[r as usize], lut[g as usize], lut[b as usize], a]);
        }
    }
    out
}

/// 4×4 Bayer threshold map used by [`bayer_dither`].
const BAYER_THRESHOLD_MAP: [[u16; 4]; 4] = [
    [15, 135, 45, 165],
    [195, 75, 225, 105],
    [60, 180, 30, 150],
    [240, 120, 210, 90],
];

/// Ordered 4×4 Bayer dither to black/white on the perceptual luminance.
pub fn bayer_dither(input: &RgbaBuffer, threshold: u8) -> RgbaBuffer {
    let mut out = input.clone();
    for y in 0..input.h {
        for x in 0..input.w {
            let [r, g, b, a] = input.get(x, y);
            let luma = (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114) as u16;
            let mapped = (luma + BAYER_THRESHOLD_MAP[x % 4][y % 4]) / 2;
            let v = if mapped < threshold as u16 { 0 } else { 255 };
            out.set(x, y, [v, v, v, a]);
        }
    }
    out
}
