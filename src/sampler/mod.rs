//! Pixel sampler: crop → aspect-preserving resize → optional sharpen.
//!
//! The sampler is the only stage that touches source-image geometry. It
//! turns an arbitrary photograph into the small RGBA buffer whose pixels
//! become block cells one-to-one.

pub mod resize;

use crate::filters::sharpen;
use crate::image::RgbaBuffer;
use log::debug;
use serde::{Deserialize, Serialize};

use resize::{fit_dimensions, resize_bilinear};

/// Crop window in normalized source coordinates.
///
/// `left`/`top` are offsets from the top-left, `right`/`bottom` from the
/// same origin (so the identity is `(0, 1, 0, 1)`). Degenerate windows
/// are not rejected; they produce empty buffers downstream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CropRegion {
    pub const IDENTITY: CropRegion = CropRegion {
        left: 0.0,
        right: 1.0,
        top: 0.0,
        bottom: 1.0,
    };

    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for CropRegion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Failure conditions for [`sample`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleError {
    /// Source image has a zero dimension; cropping it is meaningless.
    InvalidImage { width: usize, height: usize },
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::InvalidImage { width, height } => {
                write!(f, "invalid source image: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Crop `source` to the normalized window, rounding offsets to whole
/// pixels. The identity window returns an unmodified copy without going
/// through the sub-region path.
pub fn crop_image(source: &RgbaBuffer, crop: CropRegion) -> RgbaBuffer {
    if crop.is_identity() {
        return source.clone();
    }

    let w = source.w as f32;
    let h = source.h as f32;
    let left_crop = w * crop.left;
    let right_crop = w * (1.0 - crop.right);
    let top_crop = h * crop.top;
    let bottom_crop = h * (1.0 - crop.bottom);

    let cropped_w = (w - (left_crop + right_crop)).round().max(0.0) as usize;
    let cropped_h = (h - (top_crop + bottom_crop)).round().max(0.0) as usize;

    source.sub_region(
        left_crop.round() as usize,
        top_crop.round() as usize,
        cropped_w,
        cropped_h,
    )
}

/// Crop, resample and optionally sharpen a source image.
///
/// - `target_width`: resample so the output is this many pixels wide,
///   keeping the aspect ratio; `None` skips resizing entirely.
/// - `max_height`: optional height cap; when the source height exceeds it,
///   the height becomes the constrained dimension instead.
/// - `sharpen_amount`: 3×3 cross sharpen applied when `> 0`.
pub fn sample(
    source: &RgbaBuffer,
    crop: CropRegion,
    target_width: Option<usize>,
    max_height: Option<usize>,
    sharpen_amount: f32,
) -> Result<RgbaBuffer, SampleError> {
    if source.is_empty() {
        return Err(SampleError::InvalidImage {
            width: source.w,
            height: source.h,
        });
    }

    let cropped = crop_image(source, crop);
    if cropped.is_empty() {
        debug!("degenerate crop {crop:?} -> empty buffer");
        return Ok(cropped);
    }

    let resized = if target_width.is_some() || max_height.is_some() {
        let (tw, th) = fit_dimensions(cropped.w, cropped.h, target_width, max_height);
        if (tw, th) == (cropped.w, cropped.h) {
            cropped
        } else {
            resize_bilinear(&cropped, tw, th)
        }
    } else {
        cropped
    };

    let out = if sharpen_amount > 0.0 {
        sharpen(&resized, sharpen_amount)
    } else {
        resized
    };

    debug!(
        "sampled {}x{} -> {}x{} (sharpen={})",
        source.w, source.h, out.w, out.h, sharpen_amount
    );
    Ok(out)
}
