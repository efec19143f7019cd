//! Flat parameter set consumed from the external control panel.
//!
//! The panel mirrors these to and from URL query parameters, hence the
//! camelCase field names on the wire and the per-field defaults: absent
//! fields must fall back rather than fail.

use crate::sampler::CropRegion;
use serde::{Deserialize, Serialize};

/// All knobs for one pipeline rebuild. Replaced wholesale on every
/// parameter change; no component retains previous-parameter state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderParams {
    /// Resample target width in blocks (= pixels after sampling).
    pub pixels_wide: usize,
    /// Block edge length; also the per-cell output unit (mm on sheets).
    pub block_size: u32,
    pub crop_left: f32,
    pub crop_right: f32,
    pub crop_top: f32,
    pub crop_bottom: f32,
    /// Sharpen kernel centre weight; values <= 0 disable sharpening.
    pub sharp_adjust: i32,
    /// Stroke silhouettes instead of filling them (display-only hint).
    pub show_as_outlines: bool,
    /// Display-only hint for the preview surface.
    pub show_info: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            pixels_wide: 72,
            block_size: 12,
            crop_left: 0.0,
            crop_right: 1.0,
            crop_top: 0.0,
            crop_bottom: 1.0,
            sharp_adjust: 0,
            show_as_outlines: false,
            show_info: false,
        }
    }
}

impl RenderParams {
    /// The crop window described by the four fractional offsets.
    pub fn crop(&self) -> CropRegion {
        CropRegion::new(self.crop_left, self.crop_right, self.crop_top, self.crop_bottom)
    }
}
