#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod blocks;
pub mod config;
pub mod image;
pub mod pipeline;
pub mod raster;
pub mod sheets;
pub mod skyline;
pub mod svg;

// Pre-processing helpers – public, but considered unstable internals.
pub mod filters;
pub mod sampler;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::pipeline::{
    BlockPipeline, PipelineError, RenderOutput, RenderParams, RenderReport,
};

// Core data model.
pub use crate::blocks::{BlockGrid, Cell};
pub use crate::sheets::{PageSpec, Sheet, SheetLayout};
pub use crate::skyline::{SkylineOptions, SkylinePath};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use mountain_blocks::prelude::*;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// # fn main() {
/// let source = RgbaBuffer::new(64, 64);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let out = BlockPipeline::new()
///     .process(&source, &RenderParams::default(), &mut rng)
///     .unwrap();
/// println!("rows={} sheets={}", out.grid.rows(), out.pages.len());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RgbaBuffer;
    pub use crate::{BlockPipeline, RenderOutput, RenderParams};
}
