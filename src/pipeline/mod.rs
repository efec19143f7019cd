//! Pipeline orchestration for the block-silhouette conversion.
//!
//! Overview
//! - Samples the source image (crop → resize to `pixels_wide` → optional
//!   sharpen).
//! - Builds the block grid, one cell per resampled pixel.
//! - Generates the unsheeted skyline paths for direct display.
//! - Partitions the grid into page-sized sheets and generates per-sheet
//!   paths with cross-cut continuity.
//! - Rasterizes the grey-square preview buffer.
//!
//! Everything is a full rebuild over immutable inputs: a parameter change
//! re-runs the whole chain and the previous output is simply superseded.
//! There is no shared state between stages beyond the parameter value
//! passed in, and no concurrency.

mod params;

pub use params::RenderParams;

use crate::blocks::{self, BlockGrid, GridError};
use crate::image::RgbaBuffer;
use crate::raster;
use crate::sampler::{self, SampleError};
use crate::sheets::{self, PageSpec, Sheet, SheetLayout};
use crate::skyline::{self, SkylineOptions, SkylinePath};
use log::debug;
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

/// Typed failure surfaced by [`BlockPipeline::process`].
///
/// Structural conditions abort the rebuild; the caller keeps showing its
/// previous valid output.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    Sample(SampleError),
    Grid(GridError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Sample(e) => write!(f, "sampling failed: {e}"),
            PipelineError::Grid(e) => write!(f, "grid construction failed: {e}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Sample(e) => Some(e),
            PipelineError::Grid(e) => Some(e),
        }
    }
}

impl From<SampleError> for PipelineError {
    fn from(e: SampleError) -> Self {
        PipelineError::Sample(e)
    }
}

impl From<GridError> for PipelineError {
    fn from(e: GridError) -> Self {
        PipelineError::Grid(e)
    }
}

/// One print page: the sheet window plus its silhouette paths.
#[derive(Clone, Debug, Serialize)]
pub struct SheetPaths {
    pub sheet: Sheet,
    pub paths: Vec<SkylinePath>,
}

/// Stage timings and counts for one rebuild.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RenderReport {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub sheet_layout: SheetLayout,
    pub sheet_count: usize,
    pub sample_ms: f64,
    pub grid_ms: f64,
    pub paths_ms: f64,
    pub sheets_ms: f64,
    pub raster_ms: f64,
    pub total_ms: f64,
}

/// Everything one rebuild produces.
#[derive(Debug)]
pub struct RenderOutput {
    pub grid: BlockGrid,
    /// Unsheeted row paths for single-view display.
    pub paths: Vec<SkylinePath>,
    /// Paginated output in page order.
    pub pages: Vec<SheetPaths>,
    /// Grey-square preview buffer.
    pub preview: RgbaBuffer,
    pub report: RenderReport,
}

/// Stateless orchestrator; holds only the page geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockPipeline {
    page: PageSpec,
}

impl BlockPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(page: PageSpec) -> Self {
        Self { page }
    }

    /// Run the full chain over `source` with the given parameter set.
    ///
    /// The RNG drives the per-vertex skyline jitter; seed it for
    /// reproducible output or pass an entropy-seeded one for the
    /// hand-drawn texture.
    pub fn process(
        &self,
        source: &RgbaBuffer,
        params: &RenderParams,
        rng: &mut impl Rng,
    ) -> Result<RenderOutput, PipelineError> {
        let start = Instant::now();

        let t = Instant::now();
        let sampled = sampler::sample(
            source,
            params.crop(),
            Some(params.pixels_wide),
            None,
            params.sharp_adjust as f32,
        )?;
        let sample_ms = ms_since(t);

        let t = Instant::now();
        let grid = blocks::build_grid(&sampled)?;
        let grid_ms = ms_since(t);
        debug!("grid {}x{} from {}x{} sample", grid.cols(), grid.rows(), sampled.w, sampled.h);

        let opts = SkylineOptions::new(params.block_size as f32);

        let t = Instant::now();
        let paths = skyline::grid_paths(&grid, &opts, rng);
        let paths_ms = ms_since(t);

        let t = Instant::now();
        let layout = sheets::sheet_layout(&grid, params.block_size, self.page);
        let pages: Vec<SheetPaths> = sheets::partition(&grid, params.block_size, self.page)
            .into_iter()
            .map(|sheet| {
                let paths = skyline::sheet_paths(&sheet, &grid, &opts, rng);
                SheetPaths { sheet, paths }
            })
            .collect();
        let sheets_ms = ms_since(t);
        debug!("partitioned into {} sheets ({layout:?})", pages.len());

        let t = Instant::now();
        let preview = raster::rasterize(&grid, params.block_size);
        let raster_ms = ms_since(t);

        let report = RenderReport {
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            sheet_layout: layout,
            sheet_count: pages.len(),
            sample_ms,
            grid_ms,
            paths_ms,
            sheets_ms,
            raster_ms,
            total_ms: ms_since(start),
        };

        Ok(RenderOutput {
            grid,
            paths,
            pages,
            preview,
            report,
        })
    }
}

fn ms_since(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1e3
}
